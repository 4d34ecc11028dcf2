use crate::{
    database::Store,
    middleware::Identity,
    models::{EnrollRequest, Enrollment, EnrollmentResponse},
    utils::{AppError, ErrorBody},
};

/// POST /enrollments - admins cannot enroll, whatever the body says
pub async fn enroll(
    store: &dyn Store,
    identity: &Identity,
    request: EnrollRequest,
) -> Result<EnrollmentResponse, AppError> {
    if identity.is_admin {
        return Err(AppError::Forbidden(ErrorBody::False));
    }

    let enrollment = Enrollment {
        id: None,
        user_id: identity.id.clone(),
        enrolled_courses: request.enrolled_courses,
        total_price: request.total_price,
        enrolled_on: chrono::Utc::now().timestamp(),
        status: "Enrolled".to_string(),
    };

    let stored = store.insert_enrollment(enrollment).await?;
    log::info!(
        "🎓 User {} enrolled in {} course(s)",
        stored.user_id,
        stored.enrolled_courses.len()
    );
    Ok(EnrollmentResponse::from(stored))
}
