use actix_web::{web, HttpResponse};

use crate::{
    database::Store,
    middleware::Identity,
    models::EnrollRequest,
    services::enrollment_service,
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/enrollments",
    tag = "Enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrolled, body is `true`"),
        (status = 403, description = "Admins cannot enroll, body is `false`")
    ),
    security(("bearer_auth" = []))
)]
pub async fn enroll(
    store: web::Data<dyn Store>,
    identity: web::ReqData<Identity>,
    request: web::Json<EnrollRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🎓 POST /enrollments - user: {}", identity.id);

    enrollment_service::enroll(store.get_ref(), &identity, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(true))
}
