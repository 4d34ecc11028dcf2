use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Booking API",
        version = "1.0.0",
        description = "Course booking service: accounts, course catalog, enrollments and news.\n\n**Authentication:** protected endpoints expect `Authorization: Bearer <token>` from `POST /users/login`. Admin endpoints additionally require an admin account."
    ),
    paths(
        // Users
        crate::api::users::check_email,
        crate::api::users::register,
        crate::api::users::login,
        crate::api::users::details,
        crate::api::users::get_enrollments,
        crate::api::users::reset_password,
        crate::api::users::update_profile,
        crate::api::users::update_admin,
        crate::api::users::google_login,
        crate::api::users::google_callback,
        crate::api::users::login_failed,

        // Courses
        crate::api::courses::add_course,
        crate::api::courses::get_all_courses,
        crate::api::courses::get_all_active,
        crate::api::courses::get_course,
        crate::api::courses::update_course,
        crate::api::courses::archive_course,
        crate::api::courses::activate_course,
        crate::api::courses::search_by_price,

        // Enrollments
        crate::api::enrollments::enroll,

        // News
        crate::api::news::add_news,
        crate::api::news::get_all_news,
        crate::api::news::get_all_active,
        crate::api::news::get_news,
        crate::api::news::update_news,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            // Users
            crate::models::CheckEmailRequest,
            crate::models::RegisterRequest,
            crate::models::RegisterResponse,
            crate::models::LoginRequest,
            crate::models::AccessResponse,
            crate::models::ResetPasswordRequest,
            crate::models::UpdateProfileRequest,
            crate::models::MakeAdminRequest,
            crate::models::UserResponse,
            crate::models::ProfileResponse,
            crate::models::ExternalLoginResponse,

            // Courses
            crate::models::CreateCourseRequest,
            crate::models::UpdateCourseRequest,
            crate::models::PriceSearchRequest,
            crate::models::CourseResponse,
            crate::models::CourseCreatedResponse,

            // Enrollments
            crate::models::EnrollRequest,
            crate::models::EnrolledCourse,
            crate::models::EnrollmentResponse,

            // News
            crate::models::CreateNewsRequest,
            crate::models::UpdateNewsRequest,
            crate::models::NewsResponse,
            crate::models::NewsCreatedResponse,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login, profile and admin promotion. Google login redirects through the consent screen."),
        (name = "Courses", description = "Course catalog. Listing everything, creating and editing require an admin token."),
        (name = "Enrollments", description = "Enrollment of the authenticated (non-admin) user."),
        (name = "News", description = "Announcements managed by admins."),
        (name = "Health", description = "Liveness and store connectivity."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /users/login"))
                        .build()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/users/login"));
        assert!(doc.paths.paths.contains_key("/courses/{course_id}/archive"));
        assert!(doc.paths.paths.contains_key("/news/specific/{news_id}"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
