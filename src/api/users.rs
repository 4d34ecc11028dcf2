use actix_web::{http::header, web, HttpResponse};
use serde::Deserialize;

use crate::{
    database::Store,
    middleware::Identity,
    models::{
        AccessResponse, CheckEmailRequest, EnrollmentResponse, ExternalLoginResponse, LoginRequest,
        MakeAdminRequest, ProfileResponse, RegisterRequest, RegisterResponse, ResetPasswordRequest,
        UpdateProfileRequest, UserResponse,
    },
    services::{user_service, AuthService, IdentityProvider},
    utils::AppError,
};

const LOGIN_FAILED_PATH: &str = "/users/failed";

#[utoipa::path(
    post,
    path = "/users/check-email",
    tag = "Users",
    request_body = CheckEmailRequest,
    responses(
        (status = 404, description = "No account uses this email"),
        (status = 409, description = "Email already registered"),
        (status = 400, description = "Invalid email format")
    )
)]
pub async fn check_email(
    store: web::Data<dyn Store>,
    request: web::Json<CheckEmailRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📧 POST /users/check-email");

    if user_service::check_email_exists(store.get_ref(), request.email.as_deref()).await? {
        Ok(HttpResponse::Conflict().json(serde_json::json!({ "message": "Duplicate email found" })))
    } else {
        Ok(HttpResponse::NotFound()
            .json(serde_json::json!({ "message": "No duplicate email found" })))
    }
}

#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid email, mobile number or password")
    )
)]
pub async fn register(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users/register - email: {}", request.email.as_deref().unwrap_or("N/A"));

    let user = user_service::register_user(store.get_ref(), &auth, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user,
    }))
}

#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Access token, or `false` when the credentials do not match",
            body = AccessResponse
        ),
        (status = 400, description = "Invalid email format, body is `false`")
    )
)]
pub async fn login(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref();
    log::info!("🔐 POST /users/login - email: {}", email.unwrap_or("N/A"));

    let password = request.password.as_deref();
    match user_service::login_user(store.get_ref(), &auth, email, password).await? {
        Some(access) => {
            log::info!("✅ Login successful: {}", email.unwrap_or_default());
            Ok(HttpResponse::Ok().json(AccessResponse { access }))
        }
        None => {
            log::warn!("❌ Login failed: {}", email.unwrap_or_default());
            Ok(HttpResponse::Ok().json(false))
        }
    }
}

#[utoipa::path(
    get,
    path = "/users/details",
    tag = "Users",
    responses(
        (status = 200, description = "Profile, password blanked", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn details(
    store: web::Data<dyn Store>,
    identity: web::ReqData<Identity>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /users/details - user: {}", identity.id);

    let profile = user_service::get_profile(store.get_ref(), &identity.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    get,
    path = "/users/get-enrollments",
    tag = "Users",
    responses(
        (status = 200, description = "Caller's enrollments", body = Vec<EnrollmentResponse>),
        (status = 404, description = "No enrollments, body is `false`")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_enrollments(
    store: web::Data<dyn Store>,
    identity: web::ReqData<Identity>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users/get-enrollments - user: {}", identity.id);

    let enrollments = user_service::get_enrollments(store.get_ref(), &identity.id).await?;
    Ok(HttpResponse::Ok().json(enrollments))
}

#[utoipa::path(
    post,
    path = "/users/reset-password",
    tag = "Users",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced"),
        (status = 400, description = "New password is required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reset_password(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthService>,
    identity: web::ReqData<Identity>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔑 POST /users/reset-password - user: {}", identity.id);

    let new_password = request.new_password.as_deref();
    user_service::reset_password(store.get_ref(), &auth, &identity.id, new_password).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Password reset successfully" })))
}

/// The identity comes from the token when the route is authenticated and
/// from `userId` in the body otherwise.
#[utoipa::path(
    put,
    path = "/users/profile",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "User ID is required"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Failed to update profile")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    store: web::Data<dyn Store>,
    identity: Option<web::ReqData<Identity>>,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let mut request = request.into_inner();
    let user_id = match identity {
        Some(identity) => identity.into_inner().id,
        None => request
            .user_id
            .take()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::invalid(user_service::USER_ID_REQUIRED))?,
    };
    log::info!("✏️  PUT /users/profile - user: {}", user_id);

    let user = user_service::update_profile(store.get_ref(), &user_id, request).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[utoipa::path(
    put,
    path = "/users/updateAdmin",
    tag = "Users",
    request_body = MakeAdminRequest,
    responses(
        (status = 200, description = "User promoted"),
        (status = 400, description = "User ID is required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    store: web::Data<dyn Store>,
    identity: web::ReqData<Identity>,
    request: web::Json<MakeAdminRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("👑 PUT /users/updateAdmin - by: {}", identity.id);

    user_service::make_user_admin(store.get_ref(), request.user_id.as_deref()).await?;
    Ok(HttpResponse::Ok()
        .json(serde_json::json!({ "message": "User updated to admin successfully" })))
}

// ==================== GOOGLE LOGIN ====================

#[utoipa::path(
    get,
    path = "/users/google",
    tag = "Users",
    responses(
        (status = 302, description = "Redirect to the Google consent screen"),
        (status = 500, description = "Google login is not configured")
    )
)]
pub async fn google_login(
    provider: Option<web::Data<dyn IdentityProvider>>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 GET /users/google");

    let provider = provider.ok_or_else(|| {
        AppError::internal("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set")
            .with_public_message("Google login is not configured")
    })?;
    let state = uuid::Uuid::new_v4().to_string();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, provider.authorization_url(&state)))
        .finish())
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GoogleCallbackQuery {
    /// Authorization code from Google
    pub code: Option<String>,
    /// Error reported by Google
    pub error: Option<String>,
}

fn redirect_to_failed() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, LOGIN_FAILED_PATH))
        .finish()
}

#[utoipa::path(
    get,
    path = "/users/google/callback",
    tag = "Users",
    params(GoogleCallbackQuery),
    responses(
        (status = 200, description = "Logged in", body = ExternalLoginResponse),
        (status = 302, description = "Redirect to /users/failed")
    )
)]
pub async fn google_callback(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthService>,
    provider: Option<web::Data<dyn IdentityProvider>>,
    query: web::Query<GoogleCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔄 GET /users/google/callback");

    let (Some(provider), Some(code)) = (provider, query.code.as_deref()) else {
        log::warn!("❌ Google callback without code: {:?}", query.error);
        return Ok(redirect_to_failed());
    };

    let profile = match provider.exchange(code).await {
        Ok(profile) => profile,
        Err(e) => {
            log::warn!("❌ Google code exchange failed: {}", e);
            return Ok(redirect_to_failed());
        }
    };

    let access = user_service::login_with_external_profile(store.get_ref(), &auth, &profile).await?;
    log::info!("✅ Google login successful: {}", profile.email);

    Ok(HttpResponse::Ok().json(ExternalLoginResponse {
        access,
        message: format!("Welcome {}", profile.display_name),
    }))
}

#[utoipa::path(
    get,
    path = "/users/failed",
    tag = "Users",
    responses((status = 200, description = "External login failed"))
)]
pub async fn login_failed() -> HttpResponse {
    log::info!("🚫 GET /users/failed");
    HttpResponse::Ok().body("Failed")
}
