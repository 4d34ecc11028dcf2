// ==================== USER ACCOUNTS ====================
// Registration, login and profile management on top of the `users` collection

use uuid::Uuid;

use crate::{
    database::Store,
    models::{
        EnrollmentResponse, ProfileResponse, RegisterRequest, UpdateProfileRequest, User,
        UserResponse, UserUpdate,
    },
    services::{auth_service::AuthService, identity_provider::ExternalProfile},
    utils::{
        validation::{is_email_shaped, is_valid_mobile_number, is_valid_password, non_blank},
        AppError, ErrorBody,
    },
};

pub const INVALID_EMAIL: &str = "Invalid email format";
pub const INVALID_MOBILE: &str = "Mobile number is invalid";
pub const INVALID_PASSWORD: &str = "Password must be atleast 8 characters long";
pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_ID_REQUIRED: &str = "User ID is required";

/// POST /users/check-email - `true` when an account already uses the email
pub async fn check_email_exists(
    store: &dyn Store,
    email: Option<&str>,
) -> Result<bool, AppError> {
    if !is_email_shaped(email) {
        return Err(AppError::invalid(INVALID_EMAIL));
    }
    let email = email.unwrap_or_default();

    let count = store.count_users_by_email(email).await?;
    Ok(count > 0)
}

/// POST /users/register - validates email, mobile number and password in that order
pub async fn register_user(
    store: &dyn Store,
    auth: &AuthService,
    request: RegisterRequest,
) -> Result<UserResponse, AppError> {
    if !is_email_shaped(request.email.as_deref()) {
        return Err(AppError::invalid(INVALID_EMAIL));
    }
    if !is_valid_mobile_number(request.mobile_no.as_deref()) {
        return Err(AppError::invalid(INVALID_MOBILE));
    }
    if !is_valid_password(request.password.as_deref()) {
        return Err(AppError::invalid(INVALID_PASSWORD));
    }

    let password = auth.hash_password(request.password.as_deref().unwrap_or_default())?;

    let user = User {
        id: None,
        first_name: request.first_name.unwrap_or_default(),
        last_name: request.last_name.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        mobile_no: request.mobile_no.unwrap_or_default(),
        password,
        is_admin: false,
    };

    let stored = store.insert_user(user).await?;
    log::info!("✅ User registered: {}", stored.id_hex());
    Ok(UserResponse::from(stored))
}

/// POST /users/login - `Ok(None)` for an unknown email or a wrong password
pub async fn login_user(
    store: &dyn Store,
    auth: &AuthService,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<Option<String>, AppError> {
    if !is_email_shaped(email) {
        return Err(AppError::InvalidInput(ErrorBody::False));
    }
    let email = email.unwrap_or_default();

    let Some(user) = store.find_user_by_email(email).await? else {
        return Ok(None);
    };

    if !auth.verify_password(password.unwrap_or_default(), &user.password) {
        return Ok(None);
    }

    auth.create_access_token(&user).map(Some)
}

/// GET /users/details
pub async fn get_profile(store: &dyn Store, user_id: &str) -> Result<ProfileResponse, AppError> {
    store
        .find_user_by_id(user_id)
        .await?
        .map(ProfileResponse::from)
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
}

/// GET /users/get-enrollments
pub async fn get_enrollments(
    store: &dyn Store,
    user_id: &str,
) -> Result<Vec<EnrollmentResponse>, AppError> {
    let enrollments = store.find_enrollments_by_user(user_id).await?;
    if enrollments.is_empty() {
        return Err(AppError::NotFound(ErrorBody::False));
    }
    Ok(enrollments.into_iter().map(EnrollmentResponse::from).collect())
}

/// POST /users/reset-password - the old password is not checked
pub async fn reset_password(
    store: &dyn Store,
    auth: &AuthService,
    user_id: &str,
    new_password: Option<&str>,
) -> Result<(), AppError> {
    let new_password = new_password
        .filter(|password| !password.is_empty())
        .ok_or_else(|| AppError::invalid("New password is required"))?;

    let update = UserUpdate {
        password: Some(auth.hash_password(new_password)?),
        ..Default::default()
    };

    store
        .update_user(user_id, update)
        .await?
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;
    Ok(())
}

/// PUT /users/profile - only names and mobile number can change here
pub async fn update_profile(
    store: &dyn Store,
    user_id: &str,
    request: UpdateProfileRequest,
) -> Result<UserResponse, AppError> {
    let update = UserUpdate {
        first_name: request.first_name,
        last_name: request.last_name,
        mobile_no: request.mobile_no,
        ..Default::default()
    };

    let updated = store
        .update_user(user_id, update)
        .await
        .map_err(|e| AppError::from(e).with_public_message("Failed to update profile"))?;

    updated
        .map(UserResponse::from)
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
}

/// PUT /users/updateAdmin
pub async fn make_user_admin(store: &dyn Store, user_id: Option<&str>) -> Result<(), AppError> {
    let user_id = non_blank(user_id).ok_or_else(|| AppError::invalid(USER_ID_REQUIRED))?;

    let update = UserUpdate {
        is_admin: Some(true),
        ..Default::default()
    };

    store
        .update_user(user_id, update)
        .await?
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

    log::info!("👑 User {} promoted to admin", user_id);
    Ok(())
}

/// Maps a profile from an identity provider to a local account, creating it
/// on first login, and issues an access token for it.
pub async fn login_with_external_profile(
    store: &dyn Store,
    auth: &AuthService,
    profile: &ExternalProfile,
) -> Result<String, AppError> {
    let user = match store.find_user_by_email(&profile.email).await? {
        Some(user) => user,
        None => {
            // the account can only be reached through the provider
            let password = auth.hash_password(&Uuid::new_v4().to_string())?;
            let user = User {
                id: None,
                first_name: profile
                    .given_name
                    .clone()
                    .unwrap_or_else(|| profile.display_name.clone()),
                last_name: profile.family_name.clone().unwrap_or_default(),
                email: profile.email.clone(),
                mobile_no: String::new(),
                password,
                is_admin: false,
            };
            let stored = store.insert_user(user).await?;
            log::info!("🆕 Created account {} from external login", stored.id_hex());
            stored
        }
    };

    auth.create_access_token(&user)
}
