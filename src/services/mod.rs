pub mod auth_service;
pub mod course_service;
pub mod enrollment_service;
pub mod identity_provider;
pub mod news_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use identity_provider::{ExternalProfile, GoogleIdentityProvider, IdentityProvider};
