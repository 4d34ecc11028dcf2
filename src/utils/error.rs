use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::database::StoreError;

/// Shape of the JSON body sent with an error status.
///
/// Several endpoints answer with a bare `false` instead of a message object;
/// clients depend on that, so the shape travels with the error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// `{ "message": "..." }`
    Message(String),
    /// `false`
    False,
    /// `{ "auth": "Failed", "message": "..." }`
    Auth(String),
    /// `{ "auth": "Failed. No Token" }`
    MissingToken,
}

impl ErrorBody {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ErrorBody::Message(message) => serde_json::json!({ "message": message }),
            ErrorBody::False => serde_json::Value::Bool(false),
            ErrorBody::Auth(message) => serde_json::json!({
                "auth": "Failed",
                "message": message
            }),
            ErrorBody::MissingToken => serde_json::json!({ "auth": "Failed. No Token" }),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    InvalidInput(ErrorBody),
    Unauthorized(ErrorBody),
    Forbidden(ErrorBody),
    NotFound(ErrorBody),
    Conflict(ErrorBody),
    /// `message` is what the caller sees, `detail` only reaches the log.
    Internal { message: String, detail: String },
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidInput(ErrorBody::Message(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(ErrorBody::Message(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(ErrorBody::Message(message.into()))
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        AppError::Internal {
            message: "Internal server error".to_string(),
            detail: detail.into(),
        }
    }

    /// Replaces the public message of an internal error, leaving other kinds untouched.
    pub fn with_public_message(self, public: &str) -> Self {
        match self {
            AppError::Internal { detail, .. } => AppError::Internal {
                message: public.to_string(),
                detail,
            },
            other => other,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::InvalidInput(body)
            | AppError::Unauthorized(body)
            | AppError::Forbidden(body)
            | AppError::NotFound(body)
            | AppError::Conflict(body) => body.clone(),
            AppError::Internal { message, .. } => ErrorBody::Message(message.clone()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(body) => write!(f, "Invalid input: {}", body.to_json()),
            AppError::Unauthorized(body) => write!(f, "Unauthorized: {}", body.to_json()),
            AppError::Forbidden(body) => write!(f, "Forbidden: {}", body.to_json()),
            AppError::NotFound(body) => write!(f, "Not found: {}", body.to_json()),
            AppError::Conflict(body) => write!(f, "Conflict: {}", body.to_json()),
            AppError::Internal { message, detail } => write!(f, "{}: {}", message, detail),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(message) => AppError::conflict(message),
            StoreError::Backend(detail) => AppError::internal(detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal { detail, .. } = self {
            log::error!("❌ Internal error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(self.body().to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        let cases = [
            (AppError::invalid("bad"), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized(ErrorBody::MissingToken), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden(ErrorBody::False), StatusCode::FORBIDDEN),
            (AppError::not_found("missing"), StatusCode::NOT_FOUND),
            (AppError::conflict("dup"), StatusCode::CONFLICT),
            (AppError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }

    #[actix_web::test]
    async fn false_body_is_a_bare_boolean() {
        let (status, body) = body_of(AppError::NotFound(ErrorBody::False)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!(false));
    }

    #[actix_web::test]
    async fn internal_detail_is_not_leaked() {
        let (status, body) = body_of(AppError::internal("connection reset by peer")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "message": "Internal server error" }));
    }

    #[actix_web::test]
    async fn public_message_replaces_generic_text() {
        let err =
            AppError::internal("write failed").with_public_message("Failed to update profile");
        let (_, body) = body_of(err).await;
        assert_eq!(body, serde_json::json!({ "message": "Failed to update profile" }));
    }

    #[test]
    fn store_duplicate_becomes_conflict() {
        let err: AppError = StoreError::Duplicate("Course already exists".into()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.body(), ErrorBody::Message("Course already exists".into()));
    }
}
