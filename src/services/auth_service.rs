use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::User;
use crate::utils::AppError;

/// Access token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub jti: String,
}

/// Token signing and password hashing, shared by handlers and the auth middleware.
#[derive(Clone)]
pub struct AuthService {
    secret: String,
    issuer: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(secret: &str, issuer: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            secret: secret.to_string(),
            issuer: issuer.to_string(),
            token_ttl,
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            &config.jwt_issuer,
            Duration::hours(config.token_ttl_hours),
            config.bcrypt_cost,
        )
    }

    pub fn create_access_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            id: user.id_hex(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp() as usize,
            exp: (now + self.token_ttl).timestamp() as usize,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<AccessClaims, String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
    }

    /// A stored value that is not a bcrypt hash never matches.
    pub fn verify_password(&self, password: &str, hashed: &str) -> bool {
        match verify(password, hashed) {
            Ok(valid) => valid,
            Err(e) => {
                log::warn!("⚠️  Password verification error: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn test_auth_service() -> AuthService {
    AuthService::new("test-secret", "course-booking-test", Duration::hours(1), 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn user(is_admin: bool) -> User {
        User {
            id: Some(ObjectId::new()),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@mail.com".into(),
            mobile_no: "09171234567".into(),
            password: String::new(),
            is_admin,
        }
    }

    #[test]
    fn token_carries_identity() {
        let auth = test_auth_service();
        let user = user(true);
        let token = auth.create_access_token(&user).unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.id, user.id_hex());
        assert_eq!(claims.email, "jane@mail.com");
        assert!(claims.is_admin);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other =
            AuthService::new("another-secret", "course-booking-test", Duration::hours(1), 4);
        let token = other.create_access_token(&user(false)).unwrap();

        assert!(test_auth_service().verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = AuthService::new("test-secret", "course-booking-test", Duration::hours(-2), 4);
        let token = auth.create_access_token(&user(false)).unwrap();

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn password_hash_round_trip() {
        let auth = test_auth_service();
        let hashed = auth.hash_password("password123").unwrap();

        assert_ne!(hashed, "password123");
        assert!(auth.verify_password("password123", &hashed));
        assert!(!auth.verify_password("password124", &hashed));
        assert!(!auth.verify_password("password123", "not-a-hash"));
    }
}
