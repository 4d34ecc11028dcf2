use std::env;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    MongoDB,
    Memory,
}

/// Whether `PUT /users/profile` sits behind the bearer check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileUpdatePolicy {
    /// The caller updates their own record.
    Authenticated,
    /// Legacy: no token, target user id taken from the body.
    Public,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub profile_update: ProfileUpdatePolicy,
    pub google: Option<GoogleConfig>,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Reads the configuration from the environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, String> {
        let storage = match var_or("STORAGE_BACKEND", "mongodb").to_lowercase().as_str() {
            "mongodb" | "mongo" => StorageBackend::MongoDB,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(format!(
                    "STORAGE_BACKEND must be 'mongodb' or 'memory', got '{}'",
                    other
                ))
            }
        };

        let profile_update = var_or("PROFILE_UPDATE_AUTH", "required").to_lowercase();
        let profile_update = match profile_update.as_str() {
            "required" => ProfileUpdatePolicy::Authenticated,
            "public" => ProfileUpdatePolicy::Public,
            other => {
                return Err(format!(
                    "PROFILE_UPDATE_AUTH must be 'required' or 'public', got '{}'",
                    other
                ))
            }
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                log::warn!("⚠️  JWT_SECRET not set, using an insecure development secret");
                "default-secret-change-me".to_string()
            }
        };

        let bcrypt_cost = parse_var("BCRYPT_COST", 10u32)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(format!("BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost));
        }

        let cors_origins = var_or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let google = match (env::var("GOOGLE_CLIENT_ID"), env::var("GOOGLE_CLIENT_SECRET")) {
            (Ok(client_id), Ok(client_secret)) => Some(GoogleConfig {
                client_id,
                client_secret,
                redirect_uri: var_or(
                    "GOOGLE_REDIRECT_URI",
                    "http://localhost:4000/users/google/callback",
                ),
            }),
            _ => None,
        };

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 4000u16)?,
            storage,
            database_url: var_or("DATABASE_URL", "mongodb://localhost:27017/course_booking"),
            jwt_secret,
            jwt_issuer: var_or("JWT_ISSUER", "course-booking-api"),
            token_ttl_hours: parse_var("JWT_TTL_HOURS", 24i64)?,
            bcrypt_cost,
            cors_origins,
            profile_update,
            google,
        })
    }
}
