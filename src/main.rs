mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::{AppConfig, StorageBackend};
use database::{MemoryStore, MongoDB, Store};
use services::{AuthService, GoogleIdentityProvider, IdentityProvider};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Course Booking API...");

    let store: Arc<dyn Store> = match config.storage {
        StorageBackend::MongoDB => {
            log::info!("📊 Database: {}", config.database_url);
            let db = MongoDB::new(&config.database_url).await.map_err(|e| {
                log::error!("❌ Failed to connect to MongoDB: {}", e);
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
            })?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db)
        }
        StorageBackend::Memory => {
            log::warn!("⚠️  Using in-memory storage, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let store_data: web::Data<dyn Store> = web::Data::from(store);

    let auth_data = web::Data::new(AuthService::from_config(&config));

    let identity_provider: Option<web::Data<dyn IdentityProvider>> = match config.google.clone() {
        Some(google) => {
            log::info!("🔐 Google login enabled");
            let provider: Arc<dyn IdentityProvider> = Arc::new(GoogleIdentityProvider::new(google));
            Some(web::Data::from(provider))
        }
        None => {
            log::info!("ℹ️  GOOGLE_CLIENT_ID not set, Google login disabled");
            None
        }
    };

    let profile_policy = config.profile_update;
    log::info!("👤 Profile update policy: {:?}", profile_policy);

    let (host, port) = (config.host.clone(), config.port);
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI document at: http://{}:{}/api-docs/openapi.json", host, port);

    let cors_origins = config.cors_origins.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        let mut app = App::new()
            .app_data(store_data.clone())
            .app_data(auth_data.clone());
        if let Some(provider) = &identity_provider {
            app = app.app_data(provider.clone());
        }

        app.wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(|cfg| api::configure(cfg, profile_policy))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
