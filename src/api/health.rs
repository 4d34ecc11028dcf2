use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::database::Store;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are reachable", body = HealthResponse),
        (status = 503, description = "Store did not answer the ping", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn Store>) -> HttpResponse {
    let healthy = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::error!("❌ Health check failed: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
