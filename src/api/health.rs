use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::database::MongoDB;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

pub async fn root() -> impl Responder {
    HttpResponse::Ok().body("Booking Service is up")
}

pub async fn health_check(db: web::Data<MongoDB>) -> impl Responder {
    let status = match db.health_check().await {
        Ok(()) => "healthy",
        Err(e) => {
            log::error!("❌ Health check failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        service: "booking-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
