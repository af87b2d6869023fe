use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::configuration::ApplicationSettings;

pub async fn health_check(app: web::Data<ApplicationSettings>) -> HttpResponse {
    tracing::debug!("Health check endpoint called");
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "app": app.name,
        "version": app.version,
    }))
}

pub async fn root(app: web::Data<ApplicationSettings>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "app": app.name,
        "version": app.version,
        "health": "/health",
    }))
}
