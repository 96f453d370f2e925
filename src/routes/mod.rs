// Route exports
pub mod feed;
pub mod listings;
pub mod messages;

use actix_web::{error::InternalError, http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{Catalog, SessionManager};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionManager>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(feed::configure)
            .configure(listings::configure)
            .configure(messages::configure),
    );
}

/// Extractor settings that render rejected bodies, queries and paths as
/// `ErrorResponse` JSON instead of actix's plain-text default
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        rejected_input(err, req, "invalid_json")
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        rejected_input(err, req, "invalid_query")
    }))
    .app_data(web::PathConfig::default().error_handler(|err, req| {
        rejected_input(err, req, "invalid_path")
    }));
}

fn rejected_input<E>(err: E, req: &HttpRequest, kind: &str) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    tracing::info!("Rejected input on {}: {}", req.path(), err);
    let response = error_response(StatusCode::BAD_REQUEST, kind, err.to_string());
    InternalError::from_response(err, response).into()
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.listing_count() > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// JSON error body with a matching status code
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_failed(errors: &validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

pub(crate) fn not_found(what: &str, id: &str) -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, "Not found", format!("{} not found: {}", what, id))
}
