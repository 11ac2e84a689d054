// Route exports
pub mod allocation;
pub mod registry;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;
use crate::services::{Registry, RegistryError};
use std::sync::Arc;
use validator::ValidationErrors;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn Registry>,
}

/// JSON error response for extractor failures
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path segments that fail to parse, such as an unknown task action
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Unmatched path {}: {}", req.path(), err);
    JsonError {
        error: "not_found".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 404,
    }
    .into()
}

/// Register the API routes along with JSON error bodies for extractor failures
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error));

    cfg.service(
        // Allocation first: its fixed paths must shadow `/shelters/{id}` and `/tasks/{id}/{action}`
        web::scope("/api/v1")
            .configure(allocation::configure)
            .configure(registry::configure),
    );
}

/// Map a registry failure onto an HTTP error body
pub(crate) fn registry_error(err: RegistryError) -> HttpResponse {
    let (status, error) = match &err {
        RegistryError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found"),
        RegistryError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
        RegistryError::InvalidTransition { .. }
        | RegistryError::NotAssignable { .. }
        | RegistryError::DuplicateProfile { .. } => {
            (StatusCode::CONFLICT, "Conflict")
        }
        RegistryError::Invariant(_) => {
            tracing::error!("Registry invariant violated: {}", err);
            (StatusCode::CONFLICT, "Conflict")
        }
    };
    error_body(status, error, err.to_string())
}

pub(crate) fn validation_error(errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Request validation failed: {}", errors);
    error_body(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

fn error_body(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}
