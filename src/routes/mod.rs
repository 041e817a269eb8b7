// Route exports
pub mod matches;

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

pub use matches::AppState;

/// Mount every endpoint under `/api/v1`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(matches::configure));
}

/// JSON body extractor config that answers malformed payloads with an `ErrorResponse`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::info!("JSON payload error on {}: {}", req.path(), err);
        bad_request("invalid_json", format!("Invalid JSON: {}", err))
    })
}

/// Query string extractor config, e.g. for an unknown `role`
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::info!("Query error on {}: {}", req.path(), err);
        bad_request("invalid_query", format!("Invalid query: {}", err))
    })
}

fn bad_request(error: &str, message: String) -> actix_web::Error {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    };
    error::InternalError::from_response(body.message.clone(), HttpResponse::BadRequest().json(body))
        .into()
}
