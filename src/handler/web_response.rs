use crate::error::ServiceError;
use actix_web::HttpResponse;
use log::error;
use serde_json::json;

pub fn error_body(msg: &str) -> serde_json::Value {
    json!({ "error": msg })
}

pub fn message_body(msg: &str) -> serde_json::Value {
    json!({ "message": msg })
}

/// Convert a service failure to a JSON response. `fallback` is the message
/// sent with a 500 so storage details never reach the client.
pub fn conv_error(err: ServiceError, fallback: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound(entity) => {
            HttpResponse::NotFound().json(error_body(&format!("{} not found", entity)))
        }
        ServiceError::InvalidInput(msg) => HttpResponse::BadRequest().json(error_body(&msg)),
        ServiceError::Storage(e) => {
            error!("{}: {}", fallback, e);
            HttpResponse::InternalServerError().json(error_body(fallback))
        }
    }
}
