use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

/// JSON extractor configuration for the resource services.
///
/// A body that fails to deserialize (wrong type, missing field, invalid
/// JSON) is rejected with 422 and an `{"error": ...}` body before any
/// handler or store code runs.
pub fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({
            "error": format!("Invalid request body: {err}")
        });
        InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(body)).into()
    })
}
