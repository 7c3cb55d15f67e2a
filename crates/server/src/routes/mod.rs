use actix_web::{error::InternalError, web, HttpResponse};

use crate::types::ErrorResponse;

pub mod analyze;
pub mod fine_tune;
pub mod health;
pub mod tasks;

/// Documents can be long; raise actix's 32 KiB default
pub const MAX_JSON_BODY_BYTES: usize = 16 * 1024 * 1024;

/// JSON extractor settings: size limit and JSON error bodies
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_json".to_string(),
                details: Some(err.to_string()),
            });
            InternalError::from_response(err, response).into()
        })
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(analyze::analyze)
        .service(health::health)
        .service(fine_tune::fine_tune)
        .service(tasks::get_tasks)
        .service(tasks::cancel_task)
        .service(tasks::get_task_progress);
}
