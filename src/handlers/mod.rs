pub mod form;
pub mod auth_handlers;
pub mod admin_handlers;
pub mod user_handlers;
pub mod makanan_handlers;

use actix_web::error::InternalError;
use actix_web::web;
use log::debug;

use crate::dtos::ApiResponse;

fn rejected(reason: String) -> actix_web::Error {
    debug!("rejecting request: {}", reason);
    let resp = ApiResponse::bad_request(reason.clone()).into_http();
    InternalError::from_response(reason, resp).into()
}

/// Malformed JSON bodies answer with the 400 envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| rejected(format!("Invalid request body: {}", err)))
}

/// Unparseable path segments (e.g. a non-uuid id) answer with the 400 envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| rejected(format!("Invalid path: {}", err)))
}
