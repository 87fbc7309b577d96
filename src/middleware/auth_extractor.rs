// src/middleware/auth_extractor.rs - pulls the bearer token out of the request
use actix_web::error::InternalError;
use actix_web::{dev::Payload, http::header, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use log::debug;

use crate::dtos::ApiResponse;

/// Raw token from `Authorization: Bearer <token>`. Signature checks happen in
/// the services, which know which claim they need.
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn unauthorized(reason: &str) -> Error {
    debug!("rejecting request: {}", reason);
    InternalError::from_response(reason.to_string(), ApiResponse::unauthorized().into_http()).into()
}

fn token_from_header(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<BearerToken, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(h) => match h.to_str() {
                Ok(v) => v,
                Err(_) => return ready(Err(unauthorized("Invalid header format"))),
            },
            None => return ready(Err(unauthorized("Missing Authorization header"))),
        };

        match token_from_header(auth_header) {
            Some(token) => ready(Ok(BearerToken(token.to_string()))),
            None => ready(Err(unauthorized("Invalid auth header format"))),
        }
    }
}
