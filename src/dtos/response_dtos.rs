// src/dtos/response_dtos.rs - the envelope every endpoint answers with
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::{error, warn};
use serde::Serialize;

use crate::services::ServiceError;

/// `{statusCode, messages, data}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub messages: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(messages: impl Into<String>, data: T) -> Self {
        Self { status_code: 200, messages: messages.into(), data: Some(data) }
    }

    pub fn error(status_code: u16, messages: impl Into<String>) -> Self {
        Self { status_code, messages: messages.into(), data: None }
    }

    pub fn failure(err: &ServiceError) -> Self {
        let status_code = err.status_code();
        if status_code >= 500 {
            error!("request failed: {}", err);
        } else {
            warn!("request rejected: {}", err);
        }
        Self::error(status_code, err.public_message())
    }

    pub fn from_result(result: Result<T, ServiceError>, messages: &str) -> Self {
        match result {
            Ok(data) => Self::success(messages, data),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn into_http(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

impl ApiResponse<()> {
    pub fn unauthorized() -> Self {
        Self::error(401, "Unauthorized")
    }

    pub fn bad_request(messages: impl Into<String>) -> Self {
        Self::error(400, messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_wire_field_names() {
        let body = serde_json::to_value(ApiResponse::success("Success", 7)).unwrap();
        assert_eq!(body, serde_json::json!({"statusCode": 200, "messages": "Success", "data": 7}));
    }

    #[test]
    fn failures_carry_null_data() {
        let resp = ApiResponse::<u8>::from_result(Err(ServiceError::NotFound("Gym")), "Success");
        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.messages, "Gym not found");
        assert!(resp.data.is_none());
    }
}
