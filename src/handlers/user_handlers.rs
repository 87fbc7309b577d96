// src/handlers/user_handlers.rs - /user routes for the signed-in member
use actix_multipart::Multipart;
use actix_web::{get, post, put, web, Responder};
use chrono::NaiveDate;

use crate::dtos::user_dtos::{CreateHistoryRequest, EditPasswordRequest, EditUserRequest};
use crate::dtos::ApiResponse;
use crate::handlers::form::{looks_like_email, read_form};
use crate::middleware::auth_extractor::BearerToken;
use crate::services::UserService;

/// POST /user/history
#[post("/history")]
pub async fn create_history(
    token: BearerToken,
    svc: web::Data<UserService>,
    body: web::Json<CreateHistoryRequest>,
) -> impl Responder {
    let req = body.into_inner();
    if req.total_calories < 0 || req.total_protein < 0 {
        return ApiResponse::bad_request("Totals cannot be negative").into_http();
    }

    match svc.create_history(token.as_str(), req).await {
        Ok(saved) if saved.created => ApiResponse::success("History created", saved.record).into_http(),
        Ok(saved) => ApiResponse::success("History updated", saved.record).into_http(),
        Err(e) => ApiResponse::<()>::failure(&e).into_http(),
    }
}

/// GET /user/history/{date}, date as YYYY-MM-DD
#[get("/history/{date}")]
pub async fn get_history(
    token: BearerToken,
    svc: web::Data<UserService>,
    path: web::Path<String>,
) -> impl Responder {
    let date = match NaiveDate::parse_from_str(path.trim(), "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return ApiResponse::bad_request("Invalid date format. Use YYYY-MM-DD").into_http(),
    };

    ApiResponse::from_result(svc.get_history(token.as_str(), date).await, "Success").into_http()
}

/// PUT /user/profile
#[put("/profile")]
pub async fn edit_user(
    token: BearerToken,
    svc: web::Data<UserService>,
    body: web::Json<EditUserRequest>,
) -> impl Responder {
    let mut req = body.into_inner();
    req.email = req.email.map(|e| e.trim().to_lowercase());
    if let Some(email) = req.email.as_deref().filter(|e| !e.is_empty()) {
        if !looks_like_email(email) {
            return ApiResponse::bad_request("Invalid email format").into_http();
        }
    }

    ApiResponse::from_result(svc.edit_user(token.as_str(), req).await, "Profile updated").into_http()
}

/// PUT /user/password
#[put("/password")]
pub async fn edit_password(
    token: BearerToken,
    svc: web::Data<UserService>,
    body: web::Json<EditPasswordRequest>,
) -> impl Responder {
    if body.new_password.is_empty() {
        return ApiResponse::bad_request("New password is required").into_http();
    }
    if body.new_password != body.password_confirmation {
        return ApiResponse::bad_request("Password confirmation does not match").into_http();
    }

    ApiResponse::from_result(
        svc.edit_password(token.as_str(), &body.new_password, &body.old_password).await,
        "Password updated",
    )
    .into_http()
}

/// PUT /user/photo (multipart: alias, file)
#[put("/photo")]
pub async fn edit_photo(
    token: BearerToken,
    svc: web::Data<UserService>,
    payload: Multipart,
) -> impl Responder {
    let mut form = match read_form(payload, "file").await {
        Ok(f) => f,
        Err(msg) => return ApiResponse::bad_request(msg).into_http(),
    };
    let Some(photo) = form.take_photo() else {
        return ApiResponse::bad_request("Photo is required").into_http();
    };

    ApiResponse::from_result(svc.edit_photo(token.as_str(), photo).await, "Photo updated").into_http()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .app_data(super::json_config())
            .app_data(super::path_config())
            .service(create_history)
            .service(get_history)
            .service(edit_user)
            .service(edit_password)
            .service(edit_photo),
    );
}
