use actix_web::{post, web, HttpResponse, Responder};

use crate::dtos::auth_dtos::{LoginIn, RefreshIn, RegisterIn};
use crate::dtos::ApiResponse;
use crate::handlers::form::looks_like_email;
use crate::services::AuthService;

const MIN_PASSWORD_LEN: usize = 6;

/// POST /auth/register
#[post("/register")]
pub async fn register(svc: web::Data<AuthService>, body: web::Json<RegisterIn>) -> impl Responder {
    let mut input = body.into_inner();
    input.email = input.email.trim().to_lowercase();

    if !looks_like_email(&input.email) {
        return ApiResponse::bad_request("Invalid email format").into_http();
    }
    if input.full_name.trim().is_empty() {
        return ApiResponse::bad_request("Full name is required").into_http();
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return ApiResponse::bad_request("Password must be at least 6 characters long").into_http();
    }
    if input.password != input.password_confirmation {
        return ApiResponse::bad_request("Password confirmation does not match").into_http();
    }

    ApiResponse::from_result(svc.register(input).await, "Register success").into_http()
}

/// POST /auth/login
#[post("/login")]
pub async fn login(svc: web::Data<AuthService>, body: web::Json<LoginIn>) -> impl Responder {
    let mut input = body.into_inner();
    input.email = input.email.trim().to_lowercase();

    if input.email.is_empty() || input.password.is_empty() {
        return ApiResponse::bad_request("Email and password are required").into_http();
    }

    ApiResponse::from_result(svc.login(input).await, "Login success").into_http()
}

/// POST /auth/refresh
#[post("/refresh")]
pub async fn refresh(svc: web::Data<AuthService>, body: web::Json<RefreshIn>) -> impl Responder {
    ApiResponse::from_result(svc.refresh(body.refresh_token.trim()).await, "Token refreshed").into_http()
}

/// POST /auth/logout
#[post("/logout")]
pub async fn logout(svc: web::Data<AuthService>, body: web::Json<RefreshIn>) -> HttpResponse {
    ApiResponse::from_result(svc.logout(body.refresh_token.trim()).await, "Logout success").into_http()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .app_data(super::json_config())
            .app_data(super::path_config())
            .service(register)
            .service(login)
            .service(refresh)
            .service(logout),
    );
}
