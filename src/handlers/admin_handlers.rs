// src/handlers/admin_handlers.rs - /admin routes; every service call checks the admin role
use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

use crate::dtos::admin_dtos::{
    RegisterFranchiseRequest, RegisterGymRequest, RegisterMakananRequest, RegisterUserRequest,
    UpdateUserRequest,
};
use crate::dtos::ApiResponse;
use crate::handlers::form::{decode_base64_photo, looks_like_email, read_form, FormData};
use crate::middleware::auth_extractor::BearerToken;
use crate::services::AdminService;

fn gym_request(form: &FormData) -> Result<RegisterGymRequest, String> {
    Ok(RegisterGymRequest {
        name: form.required("namaGym")?.to_string(),
        address: form.required("alamatGym")?.to_string(),
        latitude: form.number("latitude")?,
        longitude: form.number("longitude")?,
        link_google: form.get("linkGoogle").to_string(),
    })
}

/// POST /admin/gym (multipart)
#[post("/gym")]
pub async fn register_gym(
    token: BearerToken,
    svc: web::Data<AdminService>,
    payload: Multipart,
) -> impl Responder {
    let mut form = match read_form(payload, "file").await {
        Ok(f) => f,
        Err(msg) => return ApiResponse::bad_request(msg).into_http(),
    };
    let request = match gym_request(&form) {
        Ok(r) => r,
        Err(msg) => return ApiResponse::bad_request(msg).into_http(),
    };
    let Some(photo) = form.take_photo() else {
        return ApiResponse::bad_request("Photo is required").into_http();
    };

    ApiResponse::from_result(svc.register_gym(token.as_str(), request, photo).await, "Gym registered")
        .into_http()
}

/// POST /admin/franchise
#[post("/franchise")]
pub async fn register_franchise(
    token: BearerToken,
    svc: web::Data<AdminService>,
    body: web::Json<RegisterFranchiseRequest>,
) -> impl Responder {
    let mut req = body.into_inner();
    req.email = req.email.trim().to_lowercase();
    if !looks_like_email(&req.email) {
        return ApiResponse::bad_request("Invalid email format").into_http();
    }
    if req.name.trim().is_empty() || req.password.is_empty() {
        return ApiResponse::bad_request("Name and password are required").into_http();
    }

    ApiResponse::from_result(svc.register_franchise(token.as_str(), req).await, "Franchise registered")
        .into_http()
}

/// POST /admin/makanan
#[post("/makanan")]
pub async fn register_makanan(
    token: BearerToken,
    svc: web::Data<AdminService>,
    body: web::Json<RegisterMakananRequest>,
) -> impl Responder {
    if body.name.trim().is_empty() {
        return ApiResponse::bad_request("Name is required").into_http();
    }

    ApiResponse::from_result(
        svc.register_makanan(token.as_str(), body.into_inner()).await,
        "Makanan registered",
    )
    .into_http()
}

/// POST /admin/gym/{id}/kode
#[post("/gym/{id}/kode")]
pub async fn generate_gym_token(
    token: BearerToken,
    svc: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    ApiResponse::from_result(
        svc.generate_gym_token(token.as_str(), path.into_inner()).await,
        "Gym code generated",
    )
    .into_http()
}

/// GET /admin/gym/{id}/kode
#[get("/gym/{id}/kode")]
pub async fn get_gym_codes(
    token: BearerToken,
    svc: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    ApiResponse::from_result(svc.get_gym_codes(token.as_str(), path.into_inner()).await, "Success")
        .into_http()
}

/// POST /admin/users (JSON, optional base64 photo)
#[post("/users")]
pub async fn register_user(
    token: BearerToken,
    svc: web::Data<AdminService>,
    body: web::Json<RegisterUserRequest>,
) -> impl Responder {
    let mut req = body.into_inner();
    req.email = req.email.trim().to_lowercase();
    if !looks_like_email(&req.email) {
        return ApiResponse::bad_request("Invalid email format").into_http();
    }
    if req.password.is_empty() {
        return ApiResponse::bad_request("Password is required").into_http();
    }

    let photo = match req.photo.take().map(decode_base64_photo).transpose() {
        Ok(p) => p,
        Err(msg) => return ApiResponse::bad_request(msg).into_http(),
    };

    ApiResponse::from_result(svc.register_user(token.as_str(), req, photo).await, "User registered")
        .into_http()
}

/// GET /admin/users
#[get("/users")]
pub async fn get_all_users(token: BearerToken, svc: web::Data<AdminService>) -> impl Responder {
    ApiResponse::from_result(svc.get_all_users(token.as_str()).await, "Success").into_http()
}

/// GET /admin/users/{id}
#[get("/users/{id}")]
pub async fn get_user_by_id(
    token: BearerToken,
    svc: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    ApiResponse::from_result(svc.get_user_by_id(token.as_str(), path.into_inner()).await, "Success")
        .into_http()
}

/// PUT /admin/users/{id}
#[put("/users/{id}")]
pub async fn update_user(
    token: BearerToken,
    svc: web::Data<AdminService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> impl Responder {
    let mut req = body.into_inner();
    req.email = req.email.map(|e| e.trim().to_lowercase());
    if let Some(email) = req.email.as_deref().filter(|e| !e.is_empty()) {
        if !looks_like_email(email) {
            return ApiResponse::bad_request("Invalid email format").into_http();
        }
    }

    ApiResponse::from_result(
        svc.update_user(token.as_str(), path.into_inner(), req).await,
        "User updated",
    )
    .into_http()
}

/// DELETE /admin/users/{id}
#[delete("/users/{id}")]
pub async fn delete_user(
    token: BearerToken,
    svc: web::Data<AdminService>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    ApiResponse::from_result(svc.delete_user(token.as_str(), path.into_inner()).await, "User deleted")
        .into_http()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .app_data(super::json_config())
            .app_data(super::path_config())
            .service(register_gym)
            .service(register_franchise)
            .service(register_makanan)
            .service(generate_gym_token)
            .service(get_gym_codes)
            .service(register_user)
            .service(get_all_users)
            .service(get_user_by_id)
            .service(update_user)
            .service(delete_user),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dtos::auth_dtos::LoginIn;
    use crate::models::user::{ROLE_ADMIN, ROLE_USER};
    use crate::repositories::Stores;
    use crate::services::testing::{codec, seed, stores};
    use crate::services::{AuthService, Authenticator};
    use crate::storage::memory::MemoryPhotoStore;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn data(stores: &Stores) -> web::Data<AdminService> {
        let auth = Authenticator::new(codec(), stores.users.clone());
        web::Data::new(AdminService::new(auth, stores.clone(), Arc::new(MemoryPhotoStore::default())))
    }

    #[actix_web::test]
    async fn missing_bearer_gets_401_envelope() {
        let stores = stores();
        let app = test::init_service(App::new().app_data(data(&stores)).configure(routes)).await;

        let req = test::TestRequest::get().uri("/admin/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"statusCode": 401, "messages": "Unauthorized", "data": null}));
    }

    #[actix_web::test]
    async fn regular_user_cannot_create_users() {
        let stores = stores();
        let (_, token) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        let app = test::init_service(App::new().app_data(data(&stores)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/admin/users")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({"email": "new@kalorize.id", "fullName": "New", "password": "pw123456"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        assert!(stores.users.get_by_email("new@kalorize.id").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn admin_creates_user_with_base64_photo() {
        let stores = stores();
        let (_, token) = seed(&stores, "root@kalorize.id", ROLE_ADMIN).await;
        let app = test::init_service(App::new().app_data(data(&stores)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/admin/users")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "email": "Dewi@Kalorize.id",
                "fullName": "Dewi",
                "password": "pw123456",
                "photo": {"fileName": "dewi.png", "imageData": "data:image/png;base64,AQID", "alias": "dewi"}
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["data"]["role"], "user");
        assert_eq!(body["data"]["photo"], "dewi.png");
        assert!(stores.users.get_by_email("dewi@kalorize.id").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn unknown_user_is_404() {
        let stores = stores();
        let (_, token) = seed(&stores, "root@kalorize.id", ROLE_ADMIN).await;
        let app = test::init_service(App::new().app_data(data(&stores)).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/admin/users/{}", Uuid::new_v4()))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["messages"], "User not found");
    }

    #[actix_web::test]
    async fn updated_email_is_stored_lowercase_and_can_log_in() {
        let stores = stores();
        let (_, token) = seed(&stores, "root@kalorize.id", ROLE_ADMIN).await;
        let (member, _) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        let app = test::init_service(App::new().app_data(data(&stores)).configure(routes)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/admin/users/{}", member.id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({"email": " Budi.New@Kalorize.id "}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["data"]["email"], "budi.new@kalorize.id");

        let auth = AuthService::new(codec(), stores.clone());
        let login = LoginIn { email: "budi.new@kalorize.id".into(), password: "password1".into() };
        assert_eq!(auth.login(login).await.unwrap().user.id, member.id);
    }

    #[actix_web::test]
    async fn non_uuid_id_gets_400_envelope() {
        let stores = stores();
        let (_, token) = seed(&stores, "root@kalorize.id", ROLE_ADMIN).await;
        let app = test::init_service(App::new().app_data(data(&stores)).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/admin/users/not-a-uuid")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["statusCode"], 400);
        assert!(body["data"].is_null());
    }
}
