use actix_web::{get, web, Responder};

use crate::dtos::ApiResponse;
use crate::services::MakananService;

/// GET /makanan
#[get("")]
pub async fn list_makanan(svc: web::Data<MakananService>) -> impl Responder {
    ApiResponse::from_result(svc.list().await, "Success").into_http()
}

/// GET /makanan/{id}
#[get("/{id}")]
pub async fn get_makanan(svc: web::Data<MakananService>, path: web::Path<String>) -> impl Responder {
    ApiResponse::from_result(svc.get(path.as_str()).await, "Success").into_http()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/makanan")
            .app_data(super::json_config())
            .app_data(super::path_config())
            .service(list_makanan)
            .service(get_makanan),
    );
}
