// src/dtos/admin_dtos.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text fields of the multipart gym registration form.
#[derive(Debug, Default, Clone)]
pub struct RegisterGymRequest {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub link_google: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFranchiseRequest {
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location: String,
    #[serde(default)]
    pub photo: String,
    pub password: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMakananRequest {
    pub name: String,
    #[serde(default)]
    pub jenis: String,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: Vec<String>,
    pub cooking_steps: Vec<String>,
    #[serde(default)]
    pub franchises: Vec<String>,
}

/// Base64 photo embedded in a JSON body, optionally as a `data:` URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Photo {
    pub file_name: String,
    pub image_data: String,
    pub content_type: Option<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub gym_frequency: i32,
    #[serde(default)]
    pub calorie_target: i32,
    pub photo: Option<Base64Photo>,
}

/// Partial update. Absent fields are left alone; see `AdminService::update_user`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gym_frequency: Option<i32>,
    pub calorie_target: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KodeGymOut {
    pub id: Uuid,
    pub code: String,
    pub gym_id: Uuid,
    pub expired_at: NaiveDateTime,
    pub valid: bool,
}
