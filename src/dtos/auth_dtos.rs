use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterIn {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub password_confirmation: String,
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
}

#[derive(Debug, Deserialize)]
pub struct LoginIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshIn {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenOut {
    pub access_token: String,
    pub token_type: String,
}
