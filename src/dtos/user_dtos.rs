use serde::{Deserialize, Serialize};

use crate::utils::food::MakananView;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryRequest {
    #[serde(default)]
    pub breakfast_id: Vec<String>,
    #[serde(default)]
    pub lunch_id: Vec<String>,
    #[serde(default)]
    pub dinner_id: Vec<String>,
    pub total_calories: i32,
    pub total_protein: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOut {
    pub breakfast: Vec<MakananView>,
    pub lunch: Vec<MakananView>,
    pub dinner: Vec<MakananView>,
    pub total_calories: i32,
    pub total_protein: i32,
}

/// Self-service profile edit. Empty strings count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub password_confirmation: String,
}
