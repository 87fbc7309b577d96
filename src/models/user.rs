use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Row `users`. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: String,
    pub phone: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub gender: String,
    pub gym_frequency: i32,
    pub calorie_target: i32,
    pub photo: String,
    pub photo_url: String,
    pub referral_code: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
