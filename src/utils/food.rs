// src/utils/food.rs - flattening helpers and display formatting for makanan
use serde::Serialize;
use uuid::Uuid;

use crate::models::Makanan;

pub const LIST_SEPARATOR: &str = ", ";
pub const STEP_SEPARATOR: &str = "., ";
pub const ID_SEPARATOR: &str = ",";

pub fn flatten(items: &[String], separator: &str) -> String {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn unflatten(value: &str, separator: &str) -> Vec<String> {
    value
        .split(separator)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Food ids are uuids in simple form; the old random three digit ids collided.
pub fn generate_makanan_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// `<up to 3 letters of the gym name><6 hex chars>`, uppercase.
pub fn generate_kode_gym(gym_name: &str) -> String {
    let prefix: String = gym_name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect();
    let suffix = &Uuid::new_v4().simple().to_string()[..6];
    format!("{}{}", prefix, suffix).to_uppercase()
}

pub fn generate_referral_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// Read model returned to clients: list columns split back into arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakananView {
    pub id: String,
    pub name: String,
    pub jenis: String,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: Vec<String>,
    pub cooking_steps: Vec<String>,
    pub franchises: Vec<String>,
}

impl From<Makanan> for MakananView {
    fn from(m: Makanan) -> Self {
        Self {
            ingredients: unflatten(&m.ingredients, LIST_SEPARATOR),
            cooking_steps: unflatten(&m.cooking_steps, STEP_SEPARATOR),
            franchises: unflatten(&m.franchises, LIST_SEPARATOR),
            id: m.id,
            name: m.name,
            jenis: m.jenis,
            calories: m.calories,
            protein: m.protein,
        }
    }
}
