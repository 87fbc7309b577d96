use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One record per (user, calendar day). Meal columns hold comma-joined food ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub id: Uuid,
    pub user_id: Uuid,
    pub breakfast_ids: String,
    pub lunch_ids: String,
    pub dinner_ids: String,
    pub total_calories: i32,
    pub total_protein: i32,
    pub created_at: NaiveDateTime,
}
