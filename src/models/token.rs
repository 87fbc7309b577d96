use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted refresh token issued at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: Uuid,
    pub user_id: Uuid,
    pub refresh_token: String,
    pub created_at: NaiveDateTime,
}
