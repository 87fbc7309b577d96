use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long an issued gym access code stays usable.
pub const KODE_GYM_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KodeGym {
    pub id: Uuid,
    pub code: String,
    pub gym_id: Uuid,
    pub expired_at: NaiveDateTime,
}

impl KodeGym {
    pub fn issue(gym_id: Uuid, code: String, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            gym_id,
            expired_at: now + Duration::days(KODE_GYM_TTL_DAYS),
        }
    }

    /// Expired codes stay in the table; callers check this instead.
    pub fn is_valid_at(&self, now: NaiveDateTime) -> bool {
        now < self.expired_at
    }
}
