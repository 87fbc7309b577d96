use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location: String,
    pub photo: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub phone: String,
}
