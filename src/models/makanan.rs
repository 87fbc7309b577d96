use serde::{Deserialize, Serialize};

/// Food item. List-valued columns are stored flattened, see `utils::food`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Makanan {
    pub id: String,
    pub name: String,
    pub jenis: String,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: String,
    pub cooking_steps: String,
    pub franchises: String,
}
