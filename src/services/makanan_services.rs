// src/services/makanan_services.rs - public food catalog reads
use super::ServiceError;
use crate::repositories::Stores;
use crate::utils::food::MakananView;

#[derive(Clone)]
pub struct MakananService {
    stores: Stores,
}

impl MakananService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn list(&self) -> Result<Vec<MakananView>, ServiceError> {
        let mut items = self
            .stores
            .makanan
            .get_all()
            .await
            .map_err(ServiceError::persist("Failed to get makanan"))?;
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items.into_iter().map(MakananView::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<MakananView, ServiceError> {
        self.stores
            .makanan
            .get_by_id(id)
            .await
            .map_err(ServiceError::persist("Failed to get makanan"))?
            .map(MakananView::from)
            .ok_or(ServiceError::NotFound("Makanan"))
    }
}
