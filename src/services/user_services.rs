// src/services/user_services.rs - self-service operations for a signed-in user
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::info;
use uuid::Uuid;

use super::{Authenticator, Saved, ServiceError};
use crate::dtos::user_dtos::{CreateHistoryRequest, EditUserRequest, HistoryOut};
use crate::models::{History, User};
use crate::repositories::Stores;
use crate::storage::{PhotoStore, PhotoUpload};
use crate::utils::food::{self, MakananView, ID_SEPARATOR};
use crate::utils::password::{hash_password, verify_password};

pub fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

#[derive(Clone)]
pub struct UserService {
    auth: Authenticator,
    stores: Stores,
    photos: Arc<dyn PhotoStore>,
}

impl UserService {
    pub fn new(auth: Authenticator, stores: Stores, photos: Arc<dyn PhotoStore>) -> Self {
        Self { auth, stores, photos }
    }

    /// Insert-or-update keyed on (user, today).
    pub async fn create_history(
        &self,
        token: &str,
        req: CreateHistoryRequest,
    ) -> Result<Saved<History>, ServiceError> {
        let user = self.auth.user_by_email(token).await?;
        self.upsert_history(&user, req, Local::now().date_naive()).await
    }

    async fn upsert_history(
        &self,
        user: &User,
        req: CreateHistoryRequest,
        day: NaiveDate,
    ) -> Result<Saved<History>, ServiceError> {
        let day = midnight(day);
        let breakfast_ids = food::flatten(&req.breakfast_id, ID_SEPARATOR);
        let lunch_ids = food::flatten(&req.lunch_id, ID_SEPARATOR);
        let dinner_ids = food::flatten(&req.dinner_id, ID_SEPARATOR);

        let existing = self
            .stores
            .histories
            .get_by_user_and_date(user.id, day)
            .await
            .map_err(ServiceError::persist("Failed to check existing history"))?;

        match existing {
            Some(mut history) => {
                history.breakfast_ids = breakfast_ids;
                history.lunch_ids = lunch_ids;
                history.dinner_ids = dinner_ids;
                history.total_calories = req.total_calories;
                history.total_protein = req.total_protein;
                self.stores
                    .histories
                    .update(&history)
                    .await
                    .map_err(ServiceError::persist("Failed to update history"))?;
                Ok(Saved { record: history, created: false })
            }
            None => {
                let history = History {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    breakfast_ids,
                    lunch_ids,
                    dinner_ids,
                    total_calories: req.total_calories,
                    total_protein: req.total_protein,
                    created_at: day,
                };
                self.stores
                    .histories
                    .create(&history)
                    .await
                    .map_err(ServiceError::persist("Failed to create history"))?;
                info!("created history {} for user {}", history.id, user.id);
                Ok(Saved { record: history, created: true })
            }
        }
    }

    pub async fn get_history(&self, token: &str, date: NaiveDate) -> Result<HistoryOut, ServiceError> {
        let user = self.auth.user_by_email(token).await?;

        let history = self
            .stores
            .histories
            .get_by_user_and_date(user.id, midnight(date))
            .await
            .map_err(ServiceError::persist("Failed to get history"))?
            .ok_or(ServiceError::NotFound("History"))?;

        Ok(HistoryOut {
            breakfast: self.resolve_meal(&history.breakfast_ids, "Breakfast").await?,
            lunch: self.resolve_meal(&history.lunch_ids, "Lunch").await?,
            dinner: self.resolve_meal(&history.dinner_ids, "Dinner").await?,
            total_calories: history.total_calories,
            total_protein: history.total_protein,
        })
    }

    async fn resolve_meal(&self, ids: &str, meal: &'static str) -> Result<Vec<MakananView>, ServiceError> {
        let mut out = Vec::new();
        for id in food::unflatten(ids, ID_SEPARATOR) {
            let makanan = self
                .stores
                .makanan
                .get_by_id(&id)
                .await
                .map_err(ServiceError::persist("Failed to get makanan"))?
                .ok_or(ServiceError::NotFound(meal))?;
            out.push(MakananView::from(makanan));
        }
        Ok(out)
    }

    /// Resolves the caller by the user id embedded in the token.
    pub async fn edit_user(&self, token: &str, req: EditUserRequest) -> Result<User, ServiceError> {
        let mut user = self.auth.user_by_id(token).await?;

        assign_if_present(&mut user.full_name, req.full_name);
        assign_if_present(&mut user.email, req.email);
        assign_if_present(&mut user.phone, req.phone);

        self.stores
            .users
            .update(&user)
            .await
            .map_err(ServiceError::persist("Failed to edit user"))?;
        Ok(user)
    }

    pub async fn edit_password(
        &self,
        token: &str,
        new_password: &str,
        old_password: &str,
    ) -> Result<User, ServiceError> {
        let mut user = self.auth.user_by_email(token).await?;

        if !verify_password(old_password, &user.password) {
            return Err(ServiceError::WrongPassword);
        }

        user.password = hash_password(new_password)?;
        self.stores
            .users
            .update(&user)
            .await
            .map_err(ServiceError::persist("Failed to edit user"))?;
        Ok(user)
    }

    pub async fn edit_photo(&self, token: &str, photo: PhotoUpload) -> Result<User, ServiceError> {
        let mut user = self.auth.user_by_email(token).await?;

        let name = photo.target_name();
        let content_type = photo.mime_type();
        let url = self.photos.upload(&name, &content_type, photo.bytes).await?;

        user.photo = name;
        user.photo_url = url;
        self.stores
            .users
            .update(&user)
            .await
            .map_err(ServiceError::persist("Failed to edit user"))?;
        Ok(user)
    }
}

fn assign_if_present(target: &mut String, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        *target = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::ROLE_USER;
    use crate::models::Makanan;
    use crate::services::testing::{codec, seed, stores};
    use crate::storage::memory::MemoryPhotoStore;

    fn service(stores: &Stores) -> UserService {
        let auth = Authenticator::new(codec(), stores.users.clone());
        UserService::new(auth, stores.clone(), Arc::new(MemoryPhotoStore::default()))
    }

    fn history_req(breakfast: &[&str], calories: i32) -> CreateHistoryRequest {
        CreateHistoryRequest {
            breakfast_id: breakfast.iter().map(|s| s.to_string()).collect(),
            lunch_id: vec!["m2".into()],
            dinner_id: vec!["m3".into()],
            total_calories: calories,
            total_protein: 40,
        }
    }

    async fn seed_food(stores: &Stores, id: &str, name: &str) {
        stores
            .makanan
            .create(&Makanan {
                id: id.into(),
                name: name.into(),
                jenis: String::new(),
                calories: 100,
                protein: 5,
                ingredients: "a, b".into(),
                cooking_steps: "step one., step two".into(),
                franchises: String::new(),
            })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn second_submission_same_day_overwrites() {
        let stores = stores();
        let (user, token) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        let svc = service(&stores);

        let first = svc.create_history(&token, history_req(&["m1"], 1200)).await.unwrap();
        assert!(first.created);
        let second = svc.create_history(&token, history_req(&["m4", "m5"], 1500)).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.record.id, first.record.id);

        let all = stores.histories.get_by_user(user.id).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].total_calories, 1500);
        assert_eq!(all[0].breakfast_ids, "m4,m5");
        assert_eq!(all[0].created_at.time(), NaiveTime::MIN);
    }

    #[actix_web::test]
    async fn different_days_get_separate_records() {
        let stores = stores();
        let (user, _) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        let svc = service(&stores);
        let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();

        svc.upsert_history(&user, history_req(&["m1"], 1000), monday).await.unwrap();
        svc.upsert_history(&user, history_req(&["m1"], 1100), monday.succ_opt().unwrap())
            .await
            .unwrap();
        assert_eq!(stores.histories.get_by_user(user.id).await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn history_read_model_resolves_food() {
        let stores = stores();
        let (user, token) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        for (id, name) in [("m1", "Oatmeal"), ("m2", "Gado-gado"), ("m3", "Sup Ayam")] {
            seed_food(&stores, id, name).await;
        }
        let svc = service(&stores);
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        svc.upsert_history(&user, history_req(&["m1"], 900), day).await.unwrap();

        let out = svc.get_history(&token, day).await.unwrap();
        assert_eq!(out.breakfast[0].name, "Oatmeal");
        assert_eq!(out.lunch[0].name, "Gado-gado");
        assert_eq!(out.dinner[0].cooking_steps, vec!["step one", "step two"]);
        assert_eq!(out.total_calories, 900);
    }

    #[actix_web::test]
    async fn history_with_missing_food_is_not_found() {
        let stores = stores();
        let (user, token) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        seed_food(&stores, "m1", "Oatmeal").await;
        let svc = service(&stores);
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        svc.upsert_history(&user, history_req(&["m1"], 900), day).await.unwrap();

        let err = svc.get_history(&token, day).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Lunch")));

        let other_day = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        assert!(matches!(
            svc.get_history(&token, other_day).await,
            Err(ServiceError::NotFound("History"))
        ));
    }

    #[actix_web::test]
    async fn wrong_old_password_leaves_hash_unchanged() {
        let stores = stores();
        let (user, token) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        let svc = service(&stores);

        let err = svc.edit_password(&token, "newpass1", "not-my-password").await.unwrap_err();
        assert!(matches!(err, ServiceError::WrongPassword));
        let stored = stores.users.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.password, user.password);

        svc.edit_password(&token, "newpass1", "password1").await.unwrap();
        let stored = stores.users.get_by_id(user.id).await.unwrap().unwrap();
        assert!(verify_password("newpass1", &stored.password));
    }

    #[actix_web::test]
    async fn edit_user_skips_empty_fields() {
        let stores = stores();
        let (user, token) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        let svc = service(&stores);

        let req = EditUserRequest {
            full_name: Some("Budi S.".into()),
            email: Some(String::new()),
            phone: None,
        };
        let edited = svc.edit_user(&token, req).await.unwrap();
        assert_eq!(edited.full_name, "Budi S.");
        assert_eq!(edited.email, user.email);
        assert_eq!(edited.phone, user.phone);
    }

    #[actix_web::test]
    async fn edit_photo_uses_alias_name() {
        let stores = stores();
        let (user, token) = seed(&stores, "budi@kalorize.id", ROLE_USER).await;
        let svc = service(&stores);

        let photo = PhotoUpload {
            alias: Some(format!("user-{}", user.id)),
            file_name: "selfie.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![9, 9],
        };
        let edited = svc.edit_photo(&token, photo).await.unwrap();
        assert_eq!(edited.photo, format!("user-{}.png", user.id));
        assert!(edited.photo_url.ends_with(&edited.photo));
        let stored = stores.users.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.photo_url, edited.photo_url);
    }

    #[actix_web::test]
    async fn bad_token_is_unauthorized() {
        let stores = stores();
        let svc = service(&stores);
        assert!(matches!(
            svc.create_history("nope", history_req(&["m1"], 1)).await,
            Err(ServiceError::Unauthorized)
        ));
        assert!(stores.histories.get_by_user(Uuid::nil()).await.unwrap().is_empty());
    }
}
