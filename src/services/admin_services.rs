// src/services/admin_services.rs
use std::sync::Arc;

use chrono::Local;
use log::info;
use uuid::Uuid;

use super::{unique_referral_code, Authenticator, ServiceError};
use crate::dtos::admin_dtos::{
    KodeGymOut, RegisterFranchiseRequest, RegisterGymRequest, RegisterMakananRequest,
    RegisterUserRequest, UpdateUserRequest,
};
use crate::models::user::ROLE_USER;
use crate::models::{Franchise, Gym, KodeGym, Makanan, User};
use crate::repositories::{RepoError, Stores};
use crate::storage::{PhotoStore, PhotoUpload};
use crate::utils::food::{self, LIST_SEPARATOR, STEP_SEPARATOR};
use crate::utils::password::hash_password;

/// Lower and upper bound (exclusive) for `gymFrequency` and `calorieTarget`.
const BOUNDED_RANGE: (i32, i32) = (-1, 4);

#[derive(Clone)]
pub struct AdminService {
    auth: Authenticator,
    stores: Stores,
    photos: Arc<dyn PhotoStore>,
}

impl AdminService {
    pub fn new(auth: Authenticator, stores: Stores, photos: Arc<dyn PhotoStore>) -> Self {
        Self { auth, stores, photos }
    }

    async fn upload(&self, photo: PhotoUpload) -> Result<(String, String), ServiceError> {
        let name = photo.target_name();
        let content_type = photo.mime_type();
        let url = self.photos.upload(&name, &content_type, photo.bytes).await?;
        Ok((name, url))
    }

    pub async fn register_gym(
        &self,
        token: &str,
        req: RegisterGymRequest,
        photo: PhotoUpload,
    ) -> Result<Gym, ServiceError> {
        let admin = self.auth.require_admin(token).await?;

        let (photo, photo_url) = self.upload(photo).await?;
        let gym = Gym {
            id: Uuid::new_v4(),
            name: req.name,
            address: req.address,
            latitude: req.latitude,
            longitude: req.longitude,
            link_google: req.link_google,
            photo,
            photo_url,
        };
        self.stores
            .gyms
            .create(&gym)
            .await
            .map_err(ServiceError::persist("Failed to create gym"))?;

        info!("admin {} registered gym {}", admin.id, gym.id);
        Ok(gym)
    }

    pub async fn register_franchise(
        &self,
        token: &str,
        req: RegisterFranchiseRequest,
    ) -> Result<Franchise, ServiceError> {
        self.auth.require_admin(token).await?;

        let franchise = Franchise {
            id: Uuid::new_v4(),
            password: hash_password(&req.password)?,
            name: req.name,
            email: req.email,
            latitude: req.latitude,
            longitude: req.longitude,
            location: req.location,
            photo: req.photo,
            phone: req.phone,
        };
        self.stores
            .franchises
            .create(&franchise)
            .await
            .map_err(ServiceError::persist("Failed to create franchise"))?;
        Ok(franchise)
    }

    pub async fn register_makanan(
        &self,
        token: &str,
        req: RegisterMakananRequest,
    ) -> Result<Makanan, ServiceError> {
        self.auth.require_admin(token).await?;

        let makanan = Makanan {
            id: food::generate_makanan_id(),
            name: req.name,
            jenis: req.jenis,
            calories: req.calories,
            protein: req.protein,
            ingredients: food::flatten(&req.ingredients, LIST_SEPARATOR),
            cooking_steps: food::flatten(&req.cooking_steps, STEP_SEPARATOR),
            franchises: food::flatten(&req.franchises, LIST_SEPARATOR),
        };
        self.stores
            .makanan
            .create(&makanan)
            .await
            .map_err(ServiceError::persist("Failed to create makanan"))?;
        Ok(makanan)
    }

    /// Issues and stores a 7-day access code for the gym.
    pub async fn generate_gym_token(&self, token: &str, gym_id: Uuid) -> Result<KodeGym, ServiceError> {
        self.auth.require_admin(token).await?;

        let gym = self
            .stores
            .gyms
            .get_by_id(gym_id)
            .await
            .map_err(ServiceError::persist("Failed to get gym"))?
            .ok_or(ServiceError::NotFound("Gym"))?;

        let kode = KodeGym::issue(
            gym.id,
            food::generate_kode_gym(&gym.name),
            Local::now().naive_local(),
        );
        self.stores
            .kode_gyms
            .create(&kode)
            .await
            .map_err(ServiceError::persist("Failed to save gym code"))?;
        Ok(kode)
    }

    pub async fn get_gym_codes(&self, token: &str, gym_id: Uuid) -> Result<Vec<KodeGymOut>, ServiceError> {
        self.auth.require_admin(token).await?;

        if self
            .stores
            .gyms
            .get_by_id(gym_id)
            .await
            .map_err(ServiceError::persist("Failed to get gym"))?
            .is_none()
        {
            return Err(ServiceError::NotFound("Gym"));
        }

        let now = Local::now().naive_local();
        let codes = self
            .stores
            .kode_gyms
            .get_by_gym(gym_id)
            .await
            .map_err(ServiceError::persist("Failed to get gym codes"))?;
        Ok(codes
            .into_iter()
            .map(|k| KodeGymOut {
                valid: k.is_valid_at(now),
                id: k.id,
                code: k.code,
                gym_id: k.gym_id,
                expired_at: k.expired_at,
            })
            .collect())
    }

    pub async fn register_user(
        &self,
        token: &str,
        req: RegisterUserRequest,
        photo: Option<PhotoUpload>,
    ) -> Result<User, ServiceError> {
        self.auth.require_admin(token).await?;

        if self
            .stores
            .users
            .get_by_email(&req.email)
            .await
            .map_err(ServiceError::persist("Failed to create user"))?
            .is_some()
        {
            return Err(ServiceError::Validation("Email already registered".into()));
        }

        let password = hash_password(&req.password)?;
        let referral_code =
            unique_referral_code(self.stores.users.as_ref(), food::generate_referral_code).await?;
        let (photo, photo_url) = match photo {
            Some(p) => self.upload(p).await?,
            None => (String::new(), String::new()),
        };

        let user = User {
            id: Uuid::new_v4(),
            email: req.email,
            full_name: req.full_name,
            password,
            role: if req.role.trim().is_empty() { ROLE_USER.to_string() } else { req.role },
            phone: req.phone,
            age: req.age,
            weight: req.weight,
            height: req.height,
            gender: req.gender,
            gym_frequency: req.gym_frequency,
            calorie_target: req.calorie_target,
            photo,
            photo_url,
            referral_code,
        };
        self.stores
            .users
            .create(&user)
            .await
            .map_err(ServiceError::persist("Failed to create user"))?;
        Ok(user)
    }

    pub async fn get_all_users(&self, token: &str) -> Result<Vec<User>, ServiceError> {
        self.auth.require_admin(token).await?;
        self.stores
            .users
            .get_all()
            .await
            .map_err(ServiceError::persist("Failed to get all user"))
    }

    pub async fn get_user_by_id(&self, token: &str, id: Uuid) -> Result<User, ServiceError> {
        self.auth.require_admin(token).await?;
        self.stores
            .users
            .get_by_id(id)
            .await
            .map_err(ServiceError::persist("Failed to get user"))?
            .ok_or(ServiceError::NotFound("User"))
    }

    /// Partial update: empty strings and zero numbers are ignored, and the
    /// bounded fields outside `(-1, 4)` are dropped without error.
    pub async fn update_user(
        &self,
        token: &str,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<User, ServiceError> {
        self.auth.require_admin(token).await?;

        let mut user = self
            .stores
            .users
            .get_by_id(id)
            .await
            .map_err(ServiceError::persist("Failed to get user"))?
            .ok_or(ServiceError::NotFound("User"))?;

        let hashed = match req.password.as_deref().filter(|p| !p.is_empty()) {
            Some(p) => Some(hash_password(p)?),
            None => None,
        };
        apply_update(&mut user, req, hashed);

        self.stores
            .users
            .update(&user)
            .await
            .map_err(ServiceError::persist("Failed to update user"))?;
        Ok(user)
    }

    pub async fn delete_user(&self, token: &str, id: Uuid) -> Result<(), ServiceError> {
        self.auth.require_admin(token).await?;
        match self.stores.users.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(ServiceError::NotFound("User")),
            Err(e) => Err(ServiceError::persist("Failed to delete user")(e)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn in_bounds(value: i32) -> bool {
    value > BOUNDED_RANGE.0 && value < BOUNDED_RANGE.1
}

fn apply_update(user: &mut User, req: UpdateUserRequest, hashed_password: Option<String>) {
    if let Some(v) = non_empty(req.email) {
        user.email = v;
    }
    if let Some(v) = non_empty(req.full_name) {
        user.full_name = v;
    }
    if let Some(v) = req.age.filter(|v| *v != 0) {
        user.age = v;
    }
    if let Some(v) = req.weight.filter(|v| *v != 0.0) {
        user.weight = v;
    }
    if let Some(v) = req.height.filter(|v| *v != 0.0) {
        user.height = v;
    }
    if let Some(v) = req.gym_frequency.filter(|v| in_bounds(*v)) {
        user.gym_frequency = v;
    }
    if let Some(v) = req.calorie_target.filter(|v| in_bounds(*v)) {
        user.calorie_target = v;
    }
    if let Some(v) = non_empty(req.phone) {
        user.phone = v;
    }
    if let Some(v) = non_empty(req.role) {
        user.role = v;
    }
    if let Some(hash) = hashed_password {
        user.password = hash;
    }
}
