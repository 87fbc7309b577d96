// src/services/auth_services.rs - register / login / refresh / logout
use chrono::Local;
use log::{info, warn};
use uuid::Uuid;

use super::{unique_referral_code, ServiceError};
use crate::dtos::auth_dtos::{AccessTokenOut, LoginIn, RegisterIn, SessionOut};
use crate::models::user::ROLE_USER;
use crate::models::{Token, User};
use crate::repositories::Stores;
use crate::utils::food::generate_referral_code;
use crate::utils::jwt::TokenCodec;
use crate::utils::password::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    codec: TokenCodec,
    stores: Stores,
}

impl AuthService {
    pub fn new(codec: TokenCodec, stores: Stores) -> Self {
        Self { codec, stores }
    }

    pub async fn register(&self, input: RegisterIn) -> Result<User, ServiceError> {
        let existing = self
            .stores
            .users
            .get_by_email(&input.email)
            .await
            .map_err(ServiceError::persist("Failed to register user"))?;
        if existing.is_some() {
            return Err(ServiceError::Validation("Email already registered".into()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            full_name: input.full_name,
            password: hash_password(&input.password)?,
            role: ROLE_USER.to_string(),
            phone: input.phone,
            age: input.age,
            weight: input.weight,
            height: input.height,
            gender: input.gender,
            gym_frequency: input.gym_frequency,
            calorie_target: input.calorie_target,
            photo: String::new(),
            photo_url: String::new(),
            referral_code: unique_referral_code(self.stores.users.as_ref(), generate_referral_code).await?,
        };

        self.stores
            .users
            .create(&user)
            .await
            .map_err(ServiceError::persist("Failed to register user"))?;
        info!("registered user {}", user.id);
        Ok(user)
    }

    pub async fn login(&self, input: LoginIn) -> Result<SessionOut, ServiceError> {
        let user = self
            .stores
            .users
            .get_by_email(&input.email)
            .await
            .map_err(ServiceError::persist("Failed to login"))?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password) {
            warn!("bad password for {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let access_token = self.codec.issue_access(user.id, &user.full_name, &user.email)?;
        let refresh_token = self.codec.issue_refresh(user.id, &user.full_name, &user.email)?;

        let row = Token {
            id: Uuid::new_v4(),
            user_id: user.id,
            refresh_token: refresh_token.clone(),
            created_at: Local::now().naive_local(),
        };
        self.stores
            .tokens
            .create(&row)
            .await
            .map_err(ServiceError::persist("Failed to login"))?;

        Ok(SessionOut {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            user,
        })
    }

    /// The refresh token must verify and still be on file.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessTokenOut, ServiceError> {
        let claims = self.codec.verify(refresh_token).map_err(|_| ServiceError::Unauthorized)?;
        self.stored(refresh_token).await?;

        let id = Uuid::parse_str(&claims.id_user).map_err(|_| ServiceError::Unauthorized)?;
        let access_token = self.codec.issue_access(id, &claims.fullname, &claims.email)?;
        Ok(AccessTokenOut { access_token, token_type: "Bearer".to_string() })
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<(), ServiceError> {
        let row = self.stored(refresh_token).await?;
        self.stores
            .tokens
            .delete(row.id)
            .await
            .map_err(ServiceError::persist("Failed to logout"))
    }

    async fn stored(&self, refresh_token: &str) -> Result<Token, ServiceError> {
        self.stores
            .tokens
            .get_by_refresh_token(refresh_token)
            .await
            .map_err(ServiceError::persist("Failed to get token"))?
            .ok_or(ServiceError::Unauthorized)
    }
}
