// src/services/guard.rs - bearer token -> caller
use std::sync::Arc;

use log::warn;

use super::ServiceError;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::jwt::TokenCodec;

/// Resolves the caller behind a bearer token. Every admin operation starts
/// with `require_admin`.
#[derive(Clone)]
pub struct Authenticator {
    codec: TokenCodec,
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    pub fn new(codec: TokenCodec, users: Arc<dyn UserRepository>) -> Self {
        Self { codec, users }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Fails `Unauthorized` on a bad token, a missing user, or a non-admin role.
    pub async fn require_admin(&self, token: &str) -> Result<User, ServiceError> {
        let email = self.codec.parse_email(token).map_err(|_| ServiceError::Unauthorized)?;
        match self.users.get_by_email(&email).await {
            Ok(Some(user)) if user.is_admin() => Ok(user),
            Ok(Some(user)) => {
                warn!("user {} is not an admin", user.id);
                Err(ServiceError::Unauthorized)
            }
            Ok(None) => Err(ServiceError::Unauthorized),
            Err(e) => {
                warn!("admin lookup failed for {}: {}", email, e);
                Err(ServiceError::Unauthorized)
            }
        }
    }

    pub async fn user_by_email(&self, token: &str) -> Result<User, ServiceError> {
        let email = self.codec.parse_email(token).map_err(|_| ServiceError::Unauthorized)?;
        self.users
            .get_by_email(&email)
            .await
            .map_err(ServiceError::persist("Failed to get user"))?
            .ok_or(ServiceError::Unauthorized)
    }

    pub async fn user_by_id(&self, token: &str) -> Result<User, ServiceError> {
        let id = self.codec.parse_user_id(token).map_err(|_| ServiceError::Unauthorized)?;
        self.users
            .get_by_id(id)
            .await
            .map_err(ServiceError::persist("Failed to get user"))?
            .ok_or(ServiceError::Unauthorized)
    }
}
