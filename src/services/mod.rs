pub mod guard;
pub mod admin_services;
pub mod user_services;
pub mod auth_services;
pub mod makanan_services;

use thiserror::Error;

use crate::repositories::{RepoError, UserRepository};
use crate::storage::StorageError;
use crate::utils::jwt::TokenError;
use crate::utils::password::HashError;

pub use admin_services::AdminService;
pub use auth_services::AuthService;
pub use guard::Authenticator;
pub use makanan_services::MakananService;
pub use user_services::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("upload failed: {0}")]
    Upload(#[from] StorageError),
    #[error("{context}: {source}")]
    Persist {
        context: &'static str,
        source: RepoError,
    },
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error("token signing failed: {0}")]
    Token(#[from] TokenError),
    #[error("old password does not match")]
    WrongPassword,
}

impl ServiceError {
    pub fn persist(context: &'static str) -> impl FnOnce(RepoError) -> ServiceError {
        move |source| ServiceError::Persist { context, source }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Unauthorized | ServiceError::InvalidCredentials => 401,
            ServiceError::NotFound(_) => 404,
            ServiceError::Validation(_) | ServiceError::WrongPassword => 400,
            ServiceError::Upload(_) | ServiceError::Persist { .. }
            | ServiceError::Hash(_)
            | ServiceError::Token(_) => 500,
        }
    }

    /// Message safe to put in the envelope; causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "Unauthorized".to_string(),
            ServiceError::InvalidCredentials => "Invalid email or password".to_string(),
            ServiceError::NotFound(what) => format!("{} not found", what),
            ServiceError::Validation(msg) => msg.clone(),
            ServiceError::Upload(_) => "Failed to upload photo".to_string(),
            ServiceError::Persist { context, .. } => context.to_string(),
            ServiceError::Hash(_) => "Password hashing failed".to_string(),
            ServiceError::Token(_) => "Failed to issue token".to_string(),
            ServiceError::WrongPassword => "Old password is wrong".to_string(),
        }
    }
}

/// Result of an insert-or-update.
#[derive(Debug)]
pub struct Saved<T> {
    pub record: T,
    pub created: bool,
}

const REFERRAL_ATTEMPTS: usize = 5;

/// Draws codes from `generate` until one is not held by any user.
pub(crate) async fn unique_referral_code(
    users: &dyn UserRepository,
    mut generate: impl FnMut() -> String,
) -> Result<String, ServiceError> {
    for _ in 0..REFERRAL_ATTEMPTS {
        let code = generate();
        let taken = users
            .get_by_referral_code(&code)
            .await
            .map_err(ServiceError::persist("Failed to allocate referral code"))?;
        if taken.is_none() {
            return Ok(code);
        }
    }
    Err(ServiceError::Validation("Could not allocate a referral code".into()))
}
