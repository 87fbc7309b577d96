// src/utils/jwt.rs - signed bearer tokens carrying user identity
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const ACCESS_TOKEN_TTL_HOURS: i64 = 1;
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,
    #[error("failed to sign token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Claim names are kept compatible with tokens issued by the older API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "IdUser")]
    pub id_user: String,
    #[serde(rename = "Fullname")]
    pub fullname: String,
    #[serde(rename = "Email")]
    pub email: String,
    pub exp: i64,
}

/// HS256 codec around a single shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
}

impl TokenCodec {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    pub fn issue_access(&self, id: Uuid, fullname: &str, email: &str) -> Result<String, TokenError> {
        self.issue(id, fullname, email, Duration::hours(ACCESS_TOKEN_TTL_HOURS))
    }

    pub fn issue_refresh(&self, id: Uuid, fullname: &str, email: &str) -> Result<String, TokenError> {
        self.issue(id, fullname, email, Duration::hours(REFRESH_TOKEN_TTL_HOURS))
    }

    pub fn issue(
        &self,
        id: Uuid,
        fullname: &str,
        email: &str,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            id_user: id.to_string(),
            fullname: fullname.to_string(),
            email: email.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    /// Verifies signature and expiry (no leeway) and returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::InvalidToken)
    }

    pub fn parse_email(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.verify(token)?;
        if claims.email.trim().is_empty() {
            return Err(TokenError::InvalidToken);
        }
        Ok(claims.email)
    }

    pub fn parse_user_id(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.verify(token)?;
        Uuid::parse_str(&claims.id_user).map_err(|_| TokenError::InvalidToken)
    }
}
