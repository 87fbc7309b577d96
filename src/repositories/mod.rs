//! Entity stores. Each trait has a Postgres implementation; lookups return
//! `Ok(None)` when the row does not exist.
pub mod user_repository;
pub mod gym_repository;
pub mod kode_gym_repository;
pub mod franchise_repository;
pub mod makanan_repository;
pub mod history_repository;
pub mod token_repository;
#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use deadpool_postgres::Pool;
use thiserror::Error;

pub use franchise_repository::{FranchiseRepository, PgFranchiseRepository};
pub use gym_repository::{GymRepository, PgGymRepository};
pub use history_repository::{HistoryRepository, PgHistoryRepository};
pub use kode_gym_repository::{KodeGymRepository, PgKodeGymRepository};
pub use makanan_repository::{MakananRepository, PgMakananRepository};
pub use token_repository::{PgTokenRepository, TokenRepository};
pub use user_repository::{PgUserRepository, UserRepository};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("database error: {0}")]
    Db(#[from] tokio_postgres::Error),
    #[error("not found")]
    NotFound,
    #[error("other: {0}")]
    Other(String),
}

/// All stores, shared by the services.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub gyms: Arc<dyn GymRepository>,
    pub kode_gyms: Arc<dyn KodeGymRepository>,
    pub franchises: Arc<dyn FranchiseRepository>,
    pub makanan: Arc<dyn MakananRepository>,
    pub histories: Arc<dyn HistoryRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Stores {
    pub fn postgres(pool: Pool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            gyms: Arc::new(PgGymRepository::new(pool.clone())),
            kode_gyms: Arc::new(PgKodeGymRepository::new(pool.clone())),
            franchises: Arc::new(PgFranchiseRepository::new(pool.clone())),
            makanan: Arc::new(PgMakananRepository::new(pool.clone())),
            histories: Arc::new(PgHistoryRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool)),
        }
    }
}

/// `DELETE`/`UPDATE` helpers report a missing row as `NotFound`.
pub(crate) fn expect_affected(rows: u64) -> Result<(), RepoError> {
    if rows == 0 { Err(RepoError::NotFound) } else { Ok(()) }
}
