use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{expect_affected, RepoError};
use crate::models::KodeGym;

#[async_trait]
pub trait KodeGymRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<KodeGym>, RepoError>;
    async fn get_by_code(&self, code: &str) -> Result<Option<KodeGym>, RepoError>;
    async fn get_by_gym(&self, gym_id: Uuid) -> Result<Vec<KodeGym>, RepoError>;
    async fn get_all(&self) -> Result<Vec<KodeGym>, RepoError>;
    async fn create(&self, kode: &KodeGym) -> Result<(), RepoError>;
    async fn update(&self, kode: &KodeGym) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

const SELECT: &str = "SELECT id, code, gym_id, expired_at FROM kode_gyms";

#[derive(Clone)]
pub struct PgKodeGymRepository {
    pool: Pool,
}

impl PgKodeGymRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn kode_from_row(row: &Row) -> Result<KodeGym, RepoError> {
    Ok(KodeGym {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        gym_id: row.try_get("gym_id")?,
        expired_at: row.try_get("expired_at")?,
    })
}

#[async_trait]
impl KodeGymRepository for PgKodeGymRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<KodeGym>, RepoError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(&format!("{} WHERE id = $1", SELECT), &[&id]).await?;
        row.as_ref().map(kode_from_row).transpose()
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<KodeGym>, RepoError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(&format!("{} WHERE code = $1", SELECT), &[&code]).await?;
        row.as_ref().map(kode_from_row).transpose()
    }

    async fn get_by_gym(&self, gym_id: Uuid) -> Result<Vec<KodeGym>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(&format!("{} WHERE gym_id = $1 ORDER BY expired_at DESC", SELECT), &[&gym_id])
            .await?;
        rows.iter().map(kode_from_row).collect()
    }

    async fn get_all(&self) -> Result<Vec<KodeGym>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client.query(SELECT, &[]).await?;
        rows.iter().map(kode_from_row).collect()
    }

    async fn create(&self, kode: &KodeGym) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "INSERT INTO kode_gyms (id, code, gym_id, expired_at) VALUES ($1, $2, $3, $4)",
                &[&kode.id, &kode.code, &kode.gym_id, &kode.expired_at],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, kode: &KodeGym) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .execute(
                "UPDATE kode_gyms SET code = $2, gym_id = $3, expired_at = $4 WHERE id = $1",
                &[&kode.id, &kode.code, &kode.gym_id, &kode.expired_at],
            )
            .await?;
        expect_affected(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client.execute("DELETE FROM kode_gyms WHERE id = $1", &[&id]).await?;
        expect_affected(rows)
    }
}
