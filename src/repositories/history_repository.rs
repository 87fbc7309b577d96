use async_trait::async_trait;
use chrono::NaiveDateTime;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{expect_affected, RepoError};
use crate::models::History;

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<History>, RepoError>;
    /// `day` is a midnight timestamp, as stored by the upsert.
    async fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        day: NaiveDateTime,
    ) -> Result<Option<History>, RepoError>;
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<History>, RepoError>;
    async fn create(&self, history: &History) -> Result<(), RepoError>;
    async fn update(&self, history: &History) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

const SELECT: &str = "SELECT id, user_id, breakfast_ids, lunch_ids, dinner_ids, total_calories, \
     total_protein, created_at FROM histories";

#[derive(Clone)]
pub struct PgHistoryRepository {
    pool: Pool,
}

impl PgHistoryRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn history_from_row(row: &Row) -> Result<History, RepoError> {
    Ok(History {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        breakfast_ids: row.try_get("breakfast_ids")?,
        lunch_ids: row.try_get("lunch_ids")?,
        dinner_ids: row.try_get("dinner_ids")?,
        total_calories: row.try_get("total_calories")?,
        total_protein: row.try_get("total_protein")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<History>, RepoError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(&format!("{} WHERE id = $1", SELECT), &[&id]).await?;
        row.as_ref().map(history_from_row).transpose()
    }

    async fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        day: NaiveDateTime,
    ) -> Result<Option<History>, RepoError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                &format!("{} WHERE user_id = $1 AND created_at = $2 LIMIT 1", SELECT),
                &[&user_id, &day],
            )
            .await?;
        row.as_ref().map(history_from_row).transpose()
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<History>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(&format!("{} WHERE user_id = $1 ORDER BY created_at DESC", SELECT), &[&user_id])
            .await?;
        rows.iter().map(history_from_row).collect()
    }

    async fn create(&self, h: &History) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "INSERT INTO histories (id, user_id, breakfast_ids, lunch_ids, dinner_ids, \
                 total_calories, total_protein, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                &[
                    &h.id, &h.user_id, &h.breakfast_ids, &h.lunch_ids, &h.dinner_ids,
                    &h.total_calories, &h.total_protein, &h.created_at,
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, h: &History) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .execute(
                "UPDATE histories SET user_id = $2, breakfast_ids = $3, lunch_ids = $4, dinner_ids = $5, \
                 total_calories = $6, total_protein = $7, created_at = $8 WHERE id = $1",
                &[
                    &h.id, &h.user_id, &h.breakfast_ids, &h.lunch_ids, &h.dinner_ids,
                    &h.total_calories, &h.total_protein, &h.created_at,
                ],
            )
            .await?;
        expect_affected(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client.execute("DELETE FROM histories WHERE id = $1", &[&id]).await?;
        expect_affected(rows)
    }
}
