use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{expect_affected, RepoError};
use crate::models::Token;

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Token>, RepoError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Token>, RepoError>;
    async fn get_by_refresh_token(&self, refresh_token: &str) -> Result<Option<Token>, RepoError>;
    async fn create(&self, token: &Token) -> Result<(), RepoError>;
    async fn update(&self, token: &Token) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

const SELECT: &str = "SELECT id, user_id, refresh_token, created_at FROM tokens";

#[derive(Clone)]
pub struct PgTokenRepository {
    pool: Pool,
}

impl PgTokenRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn token_from_row(row: &Row) -> Result<Token, RepoError> {
    Ok(Token {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        refresh_token: row.try_get("refresh_token")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn get_all(&self) -> Result<Vec<Token>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client.query(SELECT, &[]).await?;
        rows.iter().map(token_from_row).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Token>, RepoError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(&format!("{} WHERE id = $1", SELECT), &[&id]).await?;
        row.as_ref().map(token_from_row).transpose()
    }

    async fn get_by_refresh_token(&self, refresh_token: &str) -> Result<Option<Token>, RepoError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(&format!("{} WHERE refresh_token = $1", SELECT), &[&refresh_token])
            .await?;
        row.as_ref().map(token_from_row).transpose()
    }

    async fn create(&self, token: &Token) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "INSERT INTO tokens (id, user_id, refresh_token, created_at) VALUES ($1, $2, $3, $4)",
                &[&token.id, &token.user_id, &token.refresh_token, &token.created_at],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, token: &Token) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .execute(
                "UPDATE tokens SET user_id = $2, refresh_token = $3, created_at = $4 WHERE id = $1",
                &[&token.id, &token.user_id, &token.refresh_token, &token.created_at],
            )
            .await?;
        expect_affected(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client.execute("DELETE FROM tokens WHERE id = $1", &[&id]).await?;
        expect_affected(rows)
    }
}
