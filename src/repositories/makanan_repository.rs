use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use super::{expect_affected, RepoError};
use crate::models::Makanan;

#[async_trait]
pub trait MakananRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<Makanan>, RepoError>;
    async fn get_all(&self) -> Result<Vec<Makanan>, RepoError>;
    async fn create(&self, makanan: &Makanan) -> Result<(), RepoError>;
    async fn update(&self, makanan: &Makanan) -> Result<(), RepoError>;
    async fn delete(&self, id: &str) -> Result<(), RepoError>;
}

const SELECT: &str = "SELECT id, name, jenis, calories, protein, ingredients, cooking_steps, franchises \
     FROM makanan";

#[derive(Clone)]
pub struct PgMakananRepository {
    pool: Pool,
}

impl PgMakananRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn makanan_from_row(row: &Row) -> Result<Makanan, RepoError> {
    Ok(Makanan {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        jenis: row.try_get("jenis")?,
        calories: row.try_get("calories")?,
        protein: row.try_get("protein")?,
        ingredients: row.try_get("ingredients")?,
        cooking_steps: row.try_get("cooking_steps")?,
        franchises: row.try_get("franchises")?,
    })
}

#[async_trait]
impl MakananRepository for PgMakananRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Makanan>, RepoError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(&format!("{} WHERE id = $1", SELECT), &[&id]).await?;
        row.as_ref().map(makanan_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Makanan>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client.query(&format!("{} ORDER BY name", SELECT), &[]).await?;
        rows.iter().map(makanan_from_row).collect()
    }

    async fn create(&self, m: &Makanan) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "INSERT INTO makanan (id, name, jenis, calories, protein, ingredients, cooking_steps, franchises) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                &[&m.id, &m.name, &m.jenis, &m.calories, &m.protein, &m.ingredients, &m.cooking_steps, &m.franchises],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, m: &Makanan) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .execute(
                "UPDATE makanan SET name = $2, jenis = $3, calories = $4, protein = $5, \
                 ingredients = $6, cooking_steps = $7, franchises = $8 WHERE id = $1",
                &[&m.id, &m.name, &m.jenis, &m.calories, &m.protein, &m.ingredients, &m.cooking_steps, &m.franchises],
            )
            .await?;
        expect_affected(rows)
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client.execute("DELETE FROM makanan WHERE id = $1", &[&id]).await?;
        expect_affected(rows)
    }
}
