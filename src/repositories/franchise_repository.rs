use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{expect_affected, RepoError};
use crate::models::Franchise;

#[async_trait]
pub trait FranchiseRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Franchise>, RepoError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<Franchise>, RepoError>;
    async fn get_all(&self) -> Result<Vec<Franchise>, RepoError>;
    async fn create(&self, franchise: &Franchise) -> Result<(), RepoError>;
    async fn update(&self, franchise: &Franchise) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

const SELECT: &str = "SELECT id, name, email, latitude, longitude, location, photo, password, phone \
     FROM franchises";

#[derive(Clone)]
pub struct PgFranchiseRepository {
    pool: Pool,
}

impl PgFranchiseRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn franchise_from_row(row: &Row) -> Result<Franchise, RepoError> {
    Ok(Franchise {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        location: row.try_get("location")?,
        photo: row.try_get("photo")?,
        password: row.try_get("password")?,
        phone: row.try_get("phone")?,
    })
}

#[async_trait]
impl FranchiseRepository for PgFranchiseRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Franchise>, RepoError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(&format!("{} WHERE id = $1", SELECT), &[&id]).await?;
        row.as_ref().map(franchise_from_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Franchise>, RepoError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(&format!("{} WHERE email = $1", SELECT), &[&email]).await?;
        row.as_ref().map(franchise_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Franchise>, RepoError> {
        let client = self.pool.get().await?;
        let rows = client.query(&format!("{} ORDER BY name", SELECT), &[]).await?;
        rows.iter().map(franchise_from_row).collect()
    }

    async fn create(&self, f: &Franchise) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "INSERT INTO franchises (id, name, email, latitude, longitude, location, photo, password, phone) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                &[&f.id, &f.name, &f.email, &f.latitude, &f.longitude, &f.location, &f.photo, &f.password, &f.phone],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, f: &Franchise) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .execute(
                "UPDATE franchises SET name = $2, email = $3, latitude = $4, longitude = $5, \
                 location = $6, photo = $7, password = $8, phone = $9 WHERE id = $1",
                &[&f.id, &f.name, &f.email, &f.latitude, &f.longitude, &f.location, &f.photo, &f.password, &f.phone],
            )
            .await?;
        expect_affected(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client.execute("DELETE FROM franchises WHERE id = $1", &[&id]).await?;
        expect_affected(rows)
    }
}
