use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{expect_affected, RepoError};
use crate::models::Gym;

#[async_trait]
pub trait GymRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Gym>, RepoError>;
    async fn get_all(&self) -> Result<Vec<Gym>, RepoError>;
    async fn create(&self, gym: &Gym) -> Result<(), RepoError>;
    async fn update(&self, gym: &Gym) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

const COLUMNS: &str = "id, name, address, latitude, longitude, link_google, photo, photo_url";

#[derive(Clone)]
pub struct PgGymRepository {
    pool: Pool,
}

impl PgGymRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn gym_from_row(row: &Row) -> Result<Gym, RepoError> {
    Ok(Gym {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        link_google: row.try_get("link_google")?,
        photo: row.try_get("photo")?,
        photo_url: row.try_get("photo_url")?,
    })
}

#[async_trait]
impl GymRepository for PgGymRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Gym>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM gyms WHERE id = $1", COLUMNS);
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        row.as_ref().map(gym_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Gym>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM gyms ORDER BY name", COLUMNS);
        let rows = client.query(sql.as_str(), &[]).await?;
        rows.iter().map(gym_from_row).collect()
    }

    async fn create(&self, gym: &Gym) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("INSERT INTO gyms ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)", COLUMNS);
        client
            .execute(
                sql.as_str(),
                &[
                    &gym.id, &gym.name, &gym.address, &gym.latitude, &gym.longitude,
                    &gym.link_google, &gym.photo, &gym.photo_url,
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, gym: &Gym) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .execute(
                "UPDATE gyms SET name = $2, address = $3, latitude = $4, longitude = $5, \
                 link_google = $6, photo = $7, photo_url = $8 WHERE id = $1",
                &[
                    &gym.id, &gym.name, &gym.address, &gym.latitude, &gym.longitude,
                    &gym.link_google, &gym.photo, &gym.photo_url,
                ],
            )
            .await?;
        expect_affected(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client.execute("DELETE FROM gyms WHERE id = $1", &[&id]).await?;
        expect_affected(rows)
    }
}
