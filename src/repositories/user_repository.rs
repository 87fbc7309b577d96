// src/repositories/user_repository.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::{expect_affected, RepoError};
use crate::models::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn get_by_username(&self, full_name: &str) -> Result<Option<User>, RepoError>;
    async fn get_by_referral_code(&self, code: &str) -> Result<Option<User>, RepoError>;
    async fn get_all(&self) -> Result<Vec<User>, RepoError>;
    async fn create(&self, user: &User) -> Result<(), RepoError>;
    async fn update(&self, user: &User) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

const COLUMNS: &str = "id, email, full_name, password, role, phone, age, weight, height, \
     gender, gym_frequency, calorie_target, photo, photo_url, referral_code";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool,
}

impl PgUserRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &(dyn tokio_postgres::types::ToSql + Sync)) -> Result<Option<User>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM users WHERE {} = $1 LIMIT 1", COLUMNS, column);
        let row = client.query_opt(sql.as_str(), &[value]).await?;
        row.as_ref().map(user_from_row).transpose()
    }
}

fn user_from_row(row: &Row) -> Result<User, RepoError> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        password: row.try_get("password")?,
        role: row.try_get("role")?,
        phone: row.try_get("phone")?,
        age: row.try_get("age")?,
        weight: row.try_get("weight")?,
        height: row.try_get("height")?,
        gender: row.try_get("gender")?,
        gym_frequency: row.try_get("gym_frequency")?,
        calorie_target: row.try_get("calorie_target")?,
        photo: row.try_get("photo")?,
        photo_url: row.try_get("photo_url")?,
        referral_code: row.try_get("referral_code")?,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        self.find_one("id", &id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        self.find_one("email", &email).await
    }

    async fn get_by_username(&self, full_name: &str) -> Result<Option<User>, RepoError> {
        self.find_one("full_name", &full_name).await
    }

    async fn get_by_referral_code(&self, code: &str) -> Result<Option<User>, RepoError> {
        self.find_one("referral_code", &code).await
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM users ORDER BY full_name", COLUMNS);
        let rows = client.query(sql.as_str(), &[]).await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn create(&self, user: &User) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO users ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
            COLUMNS
        );
        client
            .execute(
                sql.as_str(),
                &[
                    &user.id, &user.email, &user.full_name, &user.password, &user.role,
                    &user.phone, &user.age, &user.weight, &user.height, &user.gender,
                    &user.gym_frequency, &user.calorie_target, &user.photo, &user.photo_url,
                    &user.referral_code,
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client
            .execute(
                "UPDATE users SET email = $2, full_name = $3, password = $4, role = $5, phone = $6, \
                 age = $7, weight = $8, height = $9, gender = $10, gym_frequency = $11, \
                 calorie_target = $12, photo = $13, photo_url = $14, referral_code = $15 \
                 WHERE id = $1",
                &[
                    &user.id, &user.email, &user.full_name, &user.password, &user.role,
                    &user.phone, &user.age, &user.weight, &user.height, &user.gender,
                    &user.gym_frequency, &user.calorie_target, &user.photo, &user.photo_url,
                    &user.referral_code,
                ],
            )
            .await?;
        expect_affected(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        let rows = client.execute("DELETE FROM users WHERE id = $1", &[&id]).await?;
        expect_affected(rows)
    }
}
