use std::env;
use anyhow::{Context, Result};
use deadpool_postgres::{Config, Pool, Runtime};
use tokio_postgres::NoTls;

const DEFAULT_POOL_SIZE: usize = 16;
const DEFAULT_BUCKET: &str = "kalorize";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Everything the server reads from the environment at boot.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pg_host: String,
    pub pg_user: String,
    pub pg_pass: Option<String>,
    pub pg_db: String,
    pub pg_pool_size: usize,
    pub supabase_url: String,
    pub supabase_key: String,
    pub storage_bucket: String,
    pub jwt_secret: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let pg_pool_size = match env::var("PG_POOL_SIZE") {
            Ok(v) => v.parse().context("PG_POOL_SIZE must be a number")?,
            Err(_) => DEFAULT_POOL_SIZE,
        };
        let port = match env::var("PORT") {
            Ok(v) => v.parse().context("PORT must be a number")?,
            Err(_) => 8080,
        };
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            pg_host: env::var("PG_HOST").context("PG_HOST not set")?,
            pg_user: env::var("PG_USER").context("PG_USER not set")?,
            pg_pass: env::var("PG_PASS").ok(),
            pg_db: env::var("PG_DB").context("PG_DB not set")?,
            pg_pool_size,
            supabase_url: env::var("SUPABASE_URL")
                .context("SUPABASE_URL not set")?
                .trim()
                .trim_end_matches('/')
                .to_string(),
            supabase_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .context("SUPABASE_SERVICE_ROLE_KEY not set")?
                .trim()
                .to_string(),
            storage_bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.into()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET not set")?,
            port,
            allowed_origins,
        })
    }
}

pub fn mask_key(k: &str) -> String {
    if k.len() <= 8 { "[REDACTED]".to_string() }
    else { format!("{}***{}", &k[..4], &k[k.len()-4..]) }
}

pub fn get_pg_pool(app: &AppConfig) -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(app.pg_host.clone());
    cfg.user = Some(app.pg_user.clone());
    cfg.password = app.pg_pass.clone();
    cfg.dbname = Some(app.pg_db.clone());

    let mut pool_cfg = cfg.pool.take().unwrap_or_default();
    pool_cfg.max_size = app.pg_pool_size;
    cfg.pool = Some(pool_cfg);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
       .context("failed to create postgres pool")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_are_fully_redacted() {
        assert_eq!(mask_key("abc"), "[REDACTED]");
    }

    #[test]
    fn long_keys_keep_edges() {
        assert_eq!(mask_key("abcdefghijkl"), "abcd***ijkl");
    }
}
