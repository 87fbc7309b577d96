// src/storage/supabase_storage.rs - uploads to a Supabase Storage bucket
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use urlencoding::encode;

use super::{PhotoStore, StorageError};

const IMAGE_PREFIX: &str = "images";

#[derive(Clone)]
pub struct SupabaseStorage {
    client: Client,
    supabase_url: String,
    service_role_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(client: Client, supabase_url: &str, service_role_key: &str, bucket: &str) -> Self {
        Self {
            client,
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
            bucket: bucket.to_string(),
        }
    }

    fn object_path(file_name: &str) -> String {
        format!("{}/{}", IMAGE_PREFIX, encode(file_name))
    }

    fn upload_url(&self, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.supabase_url,
            self.bucket,
            Self::object_path(file_name)
        )
    }

    /// Deterministic: bucket + `images/<file_name>`.
    pub fn public_url(&self, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.supabase_url,
            self.bucket,
            Self::object_path(file_name)
        )
    }
}

#[async_trait]
impl PhotoStore for SupabaseStorage {
    async fn upload(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let url = self.upload_url(file_name);
        info!("uploading {} ({} bytes) to bucket {}", file_name, bytes.len(), self.bucket);

        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", &self.service_role_key))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            error!("storage upload failed: {} {}", status, text);
            return Err(StorageError::Rejected(format!("{} -> {}", status.as_u16(), text)));
        }

        Ok(self.public_url(file_name))
    }
}
