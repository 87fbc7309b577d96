//! Object storage for uploaded photos.
pub mod supabase_storage;
#[cfg(test)]
pub mod memory;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub use supabase_storage::SupabaseStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage rejected upload: {0}")]
    Rejected(String),
}

/// A file received from a client, before it is pushed to storage.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub alias: Option<String>,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// `alias + original extension`, or the original name when no alias is given.
    pub fn target_name(&self) -> String {
        match self.alias.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(alias) => match Path::new(&self.file_name).extension().and_then(|e| e.to_str()) {
                Some(ext) => format!("{}.{}", alias, ext),
                None => alias.to_string(),
            },
            None => self.file_name.clone(),
        }
    }

    pub fn mime_type(&self) -> String {
        if let Some(ct) = self.content_type.as_deref().filter(|c| !c.is_empty()) {
            return ct.to_string();
        }
        let guessed = match Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
            Some("png") => mime::IMAGE_PNG,
            Some("gif") => mime::IMAGE_GIF,
            _ => mime::APPLICATION_OCTET_STREAM,
        };
        guessed.to_string()
    }
}

/// Where photos go. Returns the public URL of the stored object.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn upload(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(alias: Option<&str>, name: &str) -> PhotoUpload {
        PhotoUpload {
            alias: alias.map(String::from),
            file_name: name.into(),
            content_type: None,
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn alias_keeps_original_extension() {
        assert_eq!(upload(Some("avatar-42"), "IMG_001.png").target_name(), "avatar-42.png");
    }

    #[test]
    fn blank_alias_falls_back_to_file_name() {
        assert_eq!(upload(Some("  "), "IMG_001.png").target_name(), "IMG_001.png");
        assert_eq!(upload(None, "IMG_001.png").target_name(), "IMG_001.png");
    }

    #[test]
    fn mime_guessed_from_extension() {
        assert_eq!(upload(None, "a.JPG").mime_type(), "image/jpeg");
        assert_eq!(upload(None, "a.bin").mime_type(), "application/octet-stream");
    }
}
