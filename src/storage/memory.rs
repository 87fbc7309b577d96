use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{PhotoStore, StorageError};

/// Records uploads; `failing()` rejects every upload.
#[derive(Default)]
pub struct MemoryPhotoStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    fail: bool,
}

impl MemoryPhotoStore {
    pub fn failing() -> Self {
        Self { objects: Mutex::default(), fail: true }
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn upload(&self, file_name: &str, _content_type: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        if self.fail {
            return Err(StorageError::Rejected("503 -> unavailable".into()));
        }
        self.objects.lock().unwrap().insert(file_name.to_string(), bytes);
        Ok(format!("https://storage.test/kalorize/images/{}", file_name))
    }
}
