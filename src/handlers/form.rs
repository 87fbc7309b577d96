// src/handlers/form.rs - shared request parsing helpers
use std::collections::HashMap;
use std::sync::LazyLock;

use actix_multipart::Multipart;
use base64::{engine::general_purpose, Engine as _};
use futures::{StreamExt, TryStreamExt};
use regex::Regex;

use crate::dtos::admin_dtos::Base64Photo;
use crate::storage::PhotoUpload;

/// Largest single multipart part accepted, photos included.
pub const MAX_PART_BYTES: usize = 5 * 1024 * 1024;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").ok());

pub fn looks_like_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

fn append_capped(buf: &mut Vec<u8>, chunk: &[u8], limit: usize, name: &str) -> Result<(), String> {
    if buf.len() + chunk.len() > limit {
        return Err(format!("{} exceeds the {} byte limit", name, limit));
    }
    buf.extend_from_slice(chunk);
    Ok(())
}

/// A multipart body split into text fields and at most one file.
#[derive(Debug, Default)]
pub struct FormData {
    pub text: HashMap<String, String>,
    pub file: Option<FilePart>,
}

#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FormData {
    pub fn get(&self, name: &str) -> &str {
        self.text.get(name).map(|s| s.trim()).unwrap_or("")
    }

    pub fn required(&self, name: &str) -> Result<&str, String> {
        match self.get(name) {
            "" => Err(format!("{} is required", name)),
            v => Ok(v),
        }
    }

    pub fn number(&self, name: &str) -> Result<f64, String> {
        self.required(name)?
            .parse()
            .map_err(|_| format!("{} must be a number", name))
    }

    /// The uploaded file, renamed by the optional `alias` field.
    pub fn take_photo(&mut self) -> Option<PhotoUpload> {
        let alias = self.text.get("alias").cloned();
        self.file.take().map(|f| PhotoUpload {
            alias,
            file_name: f.file_name,
            content_type: f.content_type,
            bytes: f.bytes,
        })
    }
}

/// Reads every field; the part named `file_field` is kept as bytes.
pub async fn read_form(mut payload: Multipart, file_field: &str) -> Result<FormData, String> {
    let mut form = FormData::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| format!("Invalid multipart body: {}", e))?
    {
        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => continue,
        };
        let content_type = field.content_type().map(|m| m.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| format!("Failed to read {}: {}", name, e))?;
            append_capped(&mut data, &chunk, MAX_PART_BYTES, &name)?;
        }

        if name == file_field {
            if data.is_empty() {
                continue;
            }
            form.file = Some(FilePart {
                file_name: file_name.unwrap_or_else(|| file_field.to_string()),
                content_type,
                bytes: data,
            });
        } else {
            form.text.insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok(form)
}

/// Decodes a base64 photo, accepting a `data:<mime>;base64,` prefix.
pub fn decode_base64_photo(photo: Base64Photo) -> Result<PhotoUpload, String> {
    let (prefix, payload) = match photo.image_data.split_once(',') {
        Some((p, d)) => (Some(p), d),
        None => (None, photo.image_data.as_str()),
    };

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| "Invalid base64 image data".to_string())?;
    if bytes.is_empty() {
        return Err("Image data is empty".into());
    }

    let content_type = photo.content_type.clone().or_else(|| {
        prefix
            .and_then(|p| p.strip_prefix("data:"))
            .and_then(|p| p.split(';').next())
            .map(str::to_string)
    });

    Ok(PhotoUpload {
        alias: photo.alias,
        file_name: photo.file_name,
        content_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(data: &str) -> Base64Photo {
        Base64Photo {
            file_name: "avatar.png".into(),
            image_data: data.into(),
            content_type: None,
            alias: None,
        }
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("budi@kalorize.id"));
        assert!(!looks_like_email("budi@"));
        assert!(!looks_like_email("not an email"));
    }

    #[test]
    fn data_url_prefix_sets_content_type() {
        let photo = decode_base64_photo(b64("data:image/png;base64,AQID")).unwrap();
        assert_eq!(photo.bytes, vec![1, 2, 3]);
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));

        let bare = decode_base64_photo(b64("AQID")).unwrap();
        assert!(bare.content_type.is_none());
    }

    #[test]
    fn garbage_base64_is_rejected() {
        assert!(decode_base64_photo(b64("@@@")).is_err());
        assert!(decode_base64_photo(b64("")).is_err());
    }

    #[test]
    fn oversized_part_is_rejected() {
        let mut buf = Vec::new();
        append_capped(&mut buf, &[0; 6], 10, "file").unwrap();
        let err = append_capped(&mut buf, &[0; 5], 10, "file").unwrap_err();
        assert_eq!(err, "file exceeds the 10 byte limit");
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn numbers_and_required_fields() {
        let mut form = FormData::default();
        form.text.insert("latitude".into(), " -6.2 ".into());
        form.text.insert("longitude".into(), "east".into());
        assert_eq!(form.number("latitude").unwrap(), -6.2);
        assert!(form.number("longitude").is_err());
        assert_eq!(form.required("namaGym").unwrap_err(), "namaGym is required");
    }
}
