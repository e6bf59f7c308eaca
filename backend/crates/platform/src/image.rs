//! Uploaded image guard
//!
//! Portfolio photos arrive as multipart parts. Only common raster formats
//! are accepted, up to [`MAX_IMAGE_BYTES`], and stored under a random name
//! that keeps the original extension.

use axum::body::Bytes;
use thiserror::Error;
use uuid::Uuid;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("La imagen está vacía")]
    Empty,

    #[error("La imagen no puede superar los 5 MB")]
    TooLarge { size: usize },

    #[error("Formato de imagen no soportado")]
    UnsupportedType { content_type: String },
}

#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    pub fn new(file_name: Option<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), ImageError> {
        if self.bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: self.bytes.len(),
            });
        }
        let content_type = self.content_type.to_ascii_lowercase();
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ImageError::UnsupportedType {
                content_type: self.content_type.clone(),
            });
        }
        Ok(())
    }

    /// Extension of the original file name, `jpg` when there is none.
    pub fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "jpg".to_string())
    }

    /// `{uuid}.{ext}`
    pub fn object_name(&self) -> String {
        format!("{}.{}", Uuid::new_v4(), self.extension())
    }
}
