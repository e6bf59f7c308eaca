//! Object storage for uploaded images
//!
//! Talks to the Supabase Storage REST API with the service-role key.
//! Objects live in a single public bucket; rows keep the public URL and
//! the object path is recovered from it on delete.

use axum::http::header;
use thiserror::Error;

use crate::image::ImageUpload;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("url is not an object of this bucket: {0}")]
    ForeignUrl(String),
}

#[trait_variant::make(ObjectStorage: Send)]
pub trait LocalObjectStorage {
    /// Store the image under a fresh name and return its public URL.
    async fn upload(&self, image: &ImageUpload) -> Result<String, StorageError>;

    /// Remove the object behind a public URL.
    async fn delete(&self, public_url: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            bucket: bucket.into(),
        }
    }

    fn public_marker(&self) -> String {
        format!("/storage/v1/object/public/{}/", self.bucket)
    }

    pub fn public_url(&self, object: &str) -> String {
        format!("{}{}{}", self.base_url, self.public_marker(), object)
    }

    /// Object path inside the bucket for one of our public URLs.
    pub fn object_path<'a>(&self, public_url: &'a str) -> Option<&'a str> {
        public_url
            .split_once(&self.public_marker())
            .map(|(_, path)| path)
            .filter(|path| !path.is_empty())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<(), StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(StorageError::Status {
        status: status.as_u16(),
        body,
    })
}

impl ObjectStorage for SupabaseStorage {
    async fn upload(&self, image: &ImageUpload) -> Result<String, StorageError> {
        let object = image.object_name();
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, object);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(header::CONTENT_TYPE, &image.content_type)
            .header("x-upsert", "false")
            .body(image.bytes.clone())
            .send()
            .await?;
        ensure_success(response).await?;

        tracing::info!(bucket = %self.bucket, object = %object, size = image.bytes.len(), "Image uploaded");
        Ok(self.public_url(&object))
    }

    async fn delete(&self, public_url: &str) -> Result<(), StorageError> {
        let path = self
            .object_path(public_url)
            .ok_or_else(|| StorageError::ForeignUrl(public_url.to_string()))?;
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&serde_json::json!({ "prefixes": [path] }))
            .send()
            .await?;
        ensure_success(response).await?;

        tracing::info!(bucket = %self.bucket, object = %path, "Image deleted");
        Ok(())
    }
}
