//! Multipart form extractor
//!
//! Text parts are gathered as pairs, normalized with the form's schema and
//! validated like a query string. The part named `foto` is the optional
//! photo; a file input left empty by the browser arrives as a nameless,
//! zero-length part and counts as absent.

use axum::extract::multipart::{Field as Part, MultipartError};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use kernel::validation::{Validate, ValidationErrors};
use platform::image::{ImageUpload, MAX_IMAGE_BYTES};
use serde::de::DeserializeOwned;

/// Name of the file part.
pub const PHOTO_FIELD: &str = "foto";

/// Body limit for the form routes: the largest accepted photo plus room for
/// the text parts and multipart framing.
pub const FORM_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Validated text members plus the optional, already checked photo.
#[derive(Debug)]
pub struct PortfolioForm<T> {
    pub fields: T,
    pub foto: Option<ImageUpload>,
}

fn part_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(ErrorKind::PayloadTooLarge, "La imagen no puede superar los 5 MB")
            .with_source(err);
    }
    AppError::bad_request("Formulario inválido").with_source(err)
}

async fn read_photo(part: Part<'_>) -> Result<Option<ImageUpload>, AppError> {
    let file_name = part.file_name().map(str::to_string);
    let content_type = part
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = part.bytes().await.map_err(part_error)?;

    let unnamed = file_name.as_deref().is_none_or(str::is_empty);
    if bytes.is_empty() && unnamed {
        return Ok(None);
    }
    Ok(Some(ImageUpload::new(file_name, content_type, bytes)))
}

impl<S, T> FromRequest<S> for PortfolioForm<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request("Se esperaba un formulario multipart").with_source(rejection)
            })?;

        let mut text = Vec::new();
        let mut foto = None;
        while let Some(part) = multipart.next_field().await.map_err(part_error)? {
            let Some(name) = part.name().map(str::to_string) else {
                continue;
            };
            if name == PHOTO_FIELD {
                foto = read_photo(part).await?;
            } else {
                let value = part.text().await.map_err(part_error)?;
                text.push((name, value));
            }
        }

        let fields = T::validate(T::schema().coerce_text(text)).map_err(AppError::from)?;

        if let Some(image) = &foto {
            image.validate().map_err(|e| {
                AppError::from(ValidationErrors::single(PHOTO_FIELD, e.to_string()))
            })?;
        }

        Ok(Self { fields, foto })
    }
}
