//! Contact Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ContactResult<T> = Result<T, ContactError>;

#[derive(Debug, Error)]
pub enum ContactError {
    /// Token missing or rejected by the provider
    #[error("La verificación CAPTCHA falló. Intentá de nuevo.")]
    CaptchaFailed,

    #[error("Mensaje no encontrado")]
    NotFound,

    #[error("No se pudo enviar el mensaje. Intentá de nuevo más tarde.")]
    Create(#[source] sqlx::Error),

    #[error("No se pudieron obtener los mensajes")]
    Fetch(#[source] sqlx::Error),

    #[error("No se pudo actualizar el mensaje")]
    Update(#[source] sqlx::Error),
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactError::CaptchaFailed => ErrorKind::BadRequest,
            ContactError::NotFound => ErrorKind::NotFound,
            ContactError::Create(_) | ContactError::Fetch(_) | ContactError::Update(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            ContactError::Create(e) => tracing::error!(error = %e, "Failed to insert contact"),
            ContactError::Fetch(e) => tracing::error!(error = %e, "Failed to list contacts"),
            ContactError::Update(e) => tracing::error!(error = %e, "Failed to update contact"),
            ContactError::CaptchaFailed => tracing::warn!("Contact submission failed captcha"),
            ContactError::NotFound => tracing::debug!(error = %self, "Contact error"),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
