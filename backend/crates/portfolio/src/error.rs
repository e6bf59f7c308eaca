//! Portfolio Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

pub type PortfolioResult<T> = Result<T, PortfolioError>;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Item de portfolio no encontrado")]
    NotFound,

    #[error("No se pudo obtener el portfolio")]
    Fetch(#[source] sqlx::Error),

    #[error("No se pudo crear el item de portfolio")]
    Create(#[source] sqlx::Error),

    #[error("No se pudo actualizar el item de portfolio")]
    Update(#[source] sqlx::Error),

    #[error("No se pudo eliminar el item de portfolio")]
    Delete(#[source] sqlx::Error),

    #[error("No se pudo subir la imagen")]
    Upload(#[source] StorageError),
}

impl PortfolioError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PortfolioError::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            PortfolioError::Fetch(e) => tracing::error!(error = %e, "Failed to read portfolio"),
            PortfolioError::Create(e) => tracing::error!(error = %e, "Failed to create portfolio item"),
            PortfolioError::Update(e) => tracing::error!(error = %e, "Failed to update portfolio item"),
            PortfolioError::Delete(e) => tracing::error!(error = %e, "Failed to delete portfolio item"),
            PortfolioError::Upload(e) => tracing::error!(error = %e, "Failed to upload portfolio image"),
            PortfolioError::NotFound => tracing::debug!(error = %self, "Portfolio error"),
        }
    }
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
