//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Servicio no encontrado")]
    NotFound,

    #[error("No se pudieron obtener los servicios")]
    Fetch(#[source] sqlx::Error),

    #[error("No se pudo crear el servicio")]
    Create(#[source] sqlx::Error),

    #[error("No se pudo actualizar el servicio")]
    Update(#[source] sqlx::Error),

    #[error("No se pudo reordenar los servicios")]
    Reorder(#[source] sqlx::Error),

    #[error("No se pudo eliminar el servicio")]
    Delete(#[source] sqlx::Error),

    /// A reorder task panicked or was cancelled
    #[error("No se pudo reordenar los servicios")]
    Task(#[from] tokio::task::JoinError),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            CatalogError::Fetch(e) => tracing::error!(error = %e, "Failed to list services"),
            CatalogError::Create(e) => tracing::error!(error = %e, "Failed to create service"),
            CatalogError::Update(e) => tracing::error!(error = %e, "Failed to update service"),
            CatalogError::Reorder(e) => tracing::error!(error = %e, "Failed to reorder services"),
            CatalogError::Delete(e) => tracing::error!(error = %e, "Failed to delete service"),
            CatalogError::Task(e) => tracing::error!(error = %e, "Reorder task failed"),
            CatalogError::NotFound => tracing::debug!(error = %self, "Catalog error"),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
