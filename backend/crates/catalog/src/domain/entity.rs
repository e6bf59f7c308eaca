//! Service entity

use chrono::{DateTime, Utc};
use kernel::id::ServiceId;
use serde::Serialize;

/// An offered service as the operator sees it.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub titulo: String,
    pub descripcion: String,
    /// Symbolic icon name, e.g. `FaPrint`
    pub icono: String,
    pub orden: i32,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of an active service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveService {
    pub id: ServiceId,
    pub titulo: String,
    pub descripcion: String,
    pub icono: String,
    pub orden: i32,
}

impl From<&Service> for ActiveService {
    fn from(s: &Service) -> Self {
        Self {
            id: s.id,
            titulo: s.titulo.clone(),
            descripcion: s.descripcion.clone(),
            icono: s.icono.clone(),
            orden: s.orden,
        }
    }
}

/// A service ready to insert. `orden` is already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    pub titulo: String,
    pub descripcion: String,
    pub icono: String,
    pub orden: i32,
    pub activo: bool,
}

/// Partial update; `None` members are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePatch {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub icono: Option<String>,
    pub orden: Option<i32>,
    pub activo: Option<bool>,
}

impl ServicePatch {
    pub fn is_empty(&self) -> bool {
        self.titulo.is_none()
            && self.descripcion.is_none()
            && self.icono.is_none()
            && self.orden.is_none()
            && self.activo.is_none()
    }

    pub fn apply(&self, service: &mut Service, now: DateTime<Utc>) {
        if let Some(titulo) = &self.titulo {
            service.titulo = titulo.clone();
        }
        if let Some(descripcion) = &self.descripcion {
            service.descripcion = descripcion.clone();
        }
        if let Some(icono) = &self.icono {
            service.icono = icono.clone();
        }
        if let Some(orden) = self.orden {
            service.orden = orden;
        }
        if let Some(activo) = self.activo {
            service.activo = activo;
        }
        service.updated_at = now;
    }
}

/// One entry of a bulk reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderItem {
    pub id: ServiceId,
    pub orden: i32,
}

/// Operator listing filter. `search` is a case-insensitive substring of
/// `titulo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub activo: Option<bool>,
    pub search: Option<String>,
}

impl ServiceFilter {
    pub fn matches(&self, service: &Service) -> bool {
        self.activo.is_none_or(|a| service.activo == a)
            && self.search.as_deref().is_none_or(|needle| {
                service
                    .titulo
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }
}

/// `orden` for a new service: one past the current maximum, 1 when empty.
pub fn next_orden(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0).saturating_add(1)
}
