//! Portfolio item entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PortfolioItemId, ServiceId};
use serde::Serialize;

/// A finished job as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioItem {
    pub id: PortfolioItemId,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub service_id: ServiceId,
    pub fecha: NaiveDate,
    /// Public URL of the photo in object storage
    pub foto_url: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title of the service an item is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedService {
    pub titulo: String,
}

/// Operator listing row: the item plus `services: { titulo }`, `null` when
/// the linked service no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioEntry {
    #[serde(flatten)]
    pub item: PortfolioItem,
    pub services: Option<LinkedService>,
}

/// Public view of an active item. `categoria` is the linked service's
/// title, empty when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivePortfolioItem {
    pub id: PortfolioItemId,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub foto_url: Option<String>,
    pub fecha: NaiveDate,
    pub categoria: String,
}

impl From<&PortfolioEntry> for ActivePortfolioItem {
    fn from(entry: &PortfolioEntry) -> Self {
        Self {
            id: entry.item.id,
            titulo: entry.item.titulo.clone(),
            descripcion: entry.item.descripcion.clone(),
            foto_url: entry.item.foto_url.clone(),
            fecha: entry.item.fecha,
            categoria: entry
                .services
                .as_ref()
                .map(|s| s.titulo.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPortfolioItem {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub service_id: ServiceId,
    pub fecha: NaiveDate,
    pub foto_url: Option<String>,
    pub activo: bool,
}

/// Partial update; `None` members are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioPatch {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub service_id: Option<ServiceId>,
    pub fecha: Option<NaiveDate>,
    pub foto_url: Option<String>,
    pub activo: Option<bool>,
}

impl PortfolioPatch {
    pub fn is_empty(&self) -> bool {
        self.titulo.is_none()
            && self.descripcion.is_none()
            && self.service_id.is_none()
            && self.fecha.is_none()
            && self.foto_url.is_none()
            && self.activo.is_none()
    }

    pub fn apply(&self, item: &mut PortfolioItem, now: DateTime<Utc>) {
        if let Some(titulo) = &self.titulo {
            item.titulo = titulo.clone();
        }
        if let Some(descripcion) = &self.descripcion {
            item.descripcion = Some(descripcion.clone());
        }
        if let Some(service_id) = self.service_id {
            item.service_id = service_id;
        }
        if let Some(fecha) = self.fecha {
            item.fecha = fecha;
        }
        if let Some(foto_url) = &self.foto_url {
            item.foto_url = Some(foto_url.clone());
        }
        if let Some(activo) = self.activo {
            item.activo = activo;
        }
        item.updated_at = now;
    }
}

/// Operator listing filter. `search` is a case-insensitive substring of
/// `titulo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioFilter {
    pub activo: Option<bool>,
    pub service_id: Option<ServiceId>,
    pub search: Option<String>,
}

impl PortfolioFilter {
    pub fn matches(&self, item: &PortfolioItem) -> bool {
        self.activo.is_none_or(|a| item.activo == a)
            && self.service_id.is_none_or(|id| item.service_id == id)
            && self.search.as_deref().is_none_or(|needle| {
                item.titulo
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }
}
