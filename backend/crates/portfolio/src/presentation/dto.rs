//! API DTOs (Data Transfer Objects)

use std::sync::LazyLock;

use chrono::NaiveDate;
use kernel::id::ServiceId;
use kernel::pagination::PageQuery;
use kernel::time::parse_date;
use kernel::validation::{Field, Schema, Validate};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::application::CreatePortfolioInput;
use crate::domain::entity::PortfolioPatch;

fn iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom("Fecha inválida"))
}

fn optional_iso_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    iso_date(deserializer).map(Some)
}

fn titulo() -> Field {
    Field::string("titulo").max_length(150, "El título no puede superar los 150 caracteres")
}

fn descripcion() -> Field {
    Field::string("descripcion")
        .max_length(500, "La descripción no puede superar los 500 caracteres")
}

fn service_id() -> Field {
    Field::string("service_id").uuid("El servicio debe ser un UUID válido")
}

fn fecha() -> Field {
    Field::string("fecha").iso_date("Fecha inválida")
}

fn activo() -> Field {
    Field::boolean("activo").type_message("El campo activo debe ser booleano")
}

// ============================================================================
// Create
// ============================================================================

/// Text members of the create form
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePortfolioRequest {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub service_id: ServiceId,
    #[serde(deserialize_with = "iso_date")]
    pub fecha: NaiveDate,
    pub activo: Option<bool>,
}

static CREATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([
        titulo().required("El título es obligatorio"),
        descripcion(),
        service_id().required("El servicio es obligatorio"),
        fecha().required("La fecha es obligatoria"),
        activo(),
    ])
});

impl Validate for CreatePortfolioRequest {
    fn schema() -> &'static Schema {
        &CREATE_SCHEMA
    }
}

impl From<CreatePortfolioRequest> for CreatePortfolioInput {
    fn from(req: CreatePortfolioRequest) -> Self {
        Self {
            titulo: req.titulo,
            descripcion: req.descripcion,
            service_id: req.service_id,
            fecha: req.fecha,
            activo: req.activo,
        }
    }
}

// ============================================================================
// Update
// ============================================================================

/// Text members of the edit form, all optional
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePortfolioRequest {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub service_id: Option<ServiceId>,
    #[serde(default, deserialize_with = "optional_iso_date")]
    pub fecha: Option<NaiveDate>,
    pub activo: Option<bool>,
}

static UPDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([
        titulo().not_empty("El título no puede estar vacío"),
        descripcion(),
        service_id().not_empty("El servicio no puede estar vacío"),
        fecha().not_empty("La fecha no puede estar vacía"),
        activo(),
    ])
});

impl Validate for UpdatePortfolioRequest {
    fn schema() -> &'static Schema {
        &UPDATE_SCHEMA
    }
}

impl From<UpdatePortfolioRequest> for PortfolioPatch {
    fn from(req: UpdatePortfolioRequest) -> Self {
        Self {
            titulo: req.titulo,
            descripcion: req.descripcion,
            service_id: req.service_id,
            fecha: req.fecha,
            foto_url: None,
            activo: req.activo,
        }
    }
}

// ============================================================================
// Admin listing
// ============================================================================

/// GET /portfolio/admin query string
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub activo: Option<bool>,
    pub service_id: Option<ServiceId>,
    pub search: Option<String>,
}

static LIST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    let mut fields = PageQuery::fields().to_vec();
    fields.extend([
        Field::boolean("activo"),
        service_id(),
        Field::string("search"),
    ]);
    Schema::new(fields)
});

impl Validate for PortfolioListQuery {
    fn schema() -> &'static Schema {
        &LIST_SCHEMA
    }
}

/// `{ "success": true }`
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
