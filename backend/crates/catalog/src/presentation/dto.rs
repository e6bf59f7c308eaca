//! API DTOs (Data Transfer Objects)

use std::sync::LazyLock;

use kernel::id::ServiceId;
use kernel::pagination::PageQuery;
use kernel::validation::{Field, Schema, Validate};
use serde::{Deserialize, Serialize};

use crate::application::CreateServiceInput;
use crate::domain::entity::{ReorderItem, ServicePatch};

fn titulo() -> Field {
    Field::string("titulo").max_length(150, "El título no puede superar los 150 caracteres")
}

fn descripcion() -> Field {
    Field::string("descripcion")
        .max_length(500, "La descripción no puede superar los 500 caracteres")
}

fn icono() -> Field {
    Field::string("icono").max_length(50, "El ícono no puede superar los 50 caracteres")
}

fn orden() -> Field {
    Field::integer("orden").min(0, "El orden debe ser mayor o igual a 0")
}

// ============================================================================
// Create
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceRequest {
    pub titulo: String,
    pub descripcion: String,
    pub icono: String,
    pub orden: Option<i32>,
    pub activo: Option<bool>,
}

static CREATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([
        titulo().required("El título es obligatorio"),
        descripcion().required("La descripción es obligatoria"),
        icono().required("El ícono es obligatorio"),
        orden(),
        Field::boolean("activo"),
    ])
});

impl Validate for CreateServiceRequest {
    fn schema() -> &'static Schema {
        &CREATE_SCHEMA
    }
}

impl From<CreateServiceRequest> for CreateServiceInput {
    fn from(req: CreateServiceRequest) -> Self {
        Self {
            titulo: req.titulo,
            descripcion: req.descripcion,
            icono: req.icono,
            orden: req.orden,
            activo: req.activo,
        }
    }
}

// ============================================================================
// Update
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateServiceRequest {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub icono: Option<String>,
    pub orden: Option<i32>,
    pub activo: Option<bool>,
}

static UPDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([
        titulo().not_empty("El título no puede estar vacío"),
        descripcion().not_empty("La descripción no puede estar vacía"),
        icono().not_empty("El ícono no puede estar vacío"),
        orden(),
        Field::boolean("activo"),
    ])
});

impl Validate for UpdateServiceRequest {
    fn schema() -> &'static Schema {
        &UPDATE_SCHEMA
    }
}

impl From<UpdateServiceRequest> for ServicePatch {
    fn from(req: UpdateServiceRequest) -> Self {
        Self {
            titulo: req.titulo,
            descripcion: req.descripcion,
            icono: req.icono,
            orden: req.orden,
            activo: req.activo,
        }
    }
}

// ============================================================================
// Reorder
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequestItem {
    pub id: ServiceId,
    pub orden: i32,
}

static REORDER_ITEM_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([
        Field::string("id")
            .required("El id es obligatorio")
            .uuid("El id debe ser un UUID válido"),
        orden().required("El orden es obligatorio"),
    ])
});

impl Validate for ReorderRequestItem {
    fn schema() -> &'static Schema {
        &REORDER_ITEM_SCHEMA
    }
}

impl From<ReorderRequestItem> for ReorderItem {
    fn from(item: ReorderRequestItem) -> Self {
        Self {
            id: item.id,
            orden: item.orden,
        }
    }
}

// ============================================================================
// Admin listing
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub activo: Option<bool>,
    pub search: Option<String>,
}

static LIST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    let mut fields = PageQuery::fields().to_vec();
    fields.extend([Field::boolean("activo"), Field::string("search")]);
    Schema::new(fields)
});

impl Validate for ServiceListQuery {
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
