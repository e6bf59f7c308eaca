//! API DTOs (Data Transfer Objects)

use std::sync::LazyLock;

use kernel::pagination::PageQuery;
use kernel::validation::{Field, Schema, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::entity::NewContact;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]{7,20}$").expect("phone pattern compiles"));

// ============================================================================
// Submit
// ============================================================================

/// Public contact form
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactRequest {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub mensaje: Option<String>,
    #[serde(rename = "turnstileToken")]
    pub turnstile_token: Option<String>,
}

static CREATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([
        Field::string("nombre").required("El nombre es obligatorio"),
        Field::string("email")
            .required("El email es obligatorio")
            .email("Email inválido"),
        Field::string("telefono")
            .required("El teléfono es obligatorio")
            .pattern(&PHONE_RE, "Número de teléfono inválido"),
        Field::string("mensaje"),
        Field::string("turnstileToken"),
    ])
});

impl Validate for CreateContactRequest {
    fn schema() -> &'static Schema {
        &CREATE_SCHEMA
    }
}

impl CreateContactRequest {
    pub fn into_parts(self) -> (NewContact, Option<String>) {
        let contact = NewContact {
            nombre: self.nombre,
            email: self.email,
            telefono: self.telefono,
            mensaje: self.mensaje,
        };
        (contact, self.turnstile_token)
    }
}

// ============================================================================
// Inbox
// ============================================================================

/// GET /contact query string
#[derive(Debug, Clone, Deserialize)]
pub struct ContactListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub respondido: Option<bool>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

static LIST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    let mut fields = PageQuery::fields().to_vec();
    fields.extend([
        Field::boolean("respondido"),
        Field::string("startDate").iso_date("startDate debe ser una fecha ISO 8601"),
        Field::string("endDate").iso_date("endDate debe ser una fecha ISO 8601"),
    ]);
    Schema::new(fields)
});

impl Validate for ContactListQuery {
    fn schema() -> &'static Schema {
        &LIST_SCHEMA
    }
}

/// PATCH /contact/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContactRequest {
    pub respondido: bool,
}

static UPDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([Field::boolean("respondido").required("El campo respondido es obligatorio")])
});

impl Validate for UpdateContactRequest {
    fn schema() -> &'static Schema {
        &UPDATE_SCHEMA
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
