//! API DTOs (Data Transfer Objects)

use std::sync::LazyLock;

use kernel::id::AdminUserId;
use kernel::validation::{Field, Schema, Validate};
use serde::{Deserialize, Serialize};

use crate::domain::entity::AdminUser;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

static LOGIN_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new([
        Field::string("email")
            .required("El email es obligatorio")
            .email("Email inválido")
            .max_length(254, "El email no puede superar los 254 caracteres"),
        Field::string("password")
            .required("La contraseña es obligatoria")
            .type_message("La contraseña debe ser texto")
            .max_length(128, "La contraseña no puede superar los 128 caracteres"),
    ])
});

impl Validate for LoginRequest {
    fn schema() -> &'static Schema {
        &LOGIN_SCHEMA
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AdminProfile,
}

/// Public view of the logged-in operator
#[derive(Debug, Clone, Serialize)]
pub struct AdminProfile {
    pub id: AdminUserId,
    pub email: String,
    pub nombre: String,
}

impl From<AdminUser> for AdminProfile {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nombre: user.nombre,
        }
    }
}
