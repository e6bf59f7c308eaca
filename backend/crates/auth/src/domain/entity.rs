//! Admin user and authenticated principal

use kernel::id::AdminUserId;

/// Operator account. Seeded out of band and only read at runtime.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    /// Login key, matched exactly.
    pub email: String,
    /// Stored PHC string (Argon2id) or legacy bcrypt hash.
    pub password_hash: String,
    pub nombre: String,
}

impl AdminUser {
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: AdminUserId,
    pub email: String,
}
