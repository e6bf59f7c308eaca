//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::AdminUser;
use crate::error::AuthResult;

/// Admin user repository trait
#[trait_variant::make(AdminUserRepository: Send)]
pub trait LocalAdminUserRepository {
    /// Find an operator by exact email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<AdminUser>>;
}
