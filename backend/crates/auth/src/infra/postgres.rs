//! PostgreSQL Repository Implementations

use platform::store::AdminPool;
use uuid::Uuid;

use crate::domain::entity::AdminUser;
use crate::domain::repository::AdminUserRepository;
use crate::error::AuthResult;

/// PostgreSQL-backed admin user repository. Reads through the privileged
/// pool; the restricted role cannot see `admin_users`.
#[derive(Clone)]
pub struct PgAdminUserRepository {
    pool: AdminPool,
}

impl PgAdminUserRepository {
    pub fn new(pool: AdminPool) -> Self {
        Self { pool }
    }
}

impl AdminUserRepository for PgAdminUserRepository {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<AdminUser>> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            r#"
            SELECT
                id,
                email,
                password_hash,
                nombre
            FROM admin_users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(row.map(AdminUserRow::into_admin_user))
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminUserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    nombre: Option<String>,
}

impl AdminUserRow {
    fn into_admin_user(self) -> AdminUser {
        AdminUser {
            id: self.id.into(),
            email: self.email,
            password_hash: self.password_hash,
            nombre: self.nombre.unwrap_or_default(),
        }
    }
}
