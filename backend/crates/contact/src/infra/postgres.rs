//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::ContactId;
use kernel::pagination::PageRequest;
use platform::store::{AdminPool, AnonPool, push_page};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{ContactFilter, ContactMessage, NewContact};
use crate::domain::repository::ContactRepository;

const SORTABLE: &[&str] = &[
    "created_at",
    "nombre",
    "email",
    "telefono",
    "respondido",
    "respondido_at",
];

/// Inserts go through the restricted pool; the inbox needs the privileged
/// one.
#[derive(Clone)]
pub struct PgContactRepository {
    anon: AnonPool,
    admin: AdminPool,
}

impl PgContactRepository {
    pub fn new(anon: AnonPool, admin: AdminPool) -> Self {
        Self { anon, admin }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ContactFilter) {
    qb.push(" WHERE TRUE");
    if let Some(respondido) = filter.respondido {
        qb.push(" AND respondido = ").push_bind(respondido);
    }
    if let Some(start) = filter.start {
        qb.push(" AND created_at >= ").push_bind(start);
    }
    if let Some(end) = filter.end {
        qb.push(" AND created_at <= ").push_bind(end);
    }
}

impl ContactRepository for PgContactRepository {
    async fn insert(&self, contact: &NewContact) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO contacts (nombre, email, telefono, mensaje)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&contact.nombre)
        .bind(&contact.email)
        .bind(&contact.telefono)
        .bind(&contact.mensaje)
        .execute(self.anon.pool())
        .await?;

        Ok(())
    }

    async fn list(
        &self,
        filter: &ContactFilter,
        page: &PageRequest,
    ) -> Result<(Vec<ContactMessage>, i64), sqlx::Error> {
        let mut qb = QueryBuilder::new(
            "SELECT id, nombre, email, telefono, mensaje, respondido, respondido_at, created_at \
             FROM contacts",
        );
        push_filters(&mut qb, filter);
        push_page(&mut qb, SORTABLE, page)?;
        let rows = qb
            .build_query_as::<ContactRow>()
            .fetch_all(self.admin.pool())
            .await?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM contacts");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.admin.pool())
            .await?;

        Ok((rows.into_iter().map(ContactRow::into_message).collect(), total))
    }

    async fn set_respondido(
        &self,
        id: ContactId,
        respondido: bool,
        respondido_at: Option<DateTime<Utc>>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET respondido = $2, respondido_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .bind(respondido)
        .bind(respondido_at)
        .execute(self.admin.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    nombre: String,
    email: String,
    telefono: String,
    mensaje: Option<String>,
    respondido: bool,
    respondido_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_message(self) -> ContactMessage {
        ContactMessage {
            id: self.id.into(),
            nombre: self.nombre,
            email: self.email,
            telefono: self.telefono,
            mensaje: self.mensaje,
            respondido: self.respondido,
            respondido_at: self.respondido_at,
            created_at: self.created_at,
        }
    }
}
