//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::ServiceId;
use kernel::pagination::PageRequest;
use platform::store::{AdminPool, AnonPool, push_contains, push_page};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{ActiveService, NewService, Service, ServiceFilter, ServicePatch};
use crate::domain::repository::ServiceRepository;

const SORTABLE: &[&str] = &["orden", "titulo", "activo", "created_at", "updated_at"];

const COLUMNS: &str = "id, titulo, descripcion, icono, orden, activo, created_at, updated_at";

/// Public reads use the restricted pool, everything else the privileged one.
#[derive(Clone)]
pub struct PgServiceRepository {
    anon: AnonPool,
    admin: AdminPool,
}

impl PgServiceRepository {
    pub fn new(anon: AnonPool, admin: AdminPool) -> Self {
        Self { anon, admin }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ServiceFilter) {
    qb.push(" WHERE TRUE");
    if let Some(activo) = filter.activo {
        qb.push(" AND activo = ").push_bind(activo);
    }
    if let Some(search) = &filter.search {
        push_contains(qb, "titulo", search);
    }
}

/// `UPDATE services SET updated_at = $1, <present members> WHERE id = $n`
fn build_update(
    id: ServiceId,
    patch: &ServicePatch,
    now: DateTime<Utc>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE services SET updated_at = ");
    qb.push_bind(now);
    if let Some(titulo) = &patch.titulo {
        qb.push(", titulo = ").push_bind(titulo.clone());
    }
    if let Some(descripcion) = &patch.descripcion {
        qb.push(", descripcion = ").push_bind(descripcion.clone());
    }
    if let Some(icono) = &patch.icono {
        qb.push(", icono = ").push_bind(icono.clone());
    }
    if let Some(orden) = patch.orden {
        qb.push(", orden = ").push_bind(orden);
    }
    if let Some(activo) = patch.activo {
        qb.push(", activo = ").push_bind(activo);
    }
    qb.push(" WHERE id = ").push_bind(id.into_uuid());
    qb
}

impl ServiceRepository for PgServiceRepository {
    async fn list_active(&self) -> Result<Vec<ActiveService>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {COLUMNS} FROM services WHERE activo = TRUE ORDER BY orden ASC, id ASC"
        ))
        .fetch_all(self.anon.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ActiveService::from(&row.into_service()))
            .collect())
    }

    async fn list(
        &self,
        filter: &ServiceFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Service>, i64), sqlx::Error> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM services"));
        push_filters(&mut qb, filter);
        push_page(&mut qb, SORTABLE, page)?;
        let rows = qb
            .build_query_as::<ServiceRow>()
            .fetch_all(self.admin.pool())
            .await?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM services");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.admin.pool())
            .await?;

        Ok((rows.into_iter().map(ServiceRow::into_service).collect(), total))
    }

    async fn max_orden(&self) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(orden) FROM services")
            .fetch_one(self.admin.pool())
            .await
    }

    async fn insert(&self, service: &NewService) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO services (titulo, descripcion, icono, orden, activo)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&service.titulo)
        .bind(&service.descripcion)
        .bind(&service.icono)
        .bind(service.orden)
        .bind(service.activo)
        .execute(self.admin.pool())
        .await?;

        Ok(())
    }

    async fn update(&self, id: ServiceId, patch: &ServicePatch) -> Result<bool, sqlx::Error> {
        let result = build_update(id, patch, Utc::now())
            .build()
            .execute(self.admin.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_orden(&self, id: ServiceId, orden: i32) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE services SET orden = $2, updated_at = $3 WHERE id = $1")
            .bind(id.into_uuid())
            .bind(orden)
            .bind(Utc::now())
            .execute(self.admin.pool())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: ServiceId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id.into_uuid())
            .execute(self.admin.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    titulo: String,
    descripcion: String,
    icono: String,
    orden: i32,
    activo: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ServiceRow {
    fn into_service(self) -> Service {
        Service {
            id: self.id.into(),
            titulo: self.titulo,
            descripcion: self.descripcion,
            icono: self.icono,
            orden: self.orden,
            activo: self.activo,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_writes_only_present_members() {
        let patch = ServicePatch {
            titulo: Some("Sublimación".to_string()),
            activo: Some(false),
            ..Default::default()
        };
        let qb = build_update(ServiceId::new(), &patch, Utc::now());

        assert_eq!(
            qb.sql(),
            "UPDATE services SET updated_at = $1, titulo = $2, activo = $3 WHERE id = $4"
        );
    }

    #[test]
    fn test_filters_bind_in_order() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM services");
        push_filters(
            &mut qb,
            &ServiceFilter {
                activo: Some(true),
                search: Some("imprenta".to_string()),
            },
        );
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM services WHERE TRUE AND activo = $1 \
             AND titulo ILIKE $2 ESCAPE '\\'"
        );
    }
}
