//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::PortfolioItemId;
use kernel::pagination::PageRequest;
use platform::store::{AdminPool, AnonPool, push_contains, push_page};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{
    ActivePortfolioItem, LinkedService, NewPortfolioItem, PortfolioEntry, PortfolioFilter,
    PortfolioItem, PortfolioPatch,
};
use crate::domain::repository::PortfolioRepository;

const SORTABLE: &[&str] = &["fecha", "titulo", "activo", "created_at", "updated_at"];

const COLUMNS: &str = "p.id, p.titulo, p.descripcion, p.service_id, p.fecha, p.foto_url, \
                       p.activo, p.created_at, p.updated_at";

const FROM_JOINED: &str = " FROM portfolio p LEFT JOIN services s ON s.id = p.service_id";

/// Public reads use the restricted pool, everything else the privileged one.
#[derive(Clone)]
pub struct PgPortfolioRepository {
    anon: AnonPool,
    admin: AdminPool,
}

impl PgPortfolioRepository {
    pub fn new(anon: AnonPool, admin: AdminPool) -> Self {
        Self { anon, admin }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &PortfolioFilter) {
    qb.push(" WHERE TRUE");
    if let Some(activo) = filter.activo {
        qb.push(" AND p.activo = ").push_bind(activo);
    }
    if let Some(service_id) = filter.service_id {
        qb.push(" AND p.service_id = ").push_bind(service_id.into_uuid());
    }
    if let Some(search) = &filter.search {
        push_contains(qb, "p.titulo", search);
    }
}

/// `UPDATE portfolio SET updated_at = $1, <present members> WHERE id = $n`
fn build_update(
    id: PortfolioItemId,
    patch: &PortfolioPatch,
    now: DateTime<Utc>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE portfolio SET updated_at = ");
    qb.push_bind(now);
    if let Some(titulo) = &patch.titulo {
        qb.push(", titulo = ").push_bind(titulo.clone());
    }
    if let Some(descripcion) = &patch.descripcion {
        qb.push(", descripcion = ").push_bind(descripcion.clone());
    }
    if let Some(service_id) = patch.service_id {
        qb.push(", service_id = ").push_bind(service_id.into_uuid());
    }
    if let Some(fecha) = patch.fecha {
        qb.push(", fecha = ").push_bind(fecha);
    }
    if let Some(foto_url) = &patch.foto_url {
        qb.push(", foto_url = ").push_bind(foto_url.clone());
    }
    if let Some(activo) = patch.activo {
        qb.push(", activo = ").push_bind(activo);
    }
    qb.push(" WHERE id = ").push_bind(id.into_uuid());
    qb
}

impl PortfolioRepository for PgPortfolioRepository {
    async fn list_active(&self) -> Result<Vec<ActivePortfolioItem>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ActiveRow>(&format!(
            "SELECT p.id, p.titulo, p.descripcion, p.foto_url, p.fecha, \
             COALESCE(s.titulo, '') AS categoria{FROM_JOINED} \
             WHERE p.activo = TRUE ORDER BY p.fecha DESC, p.id ASC"
        ))
        .fetch_all(self.anon.pool())
        .await?;

        Ok(rows.into_iter().map(ActiveRow::into_active).collect())
    }

    async fn list(
        &self,
        filter: &PortfolioFilter,
        page: &PageRequest,
    ) -> Result<(Vec<PortfolioEntry>, i64), sqlx::Error> {
        // Sort names resolve against the select list, where only the
        // portfolio columns carry their bare names.
        let mut qb = QueryBuilder::new(format!(
            "SELECT {COLUMNS}, s.titulo AS servicio_titulo{FROM_JOINED}"
        ));
        push_filters(&mut qb, filter);
        push_page(&mut qb, SORTABLE, page)?;
        let rows = qb
            .build_query_as::<EntryRow>()
            .fetch_all(self.admin.pool())
            .await?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM portfolio p");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.admin.pool())
            .await?;

        Ok((rows.into_iter().map(EntryRow::into_entry).collect(), total))
    }

    async fn find(&self, id: PortfolioItemId) -> Result<Option<PortfolioItem>, sqlx::Error> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {COLUMNS} FROM portfolio p WHERE p.id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(self.admin.pool())
        .await?;

        Ok(row.map(ItemRow::into_item))
    }

    async fn insert(&self, item: &NewPortfolioItem) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO portfolio (titulo, descripcion, service_id, fecha, foto_url, activo)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&item.titulo)
        .bind(&item.descripcion)
        .bind(item.service_id.into_uuid())
        .bind(item.fecha)
        .bind(&item.foto_url)
        .bind(item.activo)
        .execute(self.admin.pool())
        .await?;

        Ok(())
    }

    async fn update(&self, id: PortfolioItemId, patch: &PortfolioPatch) -> Result<bool, sqlx::Error> {
        let result = build_update(id, patch, Utc::now())
            .build()
            .execute(self.admin.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: PortfolioItemId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio WHERE id = $1")
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
struct ItemRow {
    id: Uuid,
    titulo: String,
    descripcion: Option<String>,
    service_id: Uuid,
    fecha: NaiveDate,
    foto_url: Option<String>,
    activo: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self) -> PortfolioItem {
        PortfolioItem {
            id: self.id.into(),
            titulo: self.titulo,
            descripcion: self.descripcion,
            service_id: self.service_id.into(),
            fecha: self.fecha,
            foto_url: self.foto_url,
            activo: self.activo,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    #[sqlx(flatten)]
    item: ItemRow,
    servicio_titulo: Option<String>,
}

impl EntryRow {
    fn into_entry(self) -> PortfolioEntry {
        PortfolioEntry {
            item: self.item.into_item(),
            services: self.servicio_titulo.map(|titulo| LinkedService { titulo }),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ActiveRow {
    id: Uuid,
    titulo: String,
    descripcion: Option<String>,
    foto_url: Option<String>,
    fecha: NaiveDate,
    categoria: String,
}

impl ActiveRow {
    fn into_active(self) -> ActivePortfolioItem {
        ActivePortfolioItem {
            id: self.id.into(),
            titulo: self.titulo,
            descripcion: self.descripcion,
            foto_url: self.foto_url,
            fecha: self.fecha,
            categoria: self.categoria,
        }
    }
}
