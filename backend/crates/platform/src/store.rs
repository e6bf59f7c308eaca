//! Relational store handles
//!
//! The hosted database is reached with two credential sets: a restricted
//! role for public reads and contact inserts, and a privileged role for
//! everything an operator does. Each gets its own pool and its own
//! newtype, so a repository's constructor states which capability it holds.

use kernel::pagination::PageRequest;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("privileged database credentials are not configured (DATABASE_ADMIN_URL)")]
    MissingAdminCredentials,

    #[error("failed to connect to the {role} database pool: {source}")]
    Connect {
        role: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Restricted-role pool.
#[derive(Clone, Debug)]
pub struct AnonPool(PgPool);

/// Privileged-role pool.
#[derive(Clone, Debug)]
pub struct AdminPool(PgPool);

impl AnonPool {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.0
    }
}

impl AdminPool {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub anon_url: String,
    pub admin_url: Option<String>,
    pub max_connections: u32,
}

/// Owns both pools.
#[derive(Clone, Debug)]
pub struct StoreClient {
    anon: AnonPool,
    admin: AdminPool,
}

impl StoreClient {
    /// Connect both pools. Fails before any connection attempt when the
    /// privileged credentials are absent.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let admin_url = config
            .admin_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(StoreError::MissingAdminCredentials)?;

        let anon = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.anon_url)
            .await
            .map_err(|source| StoreError::Connect { role: "anon", source })?;

        let admin = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(admin_url)
            .await
            .map_err(|source| StoreError::Connect { role: "admin", source })?;

        tracing::info!(max_connections = config.max_connections, "Connected to database");

        Ok(Self {
            anon: AnonPool(anon),
            admin: AdminPool(admin),
        })
    }

    pub fn anon(&self) -> AnonPool {
        self.anon.clone()
    }

    pub fn admin(&self) -> AdminPool {
        self.admin.clone()
    }
}

/// Append ` AND <column> ILIKE $n ESCAPE '\'` matching `needle` as a literal
/// case-insensitive substring. `%`, `_` and `\` in the needle match only
/// themselves.
pub fn push_contains(qb: &mut QueryBuilder<'_, Postgres>, column: &str, needle: &str) {
    qb.push(format!(" AND {column} ILIKE "))
        .push_bind(contains_pattern(needle))
        .push(" ESCAPE '\\'");
}

fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append `ORDER BY <column> <dir>, id ASC LIMIT $n OFFSET $m`.
///
/// `sortable` lists the columns callers may sort by. Any other name fails
/// with `ColumnNotFound`, the same outcome as sending it to the database.
pub fn push_page(
    qb: &mut QueryBuilder<'_, Postgres>,
    sortable: &[&str],
    page: &PageRequest,
) -> Result<(), sqlx::Error> {
    let column = sortable
        .iter()
        .find(|c| **c == page.sort_field)
        .ok_or_else(|| sqlx::Error::ColumnNotFound(page.sort_field.clone()))?;

    qb.push(format!(" ORDER BY {column} {}, id ASC", page.sort_order.as_sql()))
        .push(" LIMIT ")
        .push_bind(page.limit_i64())
        .push(" OFFSET ")
        .push_bind(page.offset());
    Ok(())
}
