//! Catalog Backend Module
//!
//! The services the business offers: public listing of the active ones,
//! and the operator's create, edit, reorder and delete.
//!
//! - `domain/` - Service entity, patch, repository trait
//! - `application/` - Use cases; the public listing is served from a TTL cache
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::ActiveServicesCache;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgServiceRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};
