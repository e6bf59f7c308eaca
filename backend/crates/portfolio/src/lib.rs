//! Portfolio Backend Module
//!
//! Finished jobs shown on the public site, each linked to the service it
//! belongs to and optionally illustrated with a photo kept in object
//! storage.
//!
//! - `domain/` - Portfolio item entity, patch, repository trait
//! - `application/` - Use cases; image upload and cleanup happen here
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, multipart form extractor, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::ActivePortfolioCache;
pub use error::{PortfolioError, PortfolioResult};
pub use infra::postgres::PgPortfolioRepository;
pub use presentation::router::{portfolio_router, portfolio_router_generic};
