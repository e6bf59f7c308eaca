//! Contact Backend Module
//!
//! Public contact form submissions and the operator inbox.
//!
//! - `domain/` - Contact message entity, listing filter, repository trait
//! - `application/` - Submit, list and mark-answered use cases, notifier
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Submissions must pass a CAPTCHA check before anything is stored. The
//! owner is emailed after a successful insert; that email is best effort.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::NotificationConfig;
pub use error::{ContactError, ContactResult};
pub use infra::postgres::PgContactRepository;
pub use presentation::router::{contact_router, contact_router_generic};
