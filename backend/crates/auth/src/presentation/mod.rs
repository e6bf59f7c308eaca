//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the principal extractor.

pub mod dto;
pub mod extractor;
pub mod handlers;
pub mod router;

pub use handlers::AuthAppState;
pub use router::{auth_router, auth_router_generic};
