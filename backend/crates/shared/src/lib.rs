//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The unified wire error ([`error::app_error::AppError`]) and its kinds
//! - Typed UUID identifiers for every stored entity
//! - Schema-based validation of inbound payloads
//! - Pagination primitives shared by the listing endpoints
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod pagination;
pub mod time;
pub mod validation;
