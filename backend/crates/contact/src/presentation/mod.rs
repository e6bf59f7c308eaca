//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ContactAppState;
pub use router::{contact_router, contact_router_generic};
