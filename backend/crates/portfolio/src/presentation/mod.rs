//! Presentation Layer

pub mod dto;
pub mod form;
pub mod handlers;
pub mod router;

pub use handlers::PortfolioAppState;
pub use router::{portfolio_router, portfolio_router_generic};
