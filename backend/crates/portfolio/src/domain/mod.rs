//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{
    ActivePortfolioItem, LinkedService, NewPortfolioItem, PortfolioEntry, PortfolioFilter,
    PortfolioItem, PortfolioPatch,
};
pub use repository::PortfolioRepository;
