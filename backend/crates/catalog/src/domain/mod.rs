//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{ActiveService, NewService, ReorderItem, Service, ServiceFilter, ServicePatch};
pub use repository::ServiceRepository;
