//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{ContactFilter, ContactMessage, NewContact};
pub use repository::ContactRepository;
