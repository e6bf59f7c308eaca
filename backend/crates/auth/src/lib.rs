//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin user entity, principal, repository trait
//! - `application/` - Login use case and token service
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs, router, principal extractor
//!
//! ## Features
//! - Operator login with email + password
//! - Stateless HS256 bearer tokens with a fixed lifetime
//! - `Principal` extractor that gates every admin route
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; legacy bcrypt hashes still verify
//! - Unknown email and wrong password are indistinguishable to the caller
//! - No refresh and no revocation: a token is valid until it expires

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use domain::entity::Principal;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAdminUserRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
