//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the feature crates:
//! - Database pools for the restricted and privileged roles
//! - Password hashing (Argon2id, legacy bcrypt verification)
//! - Rate limiting middleware and client address resolution
//! - TTL read cache
//! - Outbound integrations: object storage, captcha, email

pub mod cache;
pub mod captcha;
pub mod client;
pub mod image;
pub mod mailer;
pub mod password;
pub mod rate_limit;
pub mod storage;
pub mod store;
