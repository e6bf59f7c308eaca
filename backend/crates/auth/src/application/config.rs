//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Token lifetime when `JWT_EXPIRES_IN_SECS` is not set (8 hours).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(8 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 signing
    pub jwt_secret: String,
    /// Lifetime of an issued token
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Fixed secret for local runs. Never use outside debug builds.
    pub fn development() -> Self {
        Self::new("development-only-jwt-secret-change-me")
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
