//! Bearer token issuing and verification
//!
//! HS256 JWTs carrying `{sub, email, iat, exp}`. Expiry is checked with
//! zero leeway. There is no server-side state.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::Principal;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    pub fn issue(&self, principal: &Principal) -> AuthResult<String> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if signed at `now`.
    pub fn issue_at(&self, principal: &Principal, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: principal.id.to_string(),
            email: principal.email.clone(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::TokenEncoding)
    }

    pub fn verify(&self, token: &str) -> AuthResult<Principal> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AuthError::InvalidToken
            })?;

        let id = data.claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(Principal {
            id,
            email: data.claims.email,
        })
    }
}
