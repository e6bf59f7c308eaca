//! Human verification for public form submissions
//!
//! Tokens come from the Cloudflare Turnstile widget on the site. Any
//! failure to verify, including a missing secret or a network error,
//! counts as a failed challenge.

use serde::Deserialize;

pub const TURNSTILE_VERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[trait_variant::make(CaptchaVerifier: Send)]
pub trait LocalCaptchaVerifier {
    /// `true` only when the provider accepted the token.
    async fn verify(&self, token: &str) -> bool;
}

#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TurnstileVerifier {
    client: reqwest::Client,
    secret: Option<String>,
    endpoint: String,
}

impl TurnstileVerifier {
    pub fn new(client: reqwest::Client, secret: Option<String>) -> Self {
        Self {
            client,
            secret: secret.filter(|s| !s.trim().is_empty()),
            endpoint: TURNSTILE_VERIFY_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }
}

impl CaptchaVerifier for TurnstileVerifier {
    async fn verify(&self, token: &str) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            tracing::error!("TURNSTILE_SECRET_KEY is not set, rejecting captcha");
            return false;
        };
        if token.trim().is_empty() {
            return false;
        }

        let response = match self
            .client
            .post(&self.endpoint)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Turnstile request failed");
                return false;
            }
        };

        match response.json::<SiteverifyResponse>().await {
            Ok(body) if body.success => true,
            Ok(body) => {
                tracing::warn!(error_codes = ?body.error_codes, "Turnstile rejected token");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Turnstile response could not be read");
                false
            }
        }
    }
}
