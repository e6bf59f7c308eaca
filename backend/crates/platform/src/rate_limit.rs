//! Rate Limiting Infrastructure
//!
//! Fixed-window request counters keyed by scope, window and client
//! address, plus the axum middleware that enforces them. A scope may carry
//! several windows (e.g. per minute and per hour); a request must fit in
//! all of them.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::error::app_error::AppError;
use tokio::sync::Mutex;

use crate::client::request_client_ip;

/// Entries above this count trigger a sweep of expired windows.
const SWEEP_THRESHOLD: usize = 10_000;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, 60)
    }

    pub fn per_hour(max_requests: u32) -> Self {
        Self::new(max_requests, 3600)
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at_ms: i64,
}

/// Process-local counters. Good for a single instance only.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = Utc::now().timestamp_millis();
        let mut windows = self.windows.lock().await;

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, w| w.reset_at_ms > now_ms);
        }

        let fresh = Window {
            count: 0,
            reset_at_ms: now_ms + config.window_ms(),
        };
        let window = windows.entry(key.to_string()).or_insert(fresh);
        if now_ms >= window.reset_at_ms {
            *window = fresh;
        }

        if window.count >= config.max_requests {
            return Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms: window.reset_at_ms,
            });
        }

        window.count += 1;
        Ok(RateLimitResult {
            allowed: true,
            remaining: config.max_requests - window.count,
            reset_at_ms: window.reset_at_ms,
        })
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// A named set of windows sharing one store.
#[derive(Clone)]
pub struct RateLimiter {
    scope: &'static str,
    rules: Arc<[RateLimitConfig]>,
    store: Arc<InMemoryRateLimitStore>,
}

impl RateLimiter {
    pub fn new(
        scope: &'static str,
        rules: impl Into<Vec<RateLimitConfig>>,
        store: Arc<InMemoryRateLimitStore>,
    ) -> Self {
        let rules: Vec<RateLimitConfig> = rules.into();
        Self {
            scope,
            rules: rules.into(),
            store,
        }
    }

    /// Count one request from `client` against every window. Returns the
    /// millisecond timestamp when the caller may retry, if rejected.
    pub async fn hit(&self, client: Option<IpAddr>) -> Option<i64> {
        let client = client.map_or_else(|| "unknown".to_string(), |ip| ip.to_string());
        let mut retry_at = None;

        for rule in self.rules.iter() {
            let key = format!("{}:{}:{}", self.scope, rule.window.as_secs(), client);
            match RateLimitStore::check_and_increment(&*self.store, &key, rule).await {
                Ok(result) if !result.allowed => {
                    retry_at = Some(retry_at.map_or(result.reset_at_ms, |t: i64| t.max(result.reset_at_ms)));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, scope = self.scope, "Rate limit store failed, allowing request");
                }
            }
        }

        retry_at
    }
}

/// `axum::middleware::from_fn_with_state(limiter, rate_limit)`
pub async fn rate_limit(State(limiter): State<RateLimiter>, req: Request, next: Next) -> Response {
    let client = request_client_ip(&req);

    if let Some(retry_at_ms) = limiter.hit(client).await {
        tracing::warn!(
            scope = limiter.scope,
            client = ?client,
            "Rate limit exceeded"
        );

        let retry_secs = ((retry_at_ms - Utc::now().timestamp_millis()).max(0) + 999) / 1000;
        let mut response = AppError::too_many_requests("Demasiadas solicitudes")
            .with_action("Esperá unos minutos antes de volver a intentar")
            .into_response();
        if let Ok(value) = HeaderValue::from_str(&retry_secs.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    next.run(req).await
}
