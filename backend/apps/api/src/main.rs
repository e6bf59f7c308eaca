//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{PgAdminUserRepository, TokenService, auth_router};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::get,
};
use catalog::{ActiveServicesCache, PgServiceRepository, catalog_router};
use contact::application::notifier::ContactNotifier;
use contact::{NotificationConfig, PgContactRepository, contact_router};
use platform::captcha::TurnstileVerifier;
use platform::mailer::ResendMailer;
use platform::rate_limit::{InMemoryRateLimitStore, RateLimitConfig, RateLimiter, rate_limit};
use platform::storage::SupabaseStorage;
use platform::store::StoreClient;
use portfolio::{ActivePortfolioCache, PgPortfolioRepository, portfolio_router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,contact=info,catalog=info,portfolio=info,platform=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database: restricted and privileged pools
    let store = StoreClient::connect(&config.store).await?;

    // Outbound collaborators share one HTTP client
    let http = reqwest::Client::new();
    let captcha = TurnstileVerifier::new(http.clone(), config.turnstile_secret.clone());
    if !captcha.is_configured() {
        tracing::warn!("TURNSTILE_SECRET_KEY not set, every contact submission will be rejected");
    }
    let mailer = ResendMailer::new(
        http.clone(),
        config.resend_api_key.clone(),
        config.mail_from.clone(),
    );
    let notifier = ContactNotifier::new(
        Arc::new(mailer),
        NotificationConfig::new(config.notification_email.clone()),
    );
    let storage = SupabaseStorage::new(
        http,
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
        config.storage_bucket.clone(),
    );

    let tokens = TokenService::new(&config.auth);

    // Rate limiting: one store, three scopes
    let limits = Arc::new(InMemoryRateLimitStore::new());
    let global_limiter = RateLimiter::new(
        "global",
        vec![RateLimitConfig::per_minute(10), RateLimitConfig::per_hour(50)],
        Arc::clone(&limits),
    );
    let login_limiter = RateLimiter::new(
        "login",
        vec![RateLimitConfig::per_minute(5), RateLimitConfig::per_hour(20)],
        Arc::clone(&limits),
    );
    let contact_limiter = RateLimiter::new(
        "contact",
        vec![RateLimitConfig::per_minute(3), RateLimitConfig::per_hour(10)],
        limits,
    );

    // Public listing caches
    let services_cache = Arc::new(ActiveServicesCache::default());
    let portfolio_cache = Arc::new(ActivePortfolioCache::default());

    // CORS configuration
    let allowed_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .route("/health", get(health::health).with_state(store.anon()))
        .nest(
            "/auth",
            auth_router(
                PgAdminUserRepository::new(store.admin()),
                tokens.clone(),
                login_limiter,
            ),
        )
        .nest(
            "/contact",
            contact_router(
                PgContactRepository::new(store.anon(), store.admin()),
                captcha,
                notifier,
                tokens.clone(),
                contact_limiter,
            ),
        )
        .nest(
            "/services",
            catalog_router(
                PgServiceRepository::new(store.anon(), store.admin()),
                services_cache,
                tokens.clone(),
            ),
        )
        .nest(
            "/portfolio",
            portfolio_router(
                PgPortfolioRepository::new(store.anon(), store.admin()),
                storage,
                portfolio_cache,
                tokens,
            ),
        )
        .layer(from_fn_with_state(global_limiter, rate_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
