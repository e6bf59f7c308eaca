//! Process configuration
//!
//! Everything the binary reads from the environment, resolved once at
//! startup. `from_lookup` takes the variable source as a closure so the
//! rules can be exercised without touching the process environment.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::mailer::DEFAULT_FROM;
use platform::store::StoreConfig;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BUCKET: &str = "portfolio";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub storage_bucket: String,
    pub auth: AuthConfig,
    /// Missing: every CAPTCHA check fails
    pub turnstile_secret: Option<String>,
    /// Missing: owner notifications are disabled
    pub resend_api_key: Option<String>,
    pub notification_email: Option<String>,
    pub mail_from: String,
    pub cors_origins: Vec<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).with_context(|| format!("{name} must be set"));

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let store = StoreConfig {
            anon_url: require("DATABASE_URL")?,
            // Checked when the pools connect.
            admin_url: get("DATABASE_ADMIN_URL"),
            max_connections,
        };

        let auth = match get("JWT_SECRET") {
            Some(secret) => AuthConfig::new(secret),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set"),
        };
        let auth = match get("JWT_EXPIRES_IN_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("JWT_EXPIRES_IN_SECS is not a number: {raw}"))?;
                auth.with_token_ttl(Duration::from_secs(secs))
            }
            None => auth,
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let cors_origins = get("CORS_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            store,
            supabase_url: require("SUPABASE_URL")?,
            supabase_service_key: require("SUPABASE_SERVICE_ROLE_KEY")?,
            storage_bucket: get("STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            auth,
            turnstile_secret: get("TURNSTILE_SECRET_KEY"),
            resend_api_key: get("RESEND_API_KEY"),
            notification_email: get("NOTIFICATION_EMAIL"),
            mail_from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_FROM.to_string()),
            cors_origins,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://anon@db/site"),
        ("DATABASE_ADMIN_URL", "postgres://admin@db/site"),
        ("SUPABASE_URL", "https://abc.supabase.co"),
        ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ("JWT_SECRET", "jwt-secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.store.max_connections, 5);
        assert_eq!(config.storage_bucket, "portfolio");
        assert_eq!(config.auth.token_ttl_secs(), 8 * 3600);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.mail_from, DEFAULT_FROM);
        assert!(config.turnstile_secret.is_none());
        assert!(config.notification_email.is_none());
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("JWT_EXPIRES_IN_SECS", "600"),
            ("CORS_ORIGIN", "https://disenoconalas.com, https://www.disenoconalas.com,"),
            ("PORT", "8080"),
            ("TURNSTILE_SECRET_KEY", "ts"),
            ("NOTIFICATION_EMAIL", "  "),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.store.max_connections, 12);
        assert_eq!(config.auth.token_ttl_secs(), 600);
        assert_eq!(
            config.cors_origins,
            vec!["https://disenoconalas.com", "https://www.disenoconalas.com"]
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.turnstile_secret.as_deref(), Some("ts"));
        assert!(config.notification_email.is_none());
    }

    #[test]
    fn test_missing_required_values_fail() {
        for skipped in ["DATABASE_URL", "SUPABASE_URL", "SUPABASE_SERVICE_ROLE_KEY"] {
            let pairs: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != skipped).collect();
            let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(err.to_string().contains(skipped), "{skipped}");
        }
    }

    #[test]
    fn test_admin_url_is_left_to_the_store() {
        let pairs: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "DATABASE_ADMIN_URL")
            .collect();
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert!(config.store.admin_url.is_none());
    }

    #[test]
    fn test_malformed_numbers_fail() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "http"));
        assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
    }
}
