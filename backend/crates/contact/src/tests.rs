//! Scenario tests for the contact crate

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use auth::{AuthConfig, Principal, TokenService};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use kernel::id::{AdminUserId, ContactId};
use kernel::pagination::{PageRequest, SortOrder};
use platform::captcha::CaptchaVerifier;
use platform::mailer::{MailError, Mailer, OutgoingEmail};
use platform::rate_limit::{InMemoryRateLimitStore, RateLimitConfig, RateLimiter};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::NotificationConfig;
use crate::application::notifier::ContactNotifier;
use crate::domain::entity::{ContactFilter, ContactMessage, NewContact};
use crate::domain::repository::ContactRepository;
use crate::presentation::router::contact_router_generic;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct InMemoryContacts {
    rows: Mutex<Vec<ContactMessage>>,
    fail_insert: bool,
}

impl InMemoryContacts {
    fn seeded(rows: Vec<ContactMessage>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_insert: false,
        }
    }

    fn snapshot(&self) -> Vec<ContactMessage> {
        self.rows.lock().unwrap().clone()
    }
}

impl ContactRepository for Arc<InMemoryContacts> {
    async fn insert(&self, contact: &NewContact) -> Result<(), sqlx::Error> {
        if self.fail_insert {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.rows.lock().unwrap().push(ContactMessage {
            id: ContactId::new(),
            nombre: contact.nombre.clone(),
            email: contact.email.clone(),
            telefono: contact.telefono.clone(),
            mensaje: contact.mensaje.clone(),
            respondido: false,
            respondido_at: None,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list(
        &self,
        filter: &ContactFilter,
        page: &PageRequest,
    ) -> Result<(Vec<ContactMessage>, i64), sqlx::Error> {
        if page.sort_field != "created_at" {
            return Err(sqlx::Error::ColumnNotFound(page.sort_field.clone()));
        }
        let mut matching: Vec<_> = self
            .snapshot()
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect();
        matching.sort_by(|a, b| {
            let by_date = match page.sort_order {
                SortOrder::Asc => a.created_at.cmp(&b.created_at),
                SortOrder::Desc => b.created_at.cmp(&a.created_at),
            };
            by_date.then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((data, total))
    }

    async fn set_respondido(
        &self,
        id: ContactId,
        respondido: bool,
        respondido_at: Option<DateTime<Utc>>,
    ) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };
        row.respondido = respondido;
        row.respondido_at = respondido_at;
        Ok(true)
    }
}

/// Accepts only the token `"ok"`.
#[derive(Clone, Default)]
struct FakeCaptcha {
    calls: Arc<AtomicUsize>,
}

impl CaptchaVerifier for FakeCaptcha {
    async fn verify(&self, token: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        token == "ok"
    }
}

#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    fail: bool,
}

impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::NotConfigured);
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    repo: Arc<InMemoryContacts>,
    captcha: FakeCaptcha,
    mailer: RecordingMailer,
}

impl Harness {
    fn new(repo: InMemoryContacts) -> Self {
        Self::with_mailer(repo, RecordingMailer::default())
    }

    fn with_mailer(repo: InMemoryContacts, mailer: RecordingMailer) -> Self {
        Self {
            repo: Arc::new(repo),
            captcha: FakeCaptcha::default(),
            mailer,
        }
    }

    fn app(&self) -> Router {
        let notifier = ContactNotifier::new(
            Arc::new(self.mailer.clone()),
            NotificationConfig::new(Some("duena@disenoconalas.com".to_string())),
        );
        let limiter = RateLimiter::new(
            "contact",
            vec![RateLimitConfig::per_minute(1000)],
            Arc::new(InMemoryRateLimitStore::new()),
        );
        contact_router_generic(
            Arc::clone(&self.repo),
            self.captcha.clone(),
            notifier,
            tokens(),
            limiter,
        )
    }

    fn emails(&self) -> Vec<OutgoingEmail> {
        self.mailer.sent.lock().unwrap().clone()
    }
}

fn tokens() -> TokenService {
    TokenService::new(&AuthConfig::new("contact-tests"))
}

fn bearer() -> String {
    let principal = Principal {
        id: AdminUserId::new(),
        email: "duena@disenoconalas.com".to_string(),
    };
    format!("Bearer {}", tokens().issue(&principal).unwrap())
}

fn message(respondido: bool, age: Duration) -> ContactMessage {
    let created_at = Utc::now() - age;
    ContactMessage {
        id: ContactId::new(),
        nombre: "Cliente".to_string(),
        email: "cliente@example.com".to_string(),
        telefono: "1155551234".to_string(),
        mensaje: None,
        respondido,
        respondido_at: respondido.then_some(created_at),
        created_at,
    }
}

fn submission(token: Option<&str>) -> Value {
    let mut body = json!({
        "nombre": "Ana",
        "email": "ana@example.com",
        "telefono": "+54 11 5555-1234",
        "mensaje": "Quiero tarjetas personales",
    });
    if let Some(token) = token {
        body["turnstileToken"] = json!(token);
    }
    body
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer());
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

// ============================================================================
// Submit
// ============================================================================

#[tokio::test]
async fn test_submit_stores_and_notifies() {
    let h = Harness::new(InMemoryContacts::default());

    let (status, body) = send(h.app(), post_json("/", submission(Some("ok")))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let rows = h.repo.snapshot();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].respondido);
    assert_eq!(rows[0].respondido_at, None);

    let emails = h.emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to, "duena@disenoconalas.com");
    assert_eq!(emails[0].subject, "Nueva consulta de Ana");
}

#[tokio::test]
async fn test_rejected_or_missing_captcha_inserts_nothing() {
    let h = Harness::new(InMemoryContacts::default());

    for token in [Some("forged"), None] {
        let (status, body) = send(h.app(), post_json("/", submission(token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "La verificación CAPTCHA falló. Intentá de nuevo.");
    }

    assert!(h.repo.snapshot().is_empty());
    assert!(h.emails().is_empty());
}

#[tokio::test]
async fn test_insert_failure_is_500_and_skips_notification() {
    let h = Harness::new(InMemoryContacts {
        fail_insert: true,
        ..Default::default()
    });

    let (status, body) = send(h.app(), post_json("/", submission(Some("ok")))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "No se pudo enviar el mensaje. Intentá de nuevo más tarde."
    );
    assert!(h.emails().is_empty());
}

#[tokio::test]
async fn test_mail_failure_does_not_change_result() {
    let h = Harness::with_mailer(
        InMemoryContacts::default(),
        RecordingMailer {
            fail: true,
            ..Default::default()
        },
    );

    let (status, _) = send(h.app(), post_json("/", submission(Some("ok")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.repo.snapshot().len(), 1);
}

#[tokio::test]
async fn test_invalid_submission_skips_captcha() {
    let h = Harness::new(InMemoryContacts::default());
    let body = json!({ "nombre": "", "email": "ana", "telefono": "abc", "turnstileToken": "ok" });

    let (status, body) = send(h.app(), post_json("/", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["nombre", "email", "telefono"]);
    assert_eq!(h.captcha.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_submit_is_rate_limited() {
    let h = Harness::new(InMemoryContacts::default());
    let limiter = RateLimiter::new(
        "contact",
        vec![RateLimitConfig::per_minute(3)],
        Arc::new(InMemoryRateLimitStore::new()),
    );
    let notifier = ContactNotifier::new(Arc::new(h.mailer.clone()), NotificationConfig::default());
    let app = contact_router_generic(
        Arc::clone(&h.repo),
        h.captcha.clone(),
        notifier,
        tokens(),
        limiter,
    );

    for _ in 0..3 {
        let (status, _) = send(app.clone(), post_json("/", submission(Some("ok")))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(app, post_json("/", submission(Some("ok")))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(h.repo.snapshot().len(), 3);
}

// ============================================================================
// Inbox
// ============================================================================

#[tokio::test]
async fn test_inbox_requires_token() {
    let h = Harness::new(InMemoryContacts::default());
    let req = Request::get("/").body(Body::empty()).unwrap();

    let (status, _) = send(h.app(), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_default_inbox_shows_recent_unanswered_only() {
    let recent = message(false, Duration::days(3));
    let recent_id = recent.id;
    let h = Harness::new(InMemoryContacts::seeded(vec![
        recent,
        message(false, Duration::days(240)),
        message(true, Duration::days(2)),
    ]));

    let (status, body) = send(h.app(), authed("GET", "/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["data"][0]["id"], recent_id.to_string());
}

#[tokio::test]
async fn test_explicit_filter_replaces_defaults() {
    let h = Harness::new(InMemoryContacts::seeded(vec![
        message(false, Duration::days(3)),
        message(false, Duration::days(240)),
        message(true, Duration::days(400)),
    ]));

    let (_, body) = send(h.app(), authed("GET", "/?respondido=true", None)).await;
    assert_eq!(body["total"], 1);

    let (_, body) = send(h.app(), authed("GET", "/?respondido=false", None)).await;
    assert_eq!(body["total"], 2);

    let (_, body) = send(h.app(), authed("GET", "/?startDate=2000-01-01", None)).await;
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_pages_cover_the_filtered_set() {
    let rows: Vec<_> = (0..25)
        .map(|i| message(false, Duration::hours(i)))
        .collect();
    let h = Harness::new(InMemoryContacts::seeded(rows));

    let mut seen = Vec::new();
    for page in 1..=3 {
        let uri = format!("/?respondido=false&page={page}&limit=10");
        let (status, body) = send(h.app(), authed("GET", &uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 25);
        seen.extend(
            body["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|row| row["id"].as_str().unwrap().to_string()),
        );
    }

    assert_eq!(seen.len(), 25);
    let mut unique = seen.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 25);
}

#[tokio::test]
async fn test_bad_query_is_400_and_unknown_sort_is_500() {
    let h = Harness::new(InMemoryContacts::default());

    let (status, body) = send(h.app(), authed("GET", "/?page=0&startDate=ayer", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let (status, body) = send(h.app(), authed("GET", "/?sortField=hackeado", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "No se pudieron obtener los mensajes");
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_respondido_controls_timestamp() {
    let row = message(false, Duration::days(1));
    let id = row.id;
    let h = Harness::new(InMemoryContacts::seeded(vec![row]));
    let uri = format!("/{id}");

    for respondido in [true, true, false, false] {
        let (status, body) = send(
            h.app(),
            authed("PATCH", &uri, Some(json!({ "respondido": respondido }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let stored = &h.repo.snapshot()[0];
        assert_eq!(stored.respondido, respondido);
        assert_eq!(stored.respondido_at.is_some(), respondido);
    }
}

#[tokio::test]
async fn test_update_unknown_or_malformed_id() {
    let h = Harness::new(InMemoryContacts::default());

    let uri = format!("/{}", ContactId::new());
    let (status, _) = send(h.app(), authed("PATCH", &uri, Some(json!({ "respondido": true })))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        h.app(),
        authed("PATCH", "/no-es-uuid", Some(json!({ "respondido": true }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/{}", ContactId::new());
    let (status, body) = send(h.app(), authed("PATCH", &uri, Some(json!({ "respondido": "si" })))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "respondido");
}
