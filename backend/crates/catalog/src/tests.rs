//! Scenario tests for the catalog crate

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use auth::{AuthConfig, Principal, TokenService};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use kernel::id::{AdminUserId, ServiceId};
use kernel::pagination::{PageRequest, SortOrder};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::ActiveServicesCache;
use crate::domain::entity::{ActiveService, NewService, Service, ServiceFilter, ServicePatch};
use crate::domain::repository::ServiceRepository;
use crate::presentation::router::catalog_router_generic;

// ============================================================================
// Fake repository
// ============================================================================

#[derive(Default)]
struct InMemoryServices {
    rows: Mutex<Vec<Service>>,
    active_reads: AtomicUsize,
    failing_ids: HashSet<ServiceId>,
}

impl InMemoryServices {
    fn seeded(rows: Vec<Service>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn snapshot(&self) -> Vec<Service> {
        self.rows.lock().unwrap().clone()
    }

    fn find(&self, id: ServiceId) -> Option<Service> {
        self.snapshot().into_iter().find(|s| s.id == id)
    }
}

impl ServiceRepository for Arc<InMemoryServices> {
    async fn list_active(&self) -> Result<Vec<ActiveService>, sqlx::Error> {
        self.active_reads.fetch_add(1, Ordering::SeqCst);
        let mut active: Vec<_> = self.snapshot().into_iter().filter(|s| s.activo).collect();
        active.sort_by_key(|s| s.orden);
        Ok(active.iter().map(ActiveService::from).collect())
    }

    async fn list(
        &self,
        filter: &ServiceFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Service>, i64), sqlx::Error> {
        if page.sort_field != "orden" {
            return Err(sqlx::Error::ColumnNotFound(page.sort_field.clone()));
        }
        let mut matching: Vec<_> = self
            .snapshot()
            .into_iter()
            .filter(|s| filter.matches(s))
            .collect();
        matching.sort_by_key(|s| s.orden);
        if page.sort_order == SortOrder::Desc {
            matching.reverse();
        }
        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((data, total))
    }

    async fn max_orden(&self) -> Result<Option<i32>, sqlx::Error> {
        Ok(self.snapshot().iter().map(|s| s.orden).max())
    }

    async fn insert(&self, service: &NewService) -> Result<(), sqlx::Error> {
        let now = Utc::now();
        self.rows.lock().unwrap().push(Service {
            id: ServiceId::new(),
            titulo: service.titulo.clone(),
            descripcion: service.descripcion.clone(),
            icono: service.icono.clone(),
            orden: service.orden,
            activo: service.activo,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn update(&self, id: ServiceId, patch: &ServicePatch) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        patch.apply(row, Utc::now());
        Ok(true)
    }

    async fn set_orden(&self, id: ServiceId, orden: i32) -> Result<(), sqlx::Error> {
        if self.failing_ids.contains(&id) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|s| s.id == id) {
            row.orden = orden;
        }
        Ok(())
    }

    async fn delete(&self, id: ServiceId) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }
}

// ============================================================================
// Harness
// ============================================================================

fn service(titulo: &str, orden: i32, activo: bool) -> Service {
    let created_at = Utc::now() - Duration::days(30);
    Service {
        id: ServiceId::new(),
        titulo: titulo.to_string(),
        descripcion: format!("Descripción de {titulo}"),
        icono: "FaPrint".to_string(),
        orden,
        activo,
        created_at,
        updated_at: created_at,
    }
}

fn tokens() -> TokenService {
    TokenService::new(&AuthConfig::new("catalog-tests"))
}

fn app(repo: &Arc<InMemoryServices>) -> Router {
    catalog_router_generic(
        Arc::clone(repo),
        Arc::new(ActiveServicesCache::default()),
        tokens(),
    )
}

fn bearer() -> String {
    let principal = Principal {
        id: AdminUserId::new(),
        email: "duena@disenoconalas.com".to_string(),
    };
    format!("Bearer {}", tokens().issue(&principal).unwrap())
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

fn public_get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|s| s["titulo"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Public listing and cache
// ============================================================================

#[tokio::test]
async fn test_public_list_is_active_by_orden_and_cached() {
    let repo = Arc::new(InMemoryServices::seeded(vec![
        service("Remeras", 2, true),
        service("Imprenta", 1, true),
        service("Oculto", 0, false),
    ]));
    let app = app(&repo);

    let (status, body) = send(app.clone(), public_get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Imprenta", "Remeras"]);
    assert!(body[0].get("activo").is_none());
    assert_eq!(body[0]["icono"], "FaPrint");

    let (_, again) = send(app, public_get("/")).await;
    assert_eq!(again, body);
    assert_eq!(repo.active_reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_write_invalidates_public_cache() {
    let repo = Arc::new(InMemoryServices::seeded(vec![service("Imprenta", 1, true)]));
    let app = app(&repo);

    let (_, before) = send(app.clone(), public_get("/")).await;
    assert_eq!(titles(&before), vec!["Imprenta"]);

    let (status, _) = send(
        app.clone(),
        authed(
            "POST",
            "/",
            Some(json!({ "titulo": "Souvenirs", "descripcion": "Para eventos", "icono": "FaGift" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send(app, public_get("/")).await;
    assert_eq!(titles(&after), vec!["Imprenta", "Souvenirs"]);
    assert_eq!(repo.active_reads.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_defaults_orden_and_activo() {
    let repo = Arc::new(InMemoryServices::default());
    let body = json!({ "titulo": "Imprenta", "descripcion": "Tarjetas", "icono": "FaPrint" });

    send(app(&repo), authed("POST", "/", Some(body.clone()))).await;
    send(app(&repo), authed("POST", "/", Some(body))).await;

    let rows = repo.snapshot();
    assert_eq!(rows.iter().map(|s| s.orden).collect::<Vec<_>>(), vec![1, 2]);
    assert!(rows.iter().all(|s| s.activo));

    let explicit = json!({
        "titulo": "Oculto", "descripcion": "x", "icono": "FaStar", "orden": 0, "activo": false
    });
    let (status, _) = send(app(&repo), authed("POST", "/", Some(explicit))).await;
    assert_eq!(status, StatusCode::OK);
    let hidden = repo.snapshot().into_iter().find(|s| s.titulo == "Oculto").unwrap();
    assert_eq!(hidden.orden, 0);
    assert!(!hidden.activo);
}

#[tokio::test]
async fn test_create_requires_auth_and_valid_body() {
    let repo = Arc::new(InMemoryServices::default());

    let req = Request::post("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"titulo":"x","descripcion":"y","icono":"z"}"#))
        .unwrap();
    let (status, _) = send(app(&repo), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let body = json!({ "titulo": "a".repeat(151), "icono": "FaTag", "orden": -1, "activo": "si" });
    let (status, body) = send(app(&repo), authed("POST", "/", Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["titulo", "descripcion", "orden", "activo"]);
    assert!(repo.snapshot().is_empty());
}

// ============================================================================
// Update and delete
// ============================================================================

#[tokio::test]
async fn test_partial_update_touches_only_sent_fields() {
    let original = service("Imprenta", 1, true);
    let id = original.id;
    let repo = Arc::new(InMemoryServices::seeded(vec![original.clone()]));

    let (status, body) = send(
        app(&repo),
        authed("PATCH", &format!("/{id}"), Some(json!({ "activo": false }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let stored = repo.find(id).unwrap();
    assert!(!stored.activo);
    assert_eq!(stored.titulo, original.titulo);
    assert!(stored.updated_at > original.updated_at);
}

#[tokio::test]
async fn test_empty_patch_is_a_no_op() {
    let original = service("Imprenta", 1, true);
    let id = original.id;
    let repo = Arc::new(InMemoryServices::seeded(vec![original.clone()]));

    let (status, _) = send(app(&repo), authed("PATCH", &format!("/{id}"), Some(json!({})))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repo.find(id).unwrap().updated_at, original.updated_at);
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let repo = Arc::new(InMemoryServices::default());
    let uri = format!("/{}", ServiceId::new());

    let (status, body) = send(app(&repo), authed("PATCH", &uri, Some(json!({ "titulo": "x" })))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Servicio no encontrado");

    let (status, _) = send(app(&repo), authed("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_row() {
    let doomed = service("Imprenta", 1, true);
    let id = doomed.id;
    let repo = Arc::new(InMemoryServices::seeded(vec![doomed, service("Remeras", 2, true)]));

    let (status, _) = send(app(&repo), authed("DELETE", &format!("/{id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(repo.find(id).is_none());
    assert_eq!(repo.snapshot().len(), 1);
}

// ============================================================================
// Reorder
// ============================================================================

#[tokio::test]
async fn test_reorder_applies_every_item_and_ignores_unknown_ids() {
    let a = service("A", 1, true);
    let b = service("B", 2, true);
    let (a_id, b_id) = (a.id, b.id);
    let repo = Arc::new(InMemoryServices::seeded(vec![a, b]));

    let body = json!([
        { "id": a_id.to_string(), "orden": 2 },
        { "id": b_id.to_string(), "orden": 1 },
        { "id": ServiceId::new().to_string(), "orden": 9 },
    ]);
    let (status, _) = send(app(&repo), authed("PATCH", "/reorder", Some(body))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(repo.find(a_id).unwrap().orden, 2);
    assert_eq!(repo.find(b_id).unwrap().orden, 1);
}

#[tokio::test]
async fn test_reorder_failure_surfaces_without_rollback() {
    let a = service("A", 1, true);
    let b = service("B", 2, true);
    let (a_id, b_id) = (a.id, b.id);
    let repo = Arc::new(InMemoryServices {
        rows: Mutex::new(vec![a, b]),
        failing_ids: HashSet::from([b_id]),
        ..Default::default()
    });

    let body = json!([
        { "id": a_id.to_string(), "orden": 5 },
        { "id": b_id.to_string(), "orden": 6 },
    ]);
    let (status, body) = send(app(&repo), authed("PATCH", "/reorder", Some(body))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "No se pudo reordenar los servicios");
    assert_eq!(repo.find(a_id).unwrap().orden, 5);
    assert_eq!(repo.find(b_id).unwrap().orden, 2);
}

#[tokio::test]
async fn test_reorder_validates_each_item() {
    let repo = Arc::new(InMemoryServices::default());
    let body = json!([
        { "id": ServiceId::new().to_string(), "orden": 1 },
        { "id": "nope", "orden": -3 },
    ]);

    let (status, body) = send(app(&repo), authed("PATCH", "/reorder", Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["1.id", "1.orden"]);
}

// ============================================================================
// Admin listing
// ============================================================================

#[tokio::test]
async fn test_admin_list_filters_and_paginates() {
    let rows: Vec<_> = (1..=5)
        .map(|i| service(&format!("S{i}"), i, i % 2 == 1))
        .collect();
    let repo = Arc::new(InMemoryServices::seeded(rows));

    let (status, body) = send(app(&repo), authed("GET", "/admin?limit=2&page=2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 2);
    let page: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["orden"].as_i64().unwrap())
        .collect();
    assert_eq!(page, vec![3, 4]);

    let (_, body) = send(app(&repo), authed("GET", "/admin?activo=false", None)).await;
    assert_eq!(body["total"], 2);
    assert!(body["data"].as_array().unwrap().iter().all(|s| s["activo"] == false));

    let (status, _) = send(app(&repo), public_get("/admin")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_list_searches_titles_ignoring_case() {
    let repo = Arc::new(InMemoryServices::seeded(vec![
        service("Imprenta digital", 1, true),
        service("Diseño de logos", 2, true),
        service("Stickers e IMPRENTA", 3, false),
    ]));

    let (status, body) = send(app(&repo), authed("GET", "/admin?search=imprenta", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let titles: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["titulo"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Imprenta digital", "Stickers e IMPRENTA"]);

    let (_, body) = send(
        app(&repo),
        authed("GET", "/admin?search=imprenta&activo=true", None),
    )
    .await;
    assert_eq!(body["total"], 1);
}
