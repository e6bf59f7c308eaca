//! Liveness endpoint

use axum::Json;
use axum::extract::State;
use kernel::error::app_error::AppError;
use platform::store::AnonPool;
use serde_json::{Value, json};

/// GET /health: `{ "status": "ok" }` once the restricted pool answers.
pub async fn health(State(pool): State<AnonPool>) -> Result<Json<Value>, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool.pool())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Health check failed");
            AppError::service_unavailable("Base de datos no disponible").with_source(e)
        })?;

    Ok(Json(json!({ "status": "ok" })))
}
