use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Root greeting and health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

async fn root() -> &'static str {
    "Hello World! Server is running"
}

/// Verifies the storage backend answers.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state
        .store()
        .ping()
        .await
        .map_err(ApiError::storage("Storage backend unavailable"))?;

    Ok(Json(json!({
        "status": "ok",
        "storage": state.config().storage_backend.as_str(),
    })))
}
