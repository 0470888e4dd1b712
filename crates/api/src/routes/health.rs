use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Full health check, including store connectivity.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::Internal(format!("store health check failed: {e}")))?;

    Ok(Json(json!({
        "status": "ok",
        "store": "connected",
    })))
}

/// Lightweight ping without a store check.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Welcome to the book site API" }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn health_reports_store() {
        let app = TestApp::new();
        let (status, body) = app.send(app.empty(Method::GET, "/health", false)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["store"], "connected");
    }
}
