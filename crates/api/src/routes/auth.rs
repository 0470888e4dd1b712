use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use book_site_core::auth::{issue_token, verify_password};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// Exchange the configured admin credentials for a bearer token.
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(login) = body?;
    let config = state.config();
    let (Some(admin_email), Some(password_hash), Some(secret)) = (
        config.admin_email.as_deref(),
        config.admin_password_hash.as_deref(),
        config.jwt_secret.as_deref(),
    ) else {
        tracing::warn!("login attempted but no admin credentials are configured");
        return Err(ApiError::Unauthorized);
    };

    if login.email.trim().to_lowercase() != admin_email {
        return Err(ApiError::Unauthorized);
    }
    verify_password(&login.password, password_hash)?;

    let ttl = chrono::Duration::hours(config.token_ttl_hours);
    let token = issue_token(admin_email, secret, ttl)?;
    tracing::info!(email = %admin_email, "admin logged in");
    Ok(Json(json!({
        "token": token,
        "expiresIn": ttl.num_seconds(),
    })))
}

async fn me(admin: AdminUser) -> Json<Value> {
    Json(json!({ "email": admin.subject }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use book_site_core::auth::{hash_password, issue_token};
    use serde_json::json;

    use crate::config::AppConfig;
    use crate::routes::test_support::{test_config, TestApp};

    fn app_with_admin() -> TestApp {
        TestApp::with_config(AppConfig {
            admin_email: Some("admin@example.com".into()),
            admin_password_hash: Some(hash_password("hunter22").unwrap()),
            ..test_config()
        })
    }

    fn bearer_get(uri: &str, token: &str) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn login_issues_a_usable_token() {
        let app = app_with_admin();
        let (status, body) = app
            .send(app.json(
                Method::POST,
                "/api/auth/login",
                json!({ "email": " Admin@Example.com", "password": "hunter22" }),
                false,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = app.send(bearer_get("/api/auth/me", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "admin@example.com");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = app_with_admin();
        let (status, body) = app
            .send(app.json(
                Method::POST,
                "/api/auth/login",
                json!({ "email": "admin@example.com", "password": "nope" }),
                false,
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "unauthorized");
    }

    #[tokio::test]
    async fn admin_routes_require_a_token() {
        let app = TestApp::new();
        let (status, _) = app.send(app.empty(Method::GET, "/api/auth/me", false)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.send(bearer_get("/api/auth/me", "not.a.jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let app = TestApp::new();
        let forged = issue_token(
            "attacker",
            "dev-secret-change-me-in-production",
            chrono::Duration::hours(1),
        )
        .unwrap();
        let (status, _) = app
            .send(bearer_get("/api/email-subscribers", &forged))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_secret_disables_admin_routes_and_login() {
        let app = TestApp::with_config(AppConfig {
            admin_email: Some("admin@example.com".into()),
            admin_password_hash: Some(hash_password("hunter22").unwrap()),
            ..AppConfig::default()
        });
        let token = issue_token("admin@example.com", "any-secret", chrono::Duration::hours(1)).unwrap();
        let (status, _) = app
            .send(bearer_get("/api/email-subscribers", &token))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .send(app.json(
                Method::POST,
                "/api/auth/login",
                json!({ "email": "admin@example.com", "password": "hunter22" }),
                false,
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
