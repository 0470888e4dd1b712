use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use book_site_core::store::StoreError;
use book_site_core::subscriber::model::{EmailSubscriber, SubscribeRequest};
use book_site_core::validate::ValidationError;
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/email-subscribers", get(list_subscribers).post(subscribe))
}

async fn list_subscribers(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<EmailSubscriber>>> {
    Ok(Json(state.subscribers().list().await?))
}

/// Email capture form. Each normalized address may subscribe once.
async fn subscribe(
    State(state): State<AppState>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(request) = body?;
    let new = request.validate()?;

    if state.subscribers().find_by_email(&new.email).await?.is_some() {
        return Err(ValidationError::AlreadySubscribed.into());
    }
    // A concurrent insert can still lose the race to the unique index.
    let subscriber = match state.subscribers().insert(new).await {
        Ok(subscriber) => subscriber,
        Err(StoreError::Duplicate(_)) => return Err(ValidationError::AlreadySubscribed.into()),
        Err(e) => return Err(e.into()),
    };
    tracing::info!(id = %subscriber.id, source = %subscriber.source, "new email subscriber");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "You have successfully subscribed to the checklist" })),
    ))
}
