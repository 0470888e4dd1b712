use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};
use book_site_core::contact::model::{ContactQuery, ContactSubmission, Pagination};
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_id;
use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", get(list_messages).post(submit_message))
        .route("/api/contact/{id}/read", patch(mark_read))
        .route("/api/contact/{id}", delete(delete_message))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    is_read: Option<bool>,
    page: Option<i64>,
    limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkRead {
    is_read: Option<bool>,
}

/// Public contact form.
async fn submit_message(
    State(state): State<AppState>,
    body: Result<Json<ContactSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(submission) = body?;
    let message = state.contacts().insert(submission.validate()?).await?;
    let unread = state.contacts().unread_count().await?;
    tracing::info!(id = %message.id, "contact message received");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Thank you for your message! We'll get back to you soon.",
            "data": {
                "_id": message.id,
                "name": message.name,
                "email": message.email,
                "createdAt": message.created_at,
            },
            "unreadCount": unread,
        })),
    ))
}

async fn list_messages(
    _admin: AdminUser,
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(params) = query?;
    let query = ContactQuery::new(params.is_read, params.page, params.limit);
    let (messages, total) = state.contacts().list(query).await?;
    let unread = state.contacts().unread_count().await?;

    Ok(Json(json!({
        "messages": messages,
        "pagination": Pagination::new(total, &query),
        "unreadCount": unread,
    })))
}

/// Set the read flag; an empty body marks the message read.
async fn mark_read(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, "message")?;
    let MarkRead { is_read } = if body.iter().all(u8::is_ascii_whitespace) {
        MarkRead::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))?
    };
    let is_read = is_read.unwrap_or(true);

    let message = state
        .contacts()
        .set_read(id, is_read)
        .await?
        .ok_or_else(|| ApiError::NotFound("Message not found".to_string()))?;
    let unread = state.contacts().unread_count().await?;

    Ok(Json(json!({
        "message": format!("Message marked as {}", if is_read { "read" } else { "unread" }),
        "data": message,
        "unreadCount": unread,
    })))
}

async fn delete_message(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, "message")?;
    if !state.contacts().delete(id).await? {
        return Err(ApiError::NotFound("Message not found".to_string()));
    }
    let unread = state.contacts().unread_count().await?;
    Ok(Json(json!({
        "message": "Message deleted successfully",
        "unreadCount": unread,
    })))
}
