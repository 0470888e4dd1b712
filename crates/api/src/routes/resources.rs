use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use book_site_core::file::MAX_PDF_BYTES;
use book_site_core::resource::model::{Category, ResourceFilter, ResourceUpdate};
use book_site_core::resource::service::ResourceUpload;
use book_site_core::validate::non_blank;
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_id;
use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::form::{parse_flag, FormData, FORM_OVERHEAD_BYTES};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/resources/public", get(list_public))
        .route(
            "/api/resources",
            get(list_all)
                .post(upload_resource)
                .layer(DefaultBodyLimit::max(MAX_PDF_BYTES + FORM_OVERHEAD_BYTES)),
        )
        .route(
            "/api/resources/{id}",
            put(update_resource).delete(delete_resource),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceQuery {
    category: Option<String>,
    is_published: Option<bool>,
}

impl ResourceQuery {
    fn category(&self) -> ApiResult<Option<Category>> {
        Ok(non_blank(self.category.as_deref())
            .map(|c| c.parse::<Category>())
            .transpose()?)
    }
}

/// Published resources with signed download links. Public.
async fn list_public(
    State(state): State<AppState>,
    query: Result<Query<ResourceQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query?;
    let resources = state.resources().list_public(query.category()?).await?;
    Ok(Json(json!({
        "success": true,
        "count": resources.len(),
        "data": resources,
    })))
}

/// Every resource including drafts.
async fn list_all(
    _admin: AdminUser,
    State(state): State<AppState>,
    query: Result<Query<ResourceQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query?;
    let filter = ResourceFilter {
        category: query.category()?,
        is_published: query.is_published,
    };
    let resources = state.resources().list(filter).await?;
    Ok(Json(json!({
        "success": true,
        "count": resources.len(),
        "data": resources,
    })))
}

async fn upload_resource(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut form = FormData::read(multipart?).await?;
    let is_published = form
        .text("isPublished")
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_flag("isPublished", raw))
        .transpose()?;
    let upload = ResourceUpload {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        category: form.text("category").map(str::to_string),
        is_published,
        document: form.take_file("document"),
    };

    let resource = state.resources().create(upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Resource uploaded successfully",
            "data": resource,
        })),
    ))
}

async fn update_resource(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ResourceUpdate>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, "resource")?;
    let Json(update) = body?;
    let resource = state.resources().update(id, update).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Resource updated successfully",
        "data": resource,
    })))
}

async fn delete_resource(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, "resource")?;
    state.resources().delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Resource deleted successfully",
    })))
}
