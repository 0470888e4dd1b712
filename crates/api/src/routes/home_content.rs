use axum::{
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::header,
    routing::get,
    Json, Router,
};
use book_site_core::content::model::{HomeContentDocument, HomeContentPatch};
use book_site_core::file::{FileUpload, MAX_IMAGE_BYTES};
use book_site_core::validate::ValidationError;

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::form::{FormData, FORM_OVERHEAD_BYTES};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/home-content",
        get(get_home_content)
            .put(update_home_content)
            .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + FORM_OVERHEAD_BYTES)),
    )
}

/// Body of `PUT /api/home-content`: plain JSON, or a multipart form whose
/// `content` field holds the JSON and whose `authorPhoto` field holds an
/// optional image.
#[derive(Debug)]
pub enum HomeContentUpdate {
    Json(HomeContentPatch),
    Multipart {
        patch: HomeContentPatch,
        photo: Option<FileUpload>,
    },
}

impl HomeContentUpdate {
    fn into_parts(self) -> (HomeContentPatch, Option<FileUpload>) {
        match self {
            HomeContentUpdate::Json(patch) => (patch, None),
            HomeContentUpdate::Multipart { patch, photo } => (patch, photo),
        }
    }
}

impl FromRequest<AppState> for HomeContentUpdate {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Json(patch) = Json::<HomeContentPatch>::from_request(req, state).await?;
            return Ok(HomeContentUpdate::Json(patch));
        }

        let multipart = Multipart::from_request(req, state).await?;
        let mut form = FormData::read(multipart).await?;
        let patch = match form.text("content") {
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| ValidationError::MalformedContent(e.to_string()))?,
            None => HomeContentPatch::default(),
        };
        Ok(HomeContentUpdate::Multipart {
            patch,
            photo: form.take_file("authorPhoto"),
        })
    }
}

async fn get_home_content(State(state): State<AppState>) -> ApiResult<Json<HomeContentDocument>> {
    Ok(Json(state.home_content().get().await?))
}

async fn update_home_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    update: HomeContentUpdate,
) -> ApiResult<Json<HomeContentDocument>> {
    let (patch, photo) = update.into_parts();
    let doc = state.home_content().update(patch, photo).await?;
    Ok(Json(doc))
}
