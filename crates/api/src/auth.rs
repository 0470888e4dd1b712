use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use book_site_core::auth::verify_token;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated admin. Add it to a handler's arguments to require a valid
/// `Authorization: Bearer` token.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub subject: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::Unauthorized)?;
        let Some(secret) = state.config().jwt_secret.as_deref() else {
            return Err(ApiError::Unauthorized);
        };
        let claims = verify_token(bearer.token(), secret)?;
        Ok(AdminUser { subject: claims.sub })
    }
}
