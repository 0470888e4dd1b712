pub mod auth;
pub mod contact;
pub mod health;
pub mod home_content;
pub mod resources;
pub mod subscribers;

#[cfg(test)]
pub mod test_support;

use axum::Router;
use book_site_core::validate::ValidationError;
use uuid::Uuid;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(home_content::routes())
        .merge(resources::routes())
        .merge(contact::routes())
        .merge(subscribers::routes())
        .with_state(state)
}

/// Parse a path id, reporting which kind of record it was meant for.
pub(crate) fn parse_id(raw: &str, what: &'static str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidId(what))
}
