use thiserror::Error;

use crate::blob::BlobError;
use crate::store::StoreError;
use crate::validate::ValidationError;

/// Failure of a content or resource workflow.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
