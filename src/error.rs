//! Operation-level failures surfaced to the admin.
//!
//! Remote failures are caught where the call is made and turned into one of
//! these, then into a toast. Nothing is allowed to reach a global handler.

use thiserror::Error;

use crate::api::ApiError;
use crate::models::EntityId;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Login rejected; shown inline on the login form
    #[error("{0}")]
    AuthFailed(String),

    #[error("failed to load data: {0}")]
    FetchFailed(#[source] ApiError),

    #[error("failed to save changes: {0}")]
    WriteFailed(#[source] ApiError),

    #[error("failed to delete: {0}")]
    DeleteFailed(#[source] ApiError),

    #[error("could not prepare image: {0}")]
    UploadTransformFailed(String),

    #[error("image upload failed: {0}")]
    UploadTransferFailed(#[source] ApiError),

    #[error("record {0} is no longer in the list")]
    NotFound(EntityId),

    /// The triggering action already has a request outstanding
    #[error("a request for this action is already in progress")]
    Busy,

    #[error("{0}")]
    Validation(String),
}

impl AdminError {
    /// Short message for a toast
    pub fn user_message(&self) -> String {
        match self {
            AdminError::AuthFailed(msg) => msg.clone(),
            AdminError::FetchFailed(e) if e.is_network() => {
                "Could not connect to server".to_string()
            }
            AdminError::FetchFailed(_) => "Failed to load data".to_string(),
            AdminError::WriteFailed(_) => "Failed to save changes".to_string(),
            AdminError::DeleteFailed(_) => "Failed to delete".to_string(),
            AdminError::UploadTransformFailed(_) | AdminError::UploadTransferFailed(_) => {
                "Image upload failed".to_string()
            }
            AdminError::NotFound(_) => "That record is no longer available".to_string(),
            AdminError::Busy => "Please wait for the current request to finish".to_string(),
            AdminError::Validation(msg) => msg.clone(),
        }
    }

    /// Underlying transport/server error, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AdminError::FetchFailed(e)
            | AdminError::WriteFailed(e)
            | AdminError::DeleteFailed(e)
            | AdminError::UploadTransferFailed(e) => Some(e),
            _ => None,
        }
    }
}
