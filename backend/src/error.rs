//! Error taxonomy of the action handlers.
//!
//! Every variant reaches the client through the dispatcher as an error
//! envelope carrying the display message and the stable [`AppError::kind`].
//! A student source that cannot be read during aggregation is not an
//! `AppError`: it is logged and skipped inside the aggregator.

use crate::stores::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request body or action fields could not be read.
    #[error("malformed request: {0}")]
    Parse(String),

    #[error("invalid action: {0}")]
    UnknownAction(String),

    /// No account matched the identifier and password.
    #[error("login failed, check your username/email and password")]
    Authentication,

    #[error("invalid folder link: {0:?}")]
    InvalidFolderLink(String),

    #[error("invalid log sheet link: {0:?}")]
    InvalidSheetLink(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Well-formed request that the operation refuses.
    #[error("{0}")]
    Validation(String),

    #[error("store error: {0}")]
    UpstreamStore(#[from] StoreError),
}

impl AppError {
    /// Stable machine-readable kind sent alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Parse(_) => "parse_error",
            AppError::UnknownAction(_) => "unknown_action",
            AppError::Authentication => "authentication_error",
            AppError::InvalidFolderLink(_) => "invalid_folder_link",
            AppError::InvalidSheetLink(_) => "invalid_sheet_link",
            AppError::UserNotFound(_) => "user_not_found",
            AppError::Validation(_) => "validation_error",
            AppError::UpstreamStore(_) => "upstream_store_error",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
