// src/error.rs
use thiserror::Error;

use crate::types::ResultKind;
use crate::upload::UploadValidationError;

/// Failure taxonomy surfaced to the user as toasts.
///
/// Malformed fields inside an otherwise successful payload are never an
/// error; the normalizer resolves them with fallbacks.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", .0.message)]
    Validation(UploadValidationError),

    #[error("{0}")]
    Server(String),

    #[error("An error occurred: {0}")]
    Transport(String),

    #[error("No analysis results available")]
    NoResults,

    #[error("No {0} text available to download")]
    EmptyResult(ResultKind),

    #[error("Please select a resume file and fill in the job details")]
    FormIncomplete,
}

impl ClientError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_type.code(),
            Self::Server(_) => "SERVER_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::NoResults => "NO_RESULTS",
            Self::EmptyResult(_) => "EMPTY_RESULT",
            Self::FormIncomplete => "FORM_INCOMPLETE",
        }
    }
}

impl From<UploadValidationError> for ClientError {
    fn from(err: UploadValidationError) -> Self {
        Self::Validation(err)
    }
}
