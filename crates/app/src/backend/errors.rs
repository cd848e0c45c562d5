//! HTTP backend errors.

use reqwest::StatusCode;
use salon_booking::backend::BackendError;
use thiserror::Error;

/// Errors that can occur when talking to the booking API.
#[derive(Debug, Error)]
pub enum HttpBackendError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status or `success: false`.
    #[error("request rejected with status {status}")]
    Rejected {
        /// Response status
        status: StatusCode,

        /// Reason given in the response body, if any
        message: Option<String>,
    },

    /// The API answered successfully with an unexpected body.
    #[error("unexpected response from booking API: {0}")]
    UnexpectedResponse(String),
}

impl From<HttpBackendError> for BackendError {
    fn from(error: HttpBackendError) -> Self {
        match error {
            HttpBackendError::Rejected { message, .. } => Self::Rejected { message },
            other => Self::Transport(other.to_string()),
        }
    }
}
