//! Error responses for the HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::student::ServiceError;

/// Failure of a request handler, rendered as a plain-text status page.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Anything the handler could not turn into a page.
    #[error(transparent)]
    Service(ServiceError),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for WebError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(key) => WebError::NotFound(key),
            other => WebError::Service(other),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            WebError::NotFound(_) => (status, "404 Not Found").into_response(),
            WebError::Service(err) => {
                error!(error = %err, "request failed");
                (status, "500 Internal Server Error").into_response()
            }
        }
    }
}
