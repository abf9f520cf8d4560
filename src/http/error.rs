//! Gateway error types with HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::backend::BackendError;
use crate::negotiation::UnsupportedFormat;
use crate::rdf::SerializeError;
use crate::uri::NormalizeError;
use crate::views::RenderError;

/// Everything that ends a request with an error status.
///
/// The `Display` text is the response body, so server-side variants keep
/// their details out of it; they are logged instead.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid URI")]
    InvalidUri,

    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),

    #[error("Not found")]
    NotMounted(String),

    #[error("Upstream unavailable")]
    Backend(#[from] BackendError),

    #[error("Failed to render response")]
    Render(#[from] RenderError),

    #[error("Failed to render response")]
    Serialize(#[from] SerializeError),
}

impl From<NormalizeError> for GatewayError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::InvalidUri => GatewayError::InvalidUri,
            NormalizeError::NotMounted(path) => GatewayError::NotMounted(path),
        }
    }
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidUri | GatewayError::UnsupportedFormat(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotMounted(_) => StatusCode::NOT_FOUND,
            GatewayError::Backend(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Render(_) | GatewayError::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::Backend(e) => tracing::error!(error = %e, "Backend lookup failed"),
            GatewayError::Render(e) => tracing::error!(error = %e, "View rendering failed"),
            GatewayError::Serialize(e) => tracing::error!(error = %e, "Serialization failed"),
            GatewayError::NotMounted(path) => {
                tracing::debug!(path = %path, "Path outside namespace")
            }
            other => tracing::info!(error = %other, "Rejected request"),
        }
        (self.status_code(), self.to_string()).into_response()
    }
}
