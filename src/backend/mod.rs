//! Backend subsystem.
//!
//! # Data Flow
//! ```text
//! Resolved URI (absolute, query stripped)
//!     → Backend::get_item
//!         - file.rs (items loaded from a JSON / NDJSON file at startup)
//!         - api.rs (JSKOS API queried per request)
//!     → Return: Some(item), None (unknown URI), or BackendError
//! ```
//!
//! # Design Decisions
//! - Backends are injected into the dispatcher, never looked up globally
//! - Items are opaque JSON; the gateway never mutates or caches them
//! - A missing item is a normal answer, not an error
//! - Implementations must tolerate concurrent lookups

pub mod api;
pub mod file;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::BackendConfig;

pub use api::ApiBackend;
pub use file::FileBackend;

/// Resource record returned by a backend.
pub type Item = serde_json::Value;

/// Error type for backend construction and lookups.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid item data at line {line}: {source}")]
    Data {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend answered with status {0}")]
    Status(u16),
}

/// Item lookup by URI.
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Display {
    /// Fetch the item identified by `uri`, if the backend knows it.
    async fn get_item(&self, uri: &str) -> Result<Option<Item>, BackendError>;
}

/// Build a backend from its configuration.
pub fn init_backend(config: &BackendConfig) -> Result<Arc<dyn Backend>, BackendError> {
    let backend: Arc<dyn Backend> = match config {
        BackendConfig::File { path } => Arc::new(FileBackend::open(path)?),
        BackendConfig::Api { url, timeout_secs } => Arc::new(ApiBackend::new(
            url,
            timeout_secs.map(Duration::from_secs),
        )?),
    };
    tracing::info!(backend = %backend, "Backend initialized");
    Ok(backend)
}
