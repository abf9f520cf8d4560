//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated configuration into a ready dispatcher
//! - Initialize backends in order: primary first, then the index
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound by the caller, after this succeeds

use std::sync::Arc;

use thiserror::Error;

use crate::backend::{init_backend, BackendError};
use crate::config::GatewayConfig;
use crate::http::Dispatcher;
use crate::negotiation::FormatError;
use crate::uri::NamespaceError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid namespace: {0}")]
    Namespace(#[from] NamespaceError),

    #[error("invalid format table: {0}")]
    Format(#[from] FormatError),

    #[error("backend initialization failed: {0}")]
    Backend(#[from] BackendError),
}

/// Build the dispatcher described by `config`.
pub fn build_dispatcher(config: &GatewayConfig) -> Result<Dispatcher, StartupError> {
    let namespace = config.namespace()?;
    let formats = config.content_types()?;
    let backend = init_backend(&config.backend)?;

    let mut dispatcher = Dispatcher::new(namespace, backend)
        .with_formats(formats)
        .with_site(config.site.clone());

    if let Some(index) = &config.index {
        dispatcher = dispatcher.with_index(init_backend(index)?);
    }

    tracing::info!(
        namespace = %dispatcher.namespace(),
        index = dispatcher.index().is_some(),
        "Dispatcher ready"
    );
    Ok(dispatcher)
}
