//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the namespace is a usable base URI
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check extra formats can be registered
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{BackendConfig, GatewayConfig};
use crate::negotiation::{ContentTypeTable, FormatError};
use crate::uri::NamespaceError;

/// A single semantic problem in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("namespace: {0}")]
    Namespace(#[from] NamespaceError),

    #[error("listener.bind_address is not a socket address: {0}")]
    BindAddress(String),

    #[error("observability.metrics_address is not a socket address: {0}")]
    MetricsAddress(String),

    #[error("timeouts.request_secs must be greater than 0")]
    RequestTimeout,

    #[error("{section}.url is not a valid URL: {url}")]
    BackendUrl { section: &'static str, url: String },

    #[error("{section}.timeout_secs must be greater than 0")]
    BackendTimeout { section: &'static str },

    #[error("formats: {0}")]
    Format(#[from] FormatError),
}

/// Check a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.namespace() {
        errors.push(e.into());
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    validate_backend("backend", &config.backend, &mut errors);
    if let Some(index) = &config.index {
        validate_backend("index", index, &mut errors);
    }

    let mut table = ContentTypeTable::new();
    for (name, content_type) in &config.formats {
        if let Err(e) = table.register(name.as_str(), content_type.as_str()) {
            errors.push(e.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_backend(
    section: &'static str,
    backend: &BackendConfig,
    errors: &mut Vec<ValidationError>,
) {
    if let BackendConfig::Api { url, timeout_secs } = backend {
        if Url::parse(url).is_err() {
            errors.push(ValidationError::BackendUrl {
                section,
                url: url.clone(),
            });
        }
        if *timeout_secs == Some(0) {
            errors.push(ValidationError::BackendTimeout { section });
        }
    }
}
