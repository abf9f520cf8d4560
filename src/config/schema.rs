//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::negotiation::{ContentTypeTable, FormatError};
use crate::uri::{Namespace, NamespaceError};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URI of the served namespace. Must end with `/`.
    pub namespace: String,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Presentation settings handed to the views.
    pub site: SiteConfig,

    /// Primary item backend.
    pub backend: BackendConfig,

    /// Secondary backend for index data. Constructed but not consulted.
    pub index: Option<BackendConfig>,

    /// Additional serialized formats, name to MIME type.
    pub formats: BTreeMap<String, String>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            namespace: "http://localhost:3555/".to_string(),
            listener: ListenerConfig::default(),
            site: SiteConfig::default(),
            backend: BackendConfig::default(),
            index: None,
            formats: BTreeMap::new(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Parse the configured namespace.
    pub fn namespace(&self) -> Result<Namespace, NamespaceError> {
        Namespace::parse(&self.namespace)
    }

    /// Built-in formats plus the configured extra ones.
    pub fn content_types(&self) -> Result<ContentTypeTable, FormatError> {
        let mut table = ContentTypeTable::new();
        for (name, content_type) in &self.formats {
            table.register(name.as_str(), content_type.as_str())?;
        }
        Ok(table)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3555").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3555".to_string(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Title shown on every page.
    pub title: String,

    /// Optional introduction shown on the namespace index page.
    pub description: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "JSKOS Proxy".to_string(),
            description: None,
        }
    }
}

/// Backend selection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Items loaded from a JSON array or NDJSON file.
    File { path: PathBuf },

    /// Items fetched from a JSKOS API.
    Api {
        url: String,
        /// Per-request timeout in seconds. No timeout when absent.
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Api {
            url: "https://api.dante.gbv.de/".to_string(),
            timeout_secs: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
