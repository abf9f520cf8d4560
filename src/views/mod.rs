//! View rendering subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher
//!     → ViewVars (site settings, namespace, uri, item, formats)
//!     → ViewRenderer::render(View, &ViewVars)
//!         - html.rs (built-in HTML pages)
//!     → Return: HTML document
//! ```
//!
//! # Design Decisions
//! - Views receive one explicit structure, never an ad-hoc variable bag
//! - The same structure is what `format=debug` dumps as JSON
//! - A missing item is rendered as a notice, not as an error page

pub mod html;

use serde::Serialize;
use thiserror::Error;

use crate::backend::Item;
use crate::config::SiteConfig;

pub use html::HtmlViews;

/// Pages the gateway can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Server root when the namespace is mounted below it.
    Root,
    /// Namespace index and resource pages.
    Index,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Root => "root",
            View::Index => "index",
        }
    }
}

/// Variables available to every view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewVars {
    pub site: SiteConfig,
    pub namespace: String,
    /// Requested resource; absent on the namespace index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Item found by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    /// The item's `_source` field, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Item>,
    /// Names of the alternative formats to link to.
    pub formats: Vec<String>,
}

impl ViewVars {
    pub fn new(site: SiteConfig, namespace: impl Into<String>, formats: Vec<String>) -> Self {
        Self {
            site,
            namespace: namespace.into(),
            uri: None,
            item: None,
            source: None,
            formats,
        }
    }

    /// Attach the requested resource and its item.
    pub fn with_resource(mut self, uri: impl Into<String>, item: Option<Item>) -> Self {
        self.source = item.as_ref().and_then(|item| item.get("_source")).cloned();
        self.uri = Some(uri.into());
        self.item = item;
        self
    }
}

/// Error type for view rendering.
#[derive(Debug, Error)]
#[error("failed to render view {view}: {message}")]
pub struct RenderError {
    pub view: &'static str,
    pub message: String,
}

impl RenderError {
    pub fn new(view: View, message: impl Into<String>) -> Self {
        Self {
            view: view.name(),
            message: message.into(),
        }
    }
}

/// Renders a view to a document.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: View, vars: &ViewVars) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_names_view() {
        let err = RenderError::new(View::Root, "template missing");
        assert_eq!(err.view, "root");
        assert_eq!(err.to_string(), "failed to render view root: template missing");
    }
}
