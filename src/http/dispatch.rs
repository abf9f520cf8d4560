//! Request dispatch.
//!
//! # Responsibilities
//! - Compose URI normalization, format negotiation and item lookup
//! - Serve the namespace index without consulting the backend
//! - Map lookups to 200 (found) or 404 (missing) with the same rendering
//!
//! # Design Decisions
//! - All collaborators are injected; nothing is read from global state
//! - The only await point is the backend lookup; it has no timeout here
//! - No retries: a failed lookup becomes a 502 for the client to handle

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;

use crate::backend::Backend;
use crate::config::SiteConfig;
use crate::http::error::GatewayError;
use crate::http::response;
use crate::negotiation::{negotiate, ContentTypeTable, Format};
use crate::rdf::{JskosSerializer, RdfSerializer};
use crate::uri::{normalize, Namespace, Resolution};
use crate::views::{HtmlViews, View, ViewRenderer, ViewVars};

/// The parts of an HTTP request the dispatcher looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Request path, without query string.
    pub path: String,
    /// `uri` query parameter.
    pub uri: Option<String>,
    /// `format` query parameter.
    pub format: Option<String>,
    /// Accept header value.
    pub accept: Option<String>,
}

/// Per-request pipeline shared by all handler tasks.
pub struct Dispatcher {
    namespace: Namespace,
    formats: ContentTypeTable,
    site: SiteConfig,
    backend: Arc<dyn Backend>,
    index: Option<Arc<dyn Backend>>,
    views: Arc<dyn ViewRenderer>,
    serializer: Arc<dyn RdfSerializer>,
}

impl Dispatcher {
    /// Create a dispatcher with the built-in views, serializer and formats.
    pub fn new(namespace: Namespace, backend: Arc<dyn Backend>) -> Self {
        Self {
            views: Arc::new(HtmlViews::new(namespace.clone())),
            namespace,
            formats: ContentTypeTable::new(),
            site: SiteConfig::default(),
            backend,
            index: None,
            serializer: Arc::new(JskosSerializer),
        }
    }

    /// Attach the secondary index backend.
    pub fn with_index(mut self, index: Arc<dyn Backend>) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_formats(mut self, formats: ContentTypeTable) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.site = site;
        self
    }

    pub fn with_views(mut self, views: Arc<dyn ViewRenderer>) -> Self {
        self.views = views;
        self
    }

    pub fn with_serializer(mut self, serializer: Arc<dyn RdfSerializer>) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Secondary backend. Held for future use; never consulted.
    pub fn index(&self) -> Option<&Arc<dyn Backend>> {
        self.index.as_ref()
    }

    /// Answer a request addressed to the namespace.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<Response, GatewayError> {
        let resolved = match normalize(&request.path, request.uri.as_deref(), &self.namespace)? {
            Resolution::Redirect(target) => {
                tracing::debug!(target = %target, "Redirecting to canonical path");
                return Ok(response::redirect(&target));
            }
            Resolution::Resource(resolved) => resolved,
        };

        tracing::info!(uri = %resolved.uri, "get");

        let format = negotiate(
            request.format.as_deref(),
            request.accept.as_deref(),
            &self.formats,
        )?;

        if resolved.is_root {
            return response::render_view(
                self.views.as_ref(),
                View::Index,
                &format,
                &self.vars(),
                StatusCode::OK,
            );
        }

        let uri = resolved.uri.to_string();
        let item = self.backend.get_item(&uri).await?;
        let status = if item.is_some() {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        };

        tracing::info!(uri = %uri, format = %format, found = item.is_some(), "Lookup finished");

        match format {
            Format::Html | Format::Debug => {
                let vars = self.vars().with_resource(uri, item);
                response::render_view(self.views.as_ref(), View::Index, &format, &vars, status)
            }
            _ => response::render_item(self.serializer.as_ref(), &format, item.as_ref(), status),
        }
    }

    /// Page served at `/` when the namespace is mounted below it.
    pub fn root(&self) -> Result<Response, GatewayError> {
        response::render_view(
            self.views.as_ref(),
            View::Root,
            &Format::Html,
            &self.vars(),
            StatusCode::OK,
        )
    }

    fn vars(&self) -> ViewVars {
        let formats = std::iter::once("json")
            .chain(self.formats.iter().map(|(name, _)| name))
            .map(str::to_string)
            .collect();
        ViewVars::new(self.site.clone(), self.namespace.as_str(), formats)
    }
}
