//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the resolution handler on every path
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown is signalled
//! - Record per-request metrics
//!
//! # Design Decisions
//! - Every method is accepted; only path, query and Accept matter
//! - The request timeout applies to the whole request, backend lookup included
//! - Shutdown drains in-flight requests before returning

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::form_urlencoded;

use crate::config::TimeoutConfig;
use crate::http::dispatch::{Dispatcher, ResolveRequest};
use crate::http::request::{request_span, UuidRequestId};
use crate::observability::metrics;

/// Query parameters understood by the gateway.
#[derive(Debug, Default, PartialEq, Eq)]
struct ResolveParams {
    uri: Option<String>,
    format: Option<String>,
}

impl ResolveParams {
    /// First value of each known key. Repeated keys never fail the request.
    fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let query = query.unwrap_or_default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "uri" => &mut params.uri,
                "format" => &mut params.format,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(dispatcher: Arc<Dispatcher>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", any(resolve_handler))
        .route("/{*path}", any(resolve_handler))
        .with_state(dispatcher)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    pub fn new(dispatcher: Arc<Dispatcher>, timeouts: &TimeoutConfig) -> Self {
        let router = build_router(dispatcher, Duration::from_secs(timeouts.request_secs));
        Self { router }
    }

    /// Run the server until a value arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolution handler for every path.
async fn resolve_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let start_time = Instant::now();
    let params = ResolveParams::from_query(uri.query());

    let path = uri.path();
    let result = if path == "/" && dispatcher.namespace().is_mounted_below_root() {
        dispatcher.root()
    } else {
        let request = ResolveRequest {
            path: path.to_string(),
            uri: params.uri,
            format: params.format,
            accept: headers
                .get(header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        };
        dispatcher.resolve(&request).await
    };

    let response = result.into_response();
    metrics::record_request(method.as_str(), response.status().as_u16(), start_time);
    response
}
