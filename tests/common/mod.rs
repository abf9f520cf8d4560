//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use jskos_proxy::backend::{Backend, BackendError, FileBackend, Item};
use jskos_proxy::http::{build_router, Dispatcher};
use jskos_proxy::uri::Namespace;

pub const NAMESPACE: &str = "http://example.org/terms/";

/// A concept inside the test namespace.
pub fn apple() -> Value {
    json!({
        "uri": "http://example.org/terms/apple",
        "type": ["http://www.w3.org/2004/02/skos/core#Concept"],
        "prefLabel": {"en": "Apple"},
        "notation": ["A"],
        "broader": [{"uri": "http://example.org/terms/fruit", "prefLabel": {"en": "Fruit"}}]
    })
}

pub fn fruit() -> Value {
    json!({
        "uri": "http://example.org/terms/fruit",
        "prefLabel": {"en": "Fruit"},
        "narrower": [{"uri": "http://example.org/terms/apple"}]
    })
}

/// File-style backend that counts lookups.
#[derive(Default)]
pub struct CountingBackend {
    inner: FileBackend,
    calls: AtomicUsize,
}

impl CountingBackend {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            inner: FileBackend::from_items("fixtures", items),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for CountingBackend {
    async fn get_item(&self, uri: &str) -> Result<Option<Item>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_item(uri).await
    }
}

impl fmt::Display for CountingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "counting {}", self.inner)
    }
}

/// Backend whose every lookup fails.
pub struct FailingBackend;

#[async_trait]
impl Backend for FailingBackend {
    async fn get_item(&self, _uri: &str) -> Result<Option<Item>, BackendError> {
        Err(BackendError::Status(503))
    }
}

impl fmt::Display for FailingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failing")
    }
}

/// Router over `backend` for the given namespace.
pub fn app(namespace: &str, backend: Arc<dyn Backend>) -> Router {
    let dispatcher = Dispatcher::new(Namespace::parse(namespace).unwrap(), backend);
    build_router(Arc::new(dispatcher), Duration::from_secs(5))
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn get(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::get(uri).body(Body::empty()).unwrap()
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` receives the request target (path and query) and returns status
/// and JSON body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }
                        let head = String::from_utf8_lossy(&buf);
                        let target = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();

                        let (status, body) = f(target).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
