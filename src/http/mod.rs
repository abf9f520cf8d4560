//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (request ID, tracing span)
//!     → dispatch.rs (normalize URI, negotiate format, look up item)
//!     → response.rs (redirects, views, JSON, serialized RDF)
//!     → error.rs (status mapping for failures)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use dispatch::{Dispatcher, ResolveRequest};
pub use error::GatewayError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, GatewayServer};
