//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → Log output (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the request span
//! - Metrics are recorded unconditionally and dropped when no exporter is installed

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{init_metrics, record_request};
