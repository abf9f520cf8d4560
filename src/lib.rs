//! JSKOS Linked Data gateway library.

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod negotiation;
pub mod observability;
pub mod rdf;
pub mod uri;
pub mod views;

pub use config::schema::GatewayConfig;
pub use http::{Dispatcher, GatewayServer};
pub use lifecycle::Shutdown;
