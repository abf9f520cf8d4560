//! URI normalization subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, `uri` query parameter)
//!     → normalize.rs (pick identity source, canonicalize)
//!     → namespace.rs (mount path, protocolless keys, local paths)
//!     → Return: resolved absolute URI + root flag, or a redirect target
//! ```
//!
//! # Design Decisions
//! - The namespace is parsed once at startup and never changes
//! - Query strings never contribute to a path-derived identity
//! - http and https forms of a URI name the same resource
//! - The path form is canonical for in-namespace resources

pub mod namespace;
pub mod normalize;

pub use namespace::{protocolless, uri_path, Namespace, NamespaceError};
pub use normalize::{normalize, NormalizeError, Resolution, ResolvedUri};
