//! Content negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! `format` query parameter, Accept header
//!     → negotiator.rs (override wins, else ordered candidate scan)
//!     → accept.rs (media range parsing, quality values, wildcards)
//!     → formats.rs (validate against the content-type table)
//!     → Return: Format or UnsupportedFormat
//! ```
//!
//! # Design Decisions
//! - Negotiation is a pure function of its inputs
//! - Candidate order is fixed; client q-values only decide acceptability
//! - The content-type table only grows through explicit registration

pub mod accept;
pub mod formats;
pub mod negotiator;

pub use accept::AcceptHeader;
pub use formats::{ContentTypeTable, Format, FormatError, UnsupportedFormat, JSON_CONTENT_TYPE};
pub use negotiator::{negotiate, DEFAULT_FORMAT};
