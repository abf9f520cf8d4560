//! Format selection.

use crate::negotiation::accept::AcceptHeader;
use crate::negotiation::formats::{ContentTypeTable, Format, UnsupportedFormat};

/// Format used when neither an override nor the Accept header selects one.
pub const DEFAULT_FORMAT: &str = "jsonld";

/// Candidates checked against the Accept header, in priority order.
const CANDIDATES: [(&str, &[&str]); 5] = [
    ("html", &["text/html", "application/xhtml+xml"]),
    ("jsonld", &["application/ld+json", "application/json"]),
    ("ntriples", &["application/n-triples", "text/plain"]),
    (
        "turtle",
        &[
            "text/turtle",
            "application/turtle",
            "application/x-turtle",
            "text/n3",
            "text/rdf+n3",
            "application/rdf+n3",
        ],
    ),
    ("rdfxml", &["application/rdf+xml", "text/rdf"]),
];

/// First candidate format accepted by the header, if any.
pub fn accepted_format(accept: Option<&str>) -> Option<&'static str> {
    let accept = AcceptHeader::parse(accept?);
    CANDIDATES
        .iter()
        .find(|(_, types)| types.iter().any(|mime| accept.accepts(mime)))
        .map(|(format, _)| *format)
}

/// Resolve the representation for a request.
///
/// An explicit, non-empty override is used verbatim; it is never checked
/// against the Accept header.
pub fn negotiate(
    format_override: Option<&str>,
    accept: Option<&str>,
    table: &ContentTypeTable,
) -> Result<Format, UnsupportedFormat> {
    let name = format_override
        .filter(|name| !name.is_empty())
        .or_else(|| accepted_format(accept))
        .unwrap_or(DEFAULT_FORMAT);

    Format::resolve(name, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negotiate_name(format: Option<&str>, accept: Option<&str>) -> String {
        negotiate(format, accept, &ContentTypeTable::new())
            .unwrap()
            .name()
            .to_string()
    }

    #[test]
    fn test_override_beats_accept() {
        assert_eq!(
            negotiate_name(Some("turtle"), Some("application/ld+json")),
            "turtle"
        );
    }

    #[test]
    fn test_accept_selects_candidate() {
        assert_eq!(negotiate_name(None, Some("application/rdf+xml")), "rdfxml");
        assert_eq!(negotiate_name(None, Some("text/n3")), "turtle");
        assert_eq!(negotiate_name(None, Some("text/plain")), "ntriples");
        assert_eq!(negotiate_name(None, Some("application/json")), "jsonld");
        assert_eq!(negotiate_name(None, Some("text/html")), "html");
    }

    #[test]
    fn test_candidate_order_wins_over_quality() {
        assert_eq!(
            negotiate_name(None, Some("text/turtle, text/html;q=0.1")),
            "html"
        );
    }

    #[test]
    fn test_default_format() {
        assert_eq!(negotiate_name(None, Some("*/*")), DEFAULT_FORMAT);
        assert_eq!(negotiate_name(None, None), DEFAULT_FORMAT);
        assert_eq!(negotiate_name(None, Some("image/png")), DEFAULT_FORMAT);
        assert_eq!(negotiate_name(Some(""), Some("*/*")), DEFAULT_FORMAT);
    }

    #[test]
    fn test_unknown_override_is_rejected() {
        let err = negotiate(Some("unknownformat123"), None, &ContentTypeTable::new()).unwrap_err();
        assert!(err.to_string().contains("unknownformat123"));
    }
}
