//! RDF serialization subsystem.
//!
//! # Data Flow
//! ```text
//! Item (JSKOS JSON) + content type
//!     → application/ld+json: item with JSKOS @context attached
//!     → other syntaxes:
//!         jskos.rs (map JSKOS fields to triples)
//!         term.rs (ordered graph of terms)
//!         writer.rs (N-Triples, Turtle, RDF/XML)
//!     → Return: serialized document
//! ```
//!
//! # Design Decisions
//! - Serialization is deterministic: the same item always yields the same bytes
//! - A missing item serializes to an empty document
//! - Unknown JSKOS fields are not guessed at; they are dropped from RDF output

pub mod jskos;
pub mod term;
pub mod writer;

use thiserror::Error;

use crate::backend::Item;

pub use term::{Graph, Term, Triple};

/// JSON-LD context of the JSKOS data format.
pub const JSKOS_CONTEXT: &str = "https://gbv.github.io/jskos/context.json";

/// Error type for serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("no serializer for content type {0}")]
    UnsupportedContentType(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns an item into a document of the given content type.
pub trait RdfSerializer: Send + Sync {
    fn serialize(&self, item: Option<&Item>, content_type: &str) -> Result<String, SerializeError>;
}

/// Serializer for JSKOS items.
#[derive(Debug, Clone, Copy, Default)]
pub struct JskosSerializer;

impl RdfSerializer for JskosSerializer {
    fn serialize(&self, item: Option<&Item>, content_type: &str) -> Result<String, SerializeError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/ld+json" => to_json_ld(item),
            "application/n-triples" | "text/plain" => {
                Ok(writer::ntriples(&jskos::to_graph(item)))
            }
            "text/turtle" | "application/turtle" | "application/x-turtle" | "text/n3"
            | "text/rdf+n3" | "application/rdf+n3" => Ok(writer::turtle(&jskos::to_graph(item))),
            "application/rdf+xml" | "text/rdf" => Ok(writer::rdf_xml(&jskos::to_graph(item))),
            _ => Err(SerializeError::UnsupportedContentType(content_type.to_string())),
        }
    }
}

fn to_json_ld(item: Option<&Item>) -> Result<String, SerializeError> {
    let document = match item {
        Some(Item::Object(fields)) => {
            let mut fields = fields.clone();
            fields.insert("@context".to_string(), Item::from(JSKOS_CONTEXT));
            Item::Object(fields)
        }
        Some(other) => other.clone(),
        None => Item::Object(Default::default()),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Item {
        json!({
            "uri": "http://example.org/terms/a",
            "prefLabel": {"en": "Apple", "de": "Apfel"},
            "notation": ["A"],
            "broader": [{"uri": "http://example.org/terms/fruit"}]
        })
    }

    #[test]
    fn test_output_is_deterministic() {
        let item = sample();
        for content_type in [
            "application/ld+json",
            "application/n-triples",
            "text/turtle",
            "application/rdf+xml",
        ] {
            let first = JskosSerializer.serialize(Some(&item), content_type).unwrap();
            let second = JskosSerializer.serialize(Some(&item), content_type).unwrap();
            assert_eq!(first, second, "{} output differs", content_type);
        }
    }

    #[test]
    fn test_json_ld_adds_context() {
        let output = JskosSerializer
            .serialize(Some(&sample()), "application/ld+json")
            .unwrap();
        let parsed: Item = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["@context"], JSKOS_CONTEXT);
        assert_eq!(parsed["notation"][0], "A");
    }

    #[test]
    fn test_missing_item_is_empty_document() {
        assert_eq!(
            JskosSerializer.serialize(None, "application/ld+json").unwrap(),
            "{}"
        );
        assert_eq!(
            JskosSerializer.serialize(None, "application/n-triples").unwrap(),
            ""
        );
    }

    #[test]
    fn test_content_type_parameters_ignored() {
        let output = JskosSerializer
            .serialize(Some(&sample()), "text/turtle; charset=utf-8")
            .unwrap();
        assert!(output.contains("skos:prefLabel"));
    }

    #[test]
    fn test_unknown_content_type() {
        assert!(matches!(
            JskosSerializer.serialize(Some(&sample()), "image/png"),
            Err(SerializeError::UnsupportedContentType(_))
        ));
    }
}
