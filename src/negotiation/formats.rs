//! Response formats and the content-type table.
//!
//! # Responsibilities
//! - Define the set of representations the gateway can produce
//! - Map serialized format names to their MIME type
//! - Validate requested format names

use std::collections::BTreeMap;
use thiserror::Error;

/// Generic JSON content type. Formats mapped to it skip the serializer.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Names handled without a table entry.
const BUILTIN: [&str; 4] = ["html", "debug", "json", "jskos"];

const DEFAULT_CONTENT_TYPES: [(&str, &str); 4] = [
    ("jsonld", "application/ld+json"),
    ("ntriples", "application/n-triples"),
    ("turtle", "text/turtle"),
    ("rdfxml", "application/rdf+xml"),
];

/// Requested or negotiated format is not known.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Serialization format {0} not supported!")]
pub struct UnsupportedFormat(pub String);

/// Error type for content-type registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("format name '{0}' is reserved")]
    Reserved(String),

    #[error("format '{0}' is already registered")]
    Duplicate(String),

    #[error("invalid format name '{0}'")]
    InvalidName(String),

    #[error("invalid content type '{0}'")]
    InvalidContentType(String),
}

/// Registry of serialized formats and their MIME types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeTable {
    entries: BTreeMap<String, String>,
}

impl ContentTypeTable {
    /// Table holding only the built-in RDF formats.
    pub fn new() -> Self {
        let entries = DEFAULT_CONTENT_TYPES
            .iter()
            .map(|(name, content_type)| (name.to_string(), content_type.to_string()))
            .collect();
        Self { entries }
    }

    /// Register an additional format.
    ///
    /// Existing entries cannot be replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<(), FormatError> {
        let name = name.into();
        let content_type = content_type.into();

        if BUILTIN.contains(&name.as_str()) {
            return Err(FormatError::Reserved(name));
        }
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(FormatError::InvalidName(name));
        }
        if !is_media_type(&content_type) {
            return Err(FormatError::InvalidContentType(content_type));
        }
        if self.entries.contains_key(&name) {
            return Err(FormatError::Duplicate(name));
        }

        self.entries.insert(name, content_type.to_ascii_lowercase());
        Ok(())
    }

    /// MIME type of a registered format.
    pub fn content_type(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Registered formats in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, content_type)| (name.as_str(), content_type.as_str()))
    }
}

impl Default for ContentTypeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// `type/subtype` without parameters or wildcards.
fn is_media_type(value: &str) -> bool {
    let token = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
    };
    match value.split_once('/') {
        Some((kind, subtype)) => token(kind) && token(subtype),
        None => false,
    }
}

/// A representation the gateway can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// Rendered HTML view.
    Html,
    /// View variables dumped as JSON.
    Debug,
    /// Plain item JSON.
    Json,
    /// Plain item JSON, named after the data format.
    Jskos,
    /// Output of the RDF serializer.
    Serialized { name: String, content_type: String },
}

impl Format {
    /// Validate a format name against the table.
    pub fn resolve(name: &str, table: &ContentTypeTable) -> Result<Self, UnsupportedFormat> {
        match name {
            "html" => Ok(Format::Html),
            "debug" => Ok(Format::Debug),
            "json" => Ok(Format::Json),
            "jskos" => Ok(Format::Jskos),
            other => table
                .content_type(other)
                .map(|content_type| Format::Serialized {
                    name: other.to_string(),
                    content_type: content_type.to_string(),
                })
                .ok_or_else(|| UnsupportedFormat(other.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Format::Html => "html",
            Format::Debug => "debug",
            Format::Json => "json",
            Format::Jskos => "jskos",
            Format::Serialized { name, .. } => name,
        }
    }

    /// Content type to hand to the serializer, if any.
    ///
    /// Formats without a dedicated type, or mapped to plain JSON, are sent as
    /// the item itself.
    pub fn serializer_content_type(&self) -> Option<&str> {
        match self {
            Format::Serialized { content_type, .. } if content_type != JSON_CONTENT_TYPE => {
                Some(content_type)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = ContentTypeTable::new();
        assert_eq!(table.content_type("jsonld"), Some("application/ld+json"));
        assert_eq!(table.content_type("rdfxml"), Some("application/rdf+xml"));
        assert_eq!(table.content_type("html"), None);
        assert_eq!(table.iter().count(), 4);
    }

    #[test]
    fn test_register_extends_table() {
        let mut table = ContentTypeTable::new();
        table.register("n3", "text/n3").unwrap();
        assert_eq!(
            Format::resolve("n3", &table),
            Ok(Format::Serialized {
                name: "n3".into(),
                content_type: "text/n3".into()
            })
        );
    }

    #[test]
    fn test_register_rejects_bad_entries() {
        let mut table = ContentTypeTable::new();
        assert_eq!(
            table.register("html", "text/html"),
            Err(FormatError::Reserved("html".into()))
        );
        assert_eq!(
            table.register("turtle", "text/n3"),
            Err(FormatError::Duplicate("turtle".into()))
        );
        assert_eq!(
            table.register("Bad Name", "text/n3"),
            Err(FormatError::InvalidName("Bad Name".into()))
        );
        assert_eq!(
            table.register("n3", "text"),
            Err(FormatError::InvalidContentType("text".into()))
        );
        assert_eq!(
            table.register("n3", "text/*"),
            Err(FormatError::InvalidContentType("text/*".into()))
        );
    }

    #[test]
    fn test_resolve_builtin_and_unknown() {
        let table = ContentTypeTable::new();
        assert_eq!(Format::resolve("html", &table), Ok(Format::Html));
        assert_eq!(Format::resolve("jskos", &table), Ok(Format::Jskos));
        assert_eq!(
            Format::resolve("unknownformat123", &table),
            Err(UnsupportedFormat("unknownformat123".into()))
        );
    }

    #[test]
    fn test_json_mapped_format_skips_serializer() {
        let mut table = ContentTypeTable::new();
        table.register("raw", JSON_CONTENT_TYPE).unwrap();
        let raw = Format::resolve("raw", &table).unwrap();
        assert_eq!(raw.serializer_content_type(), None);

        let turtle = Format::resolve("turtle", &table).unwrap();
        assert_eq!(turtle.serializer_content_type(), Some("text/turtle"));
        assert_eq!(Format::Json.serializer_content_type(), None);
    }
}
