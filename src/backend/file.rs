//! File-backed item store.
//!
//! # Responsibilities
//! - Load items from a JSON array or newline-delimited JSON file
//! - Index items by their protocolless `uri`
//! - Answer lookups without touching the filesystem again

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;

use crate::backend::{Backend, BackendError, Item};
use crate::uri::protocolless;

/// Items held in memory, loaded once at startup.
#[derive(Debug, Default)]
pub struct FileBackend {
    source: String,
    items: HashMap<String, Item>,
}

impl FileBackend {
    /// Load items from `path`.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        let content = fs::read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let items = parse_items(&content)?;
        Ok(Self::from_items(path.display().to_string(), items))
    }

    /// Build a store from items already in memory.
    ///
    /// Items without a string `uri` field cannot be addressed and are
    /// skipped. Later items replace earlier ones with the same URI.
    pub fn from_items(source: impl Into<String>, items: impl IntoIterator<Item = Item>) -> Self {
        let source = source.into();
        let mut index = HashMap::new();
        let mut skipped = 0usize;

        for item in items {
            match item.get("uri").and_then(|uri| uri.as_str()) {
                Some(uri) => {
                    index.insert(protocolless(uri).to_string(), item);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(source = %source, skipped, "Skipped items without uri");
        }

        Self {
            source,
            items: index,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl Backend for FileBackend {
    async fn get_item(&self, uri: &str) -> Result<Option<Item>, BackendError> {
        Ok(self.items.get(protocolless(uri)).cloned())
    }
}

impl std::fmt::Display for FileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file {} ({} items)", self.source, self.items.len())
    }
}

/// Parse a JSON array, or one JSON object per line.
fn parse_items(content: &str) -> Result<Vec<Item>, BackendError> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).map_err(|source| BackendError::Data {
            line: source.line(),
            source,
        });
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| BackendError::Data {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_lookup_ignores_scheme() {
        let backend = FileBackend::from_items(
            "memory",
            vec![json!({"uri": "http://example.org/terms/a", "prefLabel": {"en": "A"}})],
        );

        let item = backend
            .get_item("https://example.org/terms/a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item["prefLabel"]["en"], "A");
        assert!(backend.get_item("http://example.org/terms/b").await.unwrap().is_none());
    }

    #[test]
    fn test_items_without_uri_are_skipped() {
        let backend = FileBackend::from_items(
            "memory",
            vec![json!({"uri": "http://example.org/a"}), json!({"notation": ["x"]})],
        );
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_open_ndjson() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"uri\": \"http://example.org/a\"}}").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{{\"uri\": \"http://example.org/b\"}}").unwrap();

        let backend = FileBackend::open(file.path()).unwrap();
        assert_eq!(backend.len(), 2);
    }

    #[test]
    fn test_open_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"uri\": \"http://example.org/a\"}}]").unwrap();

        let backend = FileBackend::open(file.path()).unwrap();
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_open_reports_bad_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"uri\": \"http://example.org/a\"}}").unwrap();
        writeln!(file, "{{not json").unwrap();

        match FileBackend::open(file.path()) {
            Err(BackendError::Data { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected data error, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_open_missing_file() {
        let err = FileBackend::open(Path::new("/nonexistent/items.ndjson")).unwrap_err();
        assert!(matches!(err, BackendError::Io { .. }));
    }
}
