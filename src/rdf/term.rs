//! RDF term types: IRI, blank node, and literal.
//!
//! Terms derive a total order so a graph can keep its triples sorted, which
//! is what makes every writer byte-deterministic.

use std::collections::BTreeSet;

/// A node or value in a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// Absolute IRI, stored expanded.
    Iri(String),
    /// Blank node label without the `_:` prefix.
    Blank(String),
    /// Literal with optional language tag or datatype IRI.
    Literal {
        value: String,
        language: Option<String>,
        datatype: Option<String>,
    },
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Language-tagged literal. An empty tag or JSKOS' `-` (unknown
    /// language) yields a plain literal.
    pub fn lang_string(value: impl Into<String>, language: &str) -> Self {
        let language = match language {
            "" | "-" => None,
            tag => Some(tag.to_string()),
        };
        Term::Literal {
            value: value.into(),
            language,
            datatype: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// N-Triples representation.
    pub fn to_ntriples(&self) -> String {
        match self {
            Term::Iri(iri) => format!("<{}>", escape_iri(iri)),
            Term::Blank(label) => format!("_:{}", label),
            Term::Literal {
                value,
                language,
                datatype,
            } => {
                let mut out = format!("\"{}\"", escape_literal(value));
                if let Some(language) = language {
                    out.push('@');
                    out.push_str(language);
                } else if let Some(datatype) = datatype {
                    out.push_str("^^<");
                    out.push_str(&escape_iri(datatype));
                    out.push('>');
                }
                out
            }
        }
    }
}

/// A single statement. The predicate is always an IRI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

/// Sorted set of triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: BTreeSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: Term, predicate: impl Into<String>, object: Term) {
        self.triples.insert(Triple {
            subject,
            predicate: predicate.into(),
            object,
        });
    }

    /// Triples ordered by subject, predicate, object.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// Escape a literal for N-Triples and Turtle.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode characters not allowed inside `<...>`.
pub fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        if c <= ' ' || "<>\"{}|^`\\".contains(c) {
            out.push_str(&format!("%{:02X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}
