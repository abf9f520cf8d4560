//! Mapping of JSKOS fields to RDF triples.
//!
//! Covers the SKOS core of JSKOS (labels, notes, notation, hierarchy,
//! scheme membership) plus a few Dublin Core and FOAF properties.

use serde_json::Value;

use crate::backend::Item;
use crate::rdf::term::{Graph, Term};

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const DCT: &str = "http://purl.org/dc/terms/";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Label of the subject node of items without a `uri`.
const ITEM_NODE: &str = "item";

/// Fields holding `{language: string}`.
const SINGLE_LABELS: [(&str, &str); 1] = [("prefLabel", "prefLabel")];

/// Fields holding `{language: [string]}`.
const LABEL_LISTS: [(&str, &str); 9] = [
    ("altLabel", "altLabel"),
    ("hiddenLabel", "hiddenLabel"),
    ("definition", "definition"),
    ("scopeNote", "scopeNote"),
    ("note", "note"),
    ("example", "example"),
    ("editorialNote", "editorialNote"),
    ("historyNote", "historyNote"),
    ("changeNote", "changeNote"),
];

/// Fields holding `[{uri: ...}]`, with their predicate IRI.
const REFERENCES: [(&str, &str, &str); 10] = [
    ("broader", SKOS, "broader"),
    ("narrower", SKOS, "narrower"),
    ("related", SKOS, "related"),
    ("inScheme", SKOS, "inScheme"),
    ("topConceptOf", SKOS, "topConceptOf"),
    ("topConcepts", SKOS, "hasTopConcept"),
    ("creator", DCT, "creator"),
    ("contributor", DCT, "contributor"),
    ("publisher", DCT, "publisher"),
    ("subject", DCT, "subject"),
];

/// Date fields, emitted as `xsd:date` or `xsd:dateTime` literals.
const DATES: [&str; 3] = ["created", "modified", "issued"];

/// Build the graph describing an item.
pub fn to_graph(item: Option<&Item>) -> Graph {
    let mut graph = Graph::new();
    let Some(Value::Object(fields)) = item else {
        return graph;
    };

    let subject = match fields.get("uri").and_then(Value::as_str) {
        Some(uri) => Term::iri(uri),
        None => Term::blank(ITEM_NODE),
    };

    for uri in strings(fields.get("type")) {
        graph.insert(subject.clone(), format!("{}type", RDF), Term::iri(uri));
    }

    for notation in strings(fields.get("notation")) {
        graph.insert(
            subject.clone(),
            format!("{}notation", SKOS),
            Term::string(notation),
        );
    }

    for (field, local) in SINGLE_LABELS.iter().chain(LABEL_LISTS.iter()) {
        let Some(Value::Object(languages)) = fields.get(*field) else {
            continue;
        };
        for (language, values) in languages {
            for value in strings(Some(values)) {
                graph.insert(
                    subject.clone(),
                    format!("{}{}", SKOS, local),
                    Term::lang_string(value, language),
                );
            }
        }
    }

    for (field, namespace, local) in REFERENCES {
        for uri in references(fields.get(field)) {
            graph.insert(
                subject.clone(),
                format!("{}{}", namespace, local),
                Term::iri(uri),
            );
        }
    }

    for field in DATES {
        if let Some(date) = fields.get(field).and_then(Value::as_str) {
            let datatype = if date.contains('T') { "dateTime" } else { "date" };
            graph.insert(
                subject.clone(),
                format!("{}{}", DCT, field),
                Term::typed(date, format!("{}{}", XSD, datatype)),
            );
        }
    }

    if let Some(url) = fields.get("url").and_then(Value::as_str) {
        graph.insert(subject, format!("{}page", FOAF), Term::iri(url));
    }

    graph
}

/// A string or the strings of an array.
fn strings(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// URIs of the objects in a reference array. Entries may be `null` in
/// JSKOS (unknown reference) and are skipped like objects without `uri`.
fn references(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(values)) => values.iter().filter_map(reference_uri).collect(),
        Some(object @ Value::Object(_)) => reference_uri(object).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn reference_uri(value: &Value) -> Option<&str> {
    value.get("uri").and_then(Value::as_str)
}
