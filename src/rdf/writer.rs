//! Graph writers for N-Triples, Turtle and RDF/XML.
//!
//! All writers walk the graph in its sorted order, so equal graphs always
//! produce equal bytes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::rdf::jskos::{DCT, FOAF, RDF, SKOS, XSD};
use crate::rdf::term::{escape_iri, escape_literal, Graph, Term};

const PREFIXES: [(&str, &str); 5] = [
    ("rdf", RDF),
    ("skos", SKOS),
    ("dct", DCT),
    ("foaf", FOAF),
    ("xsd", XSD),
];

/// Split an IRI into a known prefix and a simple local name.
fn compact(iri: &str) -> Option<(&'static str, &str)> {
    PREFIXES.iter().find_map(|(prefix, namespace)| {
        let local = iri.strip_prefix(namespace)?;
        is_simple_name(local).then_some((*prefix, local))
    })
}

/// Names valid both as Turtle local names and as XML element names.
fn is_simple_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

/// Serialize as N-Triples, one statement per line.
pub fn ntriples(graph: &Graph) -> String {
    let mut out = String::new();
    for triple in graph.iter() {
        let _ = writeln!(
            out,
            "{} {} {} .",
            triple.subject.to_ntriples(),
            Term::iri(triple.predicate.as_str()).to_ntriples(),
            triple.object.to_ntriples()
        );
    }
    out
}

/// Serialize as Turtle with prefixes and per-subject grouping.
pub fn turtle(graph: &Graph) -> String {
    let mut used = BTreeSet::new();
    let mut body = String::new();
    let mut subject: Option<&Term> = None;
    let mut predicate: Option<&str> = None;

    for triple in graph.iter() {
        if subject == Some(&triple.subject) {
            if predicate == Some(triple.predicate.as_str()) {
                body.push_str(", ");
            } else {
                body.push_str(" ;\n    ");
                body.push_str(&turtle_predicate(&triple.predicate, &mut used));
                body.push(' ');
            }
        } else {
            if subject.is_some() {
                body.push_str(" .\n\n");
            }
            body.push_str(&turtle_term(&triple.subject, &mut used));
            body.push(' ');
            body.push_str(&turtle_predicate(&triple.predicate, &mut used));
            body.push(' ');
        }
        body.push_str(&turtle_term(&triple.object, &mut used));
        subject = Some(&triple.subject);
        predicate = Some(triple.predicate.as_str());
    }
    if subject.is_some() {
        body.push_str(" .\n");
    }

    let mut out = String::new();
    for (prefix, namespace) in PREFIXES.iter().filter(|(p, _)| used.contains(p)) {
        let _ = writeln!(out, "@prefix {}: <{}> .", prefix, namespace);
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&body);
    out
}

fn turtle_predicate(iri: &str, used: &mut BTreeSet<&'static str>) -> String {
    if iri == format!("{}type", RDF) {
        return "a".to_string();
    }
    turtle_iri(iri, used)
}

fn turtle_iri(iri: &str, used: &mut BTreeSet<&'static str>) -> String {
    match compact(iri) {
        Some((prefix, local)) => {
            used.insert(prefix);
            format!("{}:{}", prefix, local)
        }
        None => format!("<{}>", escape_iri(iri)),
    }
}

fn turtle_term(term: &Term, used: &mut BTreeSet<&'static str>) -> String {
    match term {
        Term::Iri(iri) => turtle_iri(iri, used),
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
                out.push_str("^^");
                out.push_str(&turtle_iri(datatype, used));
            }
            out
        }
    }
}

/// Serialize as RDF/XML with one `rdf:Description` per subject.
pub fn rdf_xml(graph: &Graph) -> String {
    // namespace IRI -> prefix; known prefixes first, others numbered
    let mut namespaces: BTreeMap<String, String> = BTreeMap::new();
    namespaces.insert(RDF.to_string(), "rdf".to_string());

    let mut body = String::new();
    let mut subject: Option<&Term> = None;

    for triple in graph.iter() {
        let Some(element) = xml_element_name(&triple.predicate, &mut namespaces) else {
            tracing::warn!(predicate = %triple.predicate, "Predicate has no XML name, skipped");
            continue;
        };

        if subject != Some(&triple.subject) {
            if subject.is_some() {
                body.push_str("  </rdf:Description>\n");
            }
            match &triple.subject {
                Term::Iri(iri) => {
                    let _ = writeln!(
                        body,
                        "  <rdf:Description rdf:about=\"{}\">",
                        escape_xml(iri)
                    );
                }
                Term::Blank(label) | Term::Literal { value: label, .. } => {
                    let _ = writeln!(
                        body,
                        "  <rdf:Description rdf:nodeID=\"{}\">",
                        escape_xml(label)
                    );
                }
            }
            subject = Some(&triple.subject);
        }

        match &triple.object {
            Term::Iri(iri) => {
                let _ = writeln!(
                    body,
                    "    <{} rdf:resource=\"{}\"/>",
                    element,
                    escape_xml(iri)
                );
            }
            Term::Blank(label) => {
                let _ = writeln!(
                    body,
                    "    <{} rdf:nodeID=\"{}\"/>",
                    element,
                    escape_xml(label)
                );
            }
            Term::Literal {
                value,
                language,
                datatype,
            } => {
                let mut attributes = String::new();
                if let Some(language) = language {
                    let _ = write!(attributes, " xml:lang=\"{}\"", escape_xml(language));
                } else if let Some(datatype) = datatype {
                    let _ = write!(attributes, " rdf:datatype=\"{}\"", escape_xml(datatype));
                }
                let _ = writeln!(
                    body,
                    "    <{}{}>{}</{}>",
                    element,
                    attributes,
                    escape_xml(value),
                    element
                );
            }
        }
    }
    if subject.is_some() {
        body.push_str("  </rdf:Description>\n");
    }

    let mut declared: Vec<(&String, &String)> = namespaces.iter().collect();
    declared.sort_by(|a, b| a.1.cmp(b.1));

    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF");
    for (namespace, prefix) in declared {
        let _ = write!(out, "\n    xmlns:{}=\"{}\"", prefix, escape_xml(namespace));
    }
    out.push_str(">\n");
    out.push_str(&body);
    out.push_str("</rdf:RDF>\n");
    out
}

/// Qualified element name for a predicate, registering its namespace.
fn xml_element_name(predicate: &str, namespaces: &mut BTreeMap<String, String>) -> Option<String> {
    if let Some((prefix, local)) = compact(predicate) {
        let namespace = PREFIXES
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, ns)| *ns)?;
        namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| prefix.to_string());
        return Some(format!("{}:{}", prefix, local));
    }

    let split = predicate.rfind(|c| c == '#' || c == '/')? + 1;
    let (namespace, local) = predicate.split_at(split);
    if !is_simple_name(local) {
        return None;
    }
    let next = namespaces.len();
    let prefix = namespaces
        .entry(namespace.to_string())
        .or_insert_with(|| format!("ns{}", next));
    Some(format!("{}:{}", prefix, local))
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        let mut graph = Graph::new();
        let a = Term::iri("http://example.org/terms/a");
        graph.insert(a.clone(), format!("{}prefLabel", SKOS), Term::lang_string("Apple", "en"));
        graph.insert(a.clone(), format!("{}prefLabel", SKOS), Term::lang_string("Apfel", "de"));
        graph.insert(a.clone(), format!("{}type", RDF), Term::iri(format!("{}Concept", SKOS)));
        graph.insert(a, format!("{}notation", SKOS), Term::string("A & B"));
        graph
    }

    #[test]
    fn test_ntriples() {
        let output = ntriples(&graph());
        assert_eq!(output.lines().count(), 4);
        assert!(output.contains(
            "<http://example.org/terms/a> \
             <http://www.w3.org/2004/02/skos/core#prefLabel> \"Apfel\"@de .\n"
        ));
    }

    #[test]
    fn test_turtle_groups_by_subject() {
        let output = turtle(&graph());
        assert_eq!(
            output,
            "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
             @prefix skos: <http://www.w3.org/2004/02/skos/core#> .\n\
             \n\
             <http://example.org/terms/a> a skos:Concept ;\n    \
             skos:notation \"A & B\" ;\n    \
             skos:prefLabel \"Apfel\"@de, \"Apple\"@en .\n"
        );
    }

    #[test]
    fn test_turtle_empty_graph() {
        assert_eq!(turtle(&Graph::new()), "");
    }

    #[test]
    fn test_rdf_xml() {
        let output = rdf_xml(&graph());
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF"));
        assert!(output.contains("xmlns:skos=\"http://www.w3.org/2004/02/skos/core#\""));
        assert!(output.contains("<rdf:Description rdf:about=\"http://example.org/terms/a\">"));
        assert!(output.contains("<skos:prefLabel xml:lang=\"de\">Apfel</skos:prefLabel>"));
        assert!(output.contains("<skos:notation>A &amp; B</skos:notation>"));
        assert!(output.contains(
            "<rdf:type rdf:resource=\"http://www.w3.org/2004/02/skos/core#Concept\"/>"
        ));
        assert!(output.ends_with("</rdf:RDF>\n"));
    }

    #[test]
    fn test_rdf_xml_unknown_namespace() {
        let mut graph = Graph::new();
        graph.insert(
            Term::blank("item"),
            "http://other.example/vocab#label",
            Term::string("x"),
        );
        let output = rdf_xml(&graph);
        assert!(output.contains("xmlns:ns1=\"http://other.example/vocab#\""));
        assert!(output.contains("<rdf:Description rdf:nodeID=\"item\">"));
        assert!(output.contains("<ns1:label>x</ns1:label>"));
    }
}
