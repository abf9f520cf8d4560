//! Built-in HTML views.

use std::fmt::Write;

use serde_json::Value;
use url::Url;

use crate::backend::Item;
use crate::uri::{uri_path, Namespace};
use crate::views::{RenderError, View, ViewRenderer, ViewVars};

/// Fields listed as links on resource pages, with their heading.
const LINK_FIELDS: [(&str, &str); 6] = [
    ("inScheme", "Scheme"),
    ("topConceptOf", "Top concept of"),
    ("broader", "Broader"),
    ("narrower", "Narrower"),
    ("related", "Related"),
    ("topConcepts", "Top concepts"),
];

/// HTML pages rendered without a template engine.
#[derive(Debug, Clone)]
pub struct HtmlViews {
    namespace: Namespace,
}

impl HtmlViews {
    pub fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }

    /// Link target for a URI: the local path inside the namespace, the URI
    /// itself elsewhere.
    fn link(&self, uri: &str) -> String {
        match Url::parse(uri) {
            Ok(parsed) => uri_path(&parsed, &self.namespace),
            Err(_) => uri.to_string(),
        }
    }

    fn render_root(&self, html: &mut String, vars: &ViewVars) {
        let _ = writeln!(
            html,
            "<p>This server provides the namespace <a href=\"{}\">{}</a>.</p>",
            escape(self.namespace.mount_path()),
            escape(&vars.namespace)
        );
    }

    fn render_index(&self, html: &mut String, vars: &ViewVars) {
        match (&vars.uri, &vars.item) {
            (None, _) => {
                if let Some(description) = &vars.site.description {
                    let _ = writeln!(html, "<p>{}</p>", escape(description));
                }
                let _ = writeln!(
                    html,
                    "<p>Namespace: <code>{}</code></p>",
                    escape(&vars.namespace)
                );
            }
            (Some(uri), None) => {
                let _ = writeln!(html, "<h2>Not found</h2>");
                let _ = writeln!(
                    html,
                    "<p>No data is known about <code>{}</code>.</p>",
                    escape(uri)
                );
            }
            (Some(uri), Some(item)) => {
                self.render_item(html, uri, item);
                render_format_links(html, &vars.formats);
            }
        }
    }

    fn render_item(&self, html: &mut String, uri: &str, item: &Item) {
        let _ = writeln!(html, "<h2>{}</h2>", escape(&label(item).unwrap_or(uri)));
        html.push_str("<dl>\n");
        let _ = writeln!(
            html,
            "<dt>URI</dt><dd><a href=\"{}\">{}</a></dd>",
            escape(uri),
            escape(uri)
        );

        let notations: Vec<&str> = item
            .get("notation")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        if !notations.is_empty() {
            let _ = writeln!(
                html,
                "<dt>Notation</dt><dd>{}</dd>",
                escape(&notations.join(", "))
            );
        }

        for (field, heading) in LINK_FIELDS {
            let Some(entries) = item.get(field).and_then(Value::as_array) else {
                continue;
            };
            let links: Vec<String> = entries
                .iter()
                .filter_map(|entry| {
                    let target = entry.get("uri").and_then(Value::as_str)?;
                    let text = label(entry).unwrap_or(target);
                    Some(format!(
                        "<a href=\"{}\">{}</a>",
                        escape(&self.link(target)),
                        escape(text)
                    ))
                })
                .collect();
            if !links.is_empty() {
                let _ = writeln!(html, "<dt>{}</dt><dd>{}</dd>", heading, links.join("<br>"));
            }
        }
        html.push_str("</dl>\n");

        if let Ok(json) = serde_json::to_string_pretty(item) {
            let _ = writeln!(
                html,
                "<details><summary>JSKOS</summary><pre>{}</pre></details>",
                escape(&json)
            );
        }
    }
}

impl ViewRenderer for HtmlViews {
    fn render(&self, view: View, vars: &ViewVars) -> Result<String, RenderError> {
        let mut html = String::with_capacity(4096);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(&vars.site.title));
        html.push_str("</head>\n<body>\n");
        let _ = writeln!(
            html,
            "<header><h1><a href=\"{}\">{}</a></h1></header>",
            escape(self.namespace.mount_path()),
            escape(&vars.site.title)
        );

        html.push_str("<main>\n");
        match view {
            View::Root => self.render_root(&mut html, vars),
            View::Index => self.render_index(&mut html, vars),
        }
        html.push_str("</main>\n</body>\n</html>\n");

        Ok(html)
    }
}

fn render_format_links(html: &mut String, formats: &[String]) {
    if formats.is_empty() {
        return;
    }
    let links: Vec<String> = formats
        .iter()
        .map(|name| format!("<a href=\"?format={}\">{}</a>", escape(name), escape(name)))
        .collect();
    let _ = writeln!(html, "<p>Download: {}</p>", links.join(" | "));
}

/// Preferred label: English first, then any language, then the notation.
fn label(item: &Item) -> Option<&str> {
    if let Some(labels) = item.get("prefLabel").and_then(Value::as_object) {
        let preferred = labels
            .get("en")
            .or_else(|| labels.values().next())
            .and_then(Value::as_str);
        if preferred.is_some() {
            return preferred;
        }
    }
    item.get("notation")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
        .and_then(Value::as_str)
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use serde_json::json;

    fn views() -> HtmlViews {
        HtmlViews::new(Namespace::parse("http://example.org/terms/").unwrap())
    }

    fn vars() -> ViewVars {
        ViewVars::new(
            SiteConfig::default(),
            "http://example.org/terms/",
            vec!["jsonld".into(), "turtle".into()],
        )
    }

    #[test]
    fn test_index_page() {
        let html = views().render(View::Index, &vars()).unwrap();
        assert!(html.contains("<title>JSKOS Proxy</title>"));
        assert!(html.contains("<code>http://example.org/terms/</code>"));
    }

    #[test]
    fn test_item_page_links_locally() {
        let item = json!({
            "uri": "http://example.org/terms/a",
            "prefLabel": {"de": "Apfel", "en": "Apple <red>"},
            "broader": [{"uri": "https://example.org/terms/fruit", "prefLabel": {"en": "Fruit"}}],
            "related": [{"uri": "http://other.org/x"}]
        });
        let vars = vars().with_resource("http://example.org/terms/a", Some(item));
        let html = views().render(View::Index, &vars).unwrap();

        assert!(html.contains("<h2>Apple &lt;red&gt;</h2>"));
        assert!(html.contains("<a href=\"/terms/fruit\">Fruit</a>"));
        assert!(html.contains("<a href=\"http://other.org/x\">http://other.org/x</a>"));
        assert!(html.contains("<a href=\"?format=turtle\">turtle</a>"));
    }

    #[test]
    fn test_missing_item_notice() {
        let vars = vars().with_resource("http://example.org/terms/zzz", None);
        let html = views().render(View::Index, &vars).unwrap();
        assert!(html.contains("<h2>Not found</h2>"));
        assert!(html.contains("http://example.org/terms/zzz"));
    }

    #[test]
    fn test_root_page() {
        let html = views().render(View::Root, &vars()).unwrap();
        assert!(html.contains("<a href=\"/terms/\">http://example.org/terms/</a>"));
    }

    #[test]
    fn test_label_fallbacks() {
        assert_eq!(label(&json!({"prefLabel": {"de": "Apfel"}})), Some("Apfel"));
        assert_eq!(label(&json!({"notation": ["A1"]})), Some("A1"));
        assert_eq!(label(&json!({})), None);
    }
}
