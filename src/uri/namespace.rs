//! Namespace handling.
//!
//! # Responsibilities
//! - Validate the configured base URI
//! - Map request paths below the mount path to namespace URIs
//! - Provide scheme-insensitive comparison keys
//! - Rewrite in-namespace URIs to their local path form

use thiserror::Error;
use url::Url;

/// Error type for namespace parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("namespace is not an absolute URI: {0}")]
    Parse(#[from] url::ParseError),

    #[error("namespace must use http or https, got {0}")]
    Scheme(String),

    #[error("namespace must end with '/': {0}")]
    TrailingSlash(String),

    #[error("namespace must not carry a query or fragment: {0}")]
    QueryOrFragment(String),
}

/// Base URI served by the gateway.
///
/// The path component doubles as the mount path of the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    base: Url,
}

impl Namespace {
    /// Parse and validate a namespace URI.
    pub fn parse(input: &str) -> Result<Self, NamespaceError> {
        let base = Url::parse(input)?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(NamespaceError::Scheme(base.scheme().to_string()));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(NamespaceError::QueryOrFragment(input.to_string()));
        }
        if !base.path().ends_with('/') {
            return Err(NamespaceError::TrailingSlash(input.to_string()));
        }

        Ok(Self { base })
    }

    pub fn as_url(&self) -> &Url {
        &self.base
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// Path under which the gateway is mounted, always ending in `/`.
    pub fn mount_path(&self) -> &str {
        self.base.path()
    }

    /// Whether the gateway is mounted below the server root.
    pub fn is_mounted_below_root(&self) -> bool {
        self.mount_path() != "/"
    }

    /// Strip the mount path from a request path.
    ///
    /// The mount path without its trailing slash counts as the empty
    /// remainder. Paths outside the mount path yield `None`.
    pub fn local_remainder<'a>(&self, path: &'a str) -> Option<&'a str> {
        let mount = self.mount_path();
        if let Some(rest) = path.strip_prefix(mount) {
            return Some(rest);
        }
        if path == mount.trim_end_matches('/') {
            return Some("");
        }
        None
    }

    /// Resolve a namespace-relative remainder to an absolute URI.
    ///
    /// The remainder is always treated as a relative path, so a leading
    /// `//` or a colon in the first segment cannot switch host or scheme.
    pub fn resolve(&self, remainder: &str) -> Result<Url, url::ParseError> {
        let mut uri = self.base.join(&format!("./{}", remainder))?;
        uri.set_query(None);
        uri.set_fragment(None);
        Ok(uri)
    }

    /// Whether `uri` is protocolless-equal to the namespace itself.
    pub fn is_root(&self, uri: &Url) -> bool {
        protocolless(uri.as_str()) == protocolless(self.as_str())
    }

    /// Whether `uri` lies within the namespace, ignoring the scheme.
    pub fn contains(&self, uri: &Url) -> bool {
        protocolless(uri.as_str()).starts_with(protocolless(self.as_str()))
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.base.as_str())
    }
}

/// Scheme-insensitive comparison key of a URI.
///
/// `http://example.org/a` and `https://example.org/a` both map to
/// `//example.org/a`. Strings without a scheme are returned unchanged.
pub fn protocolless(uri: &str) -> &str {
    match uri.find("://") {
        Some(idx) => &uri[idx + 1..],
        None => uri,
    }
}

/// Local path form of an in-namespace URI.
///
/// URIs outside the namespace are returned unchanged.
pub fn uri_path(uri: &Url, namespace: &Namespace) -> String {
    let key = protocolless(uri.as_str());
    let base = protocolless(namespace.as_str());
    match key.strip_prefix(base) {
        Some(rest) => format!("{}{}", namespace.mount_path(), rest),
        None => uri.to_string(),
    }
}
