//! Request URI normalization.
//!
//! # Responsibilities
//! - Parse the `uri` query parameter as an absolute URI
//! - Redirect query-parameter access to in-namespace resources
//! - Resolve path-based requests against the namespace
//! - Flag requests addressing the namespace itself
//!
//! # Design Decisions
//! - An empty `uri` parameter counts as absent
//! - Canonicalization is idempotent: a redirect target never redirects again

use thiserror::Error;
use url::Url;

use crate::uri::namespace::{uri_path, Namespace};

/// Error type for URI normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid URI")]
    InvalidUri,

    #[error("path {0} is outside the namespace")]
    NotMounted(String),
}

/// An absolute URI ready for lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUri {
    pub uri: Url,
    /// True iff the URI is protocolless-equal to the namespace.
    pub is_root: bool,
}

/// Outcome of normalizing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serve this URI.
    Resource(ResolvedUri),
    /// Answer with a permanent redirect to this local path.
    Redirect(String),
}

/// Determine the identity of a request.
pub fn normalize(
    path: &str,
    uri_param: Option<&str>,
    namespace: &Namespace,
) -> Result<Resolution, NormalizeError> {
    if let Some(raw) = uri_param.filter(|raw| !raw.is_empty()) {
        let uri = Url::parse(raw).map_err(|_| NormalizeError::InvalidUri)?;
        let local = uri_path(&uri, namespace);
        if local != uri.as_str() {
            return Ok(Resolution::Redirect(local));
        }
        let is_root = namespace.is_root(&uri);
        return Ok(Resolution::Resource(ResolvedUri { uri, is_root }));
    }

    let remainder = namespace
        .local_remainder(path)
        .ok_or_else(|| NormalizeError::NotMounted(path.to_string()))?;
    let uri = namespace
        .resolve(remainder)
        .map_err(|_| NormalizeError::InvalidUri)?;
    let is_root = namespace.is_root(&uri);

    Ok(Resolution::Resource(ResolvedUri { uri, is_root }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespace() -> Namespace {
        Namespace::parse("http://example.org/terms/").unwrap()
    }

    fn resource(resolution: Resolution) -> ResolvedUri {
        match resolution {
            Resolution::Resource(resolved) => resolved,
            Resolution::Redirect(target) => panic!("unexpected redirect to {}", target),
        }
    }

    #[test]
    fn test_path_request_resolves_against_namespace() {
        let resolved = resource(normalize("/terms/abc", None, &namespace()).unwrap());
        assert_eq!(resolved.uri.as_str(), "http://example.org/terms/abc");
        assert!(!resolved.is_root);
    }

    #[test]
    fn test_bare_mount_path_is_root() {
        let resolved = resource(normalize("/terms/", None, &namespace()).unwrap());
        assert!(resolved.is_root);
        let resolved = resource(normalize("/terms", None, &namespace()).unwrap());
        assert!(resolved.is_root);
    }

    #[test]
    fn test_path_outside_mount_is_rejected() {
        assert_eq!(
            normalize("/elsewhere", None, &namespace()),
            Err(NormalizeError::NotMounted("/elsewhere".into()))
        );
    }

    #[test]
    fn test_invalid_uri_parameter() {
        assert_eq!(
            normalize("/terms/", Some("no scheme here"), &namespace()),
            Err(NormalizeError::InvalidUri)
        );
    }

    #[test]
    fn test_in_namespace_parameter_redirects_to_path() {
        let ns = namespace();
        let first = normalize("/terms/", Some("https://example.org/terms/abc"), &ns).unwrap();
        assert_eq!(first, Resolution::Redirect("/terms/abc".into()));

        // following the redirect resolves without another one
        let second = resource(normalize("/terms/abc", None, &ns).unwrap());
        assert_eq!(second.uri.as_str(), "http://example.org/terms/abc");
    }

    #[test]
    fn test_outside_parameter_passes_through() {
        let resolved =
            resource(normalize("/terms/", Some("http://other.org/x"), &namespace()).unwrap());
        assert_eq!(resolved.uri.as_str(), "http://other.org/x");
        assert!(!resolved.is_root);
    }

    #[test]
    fn test_empty_parameter_is_ignored() {
        let resolved = resource(normalize("/terms/abc", Some(""), &namespace()).unwrap());
        assert_eq!(resolved.uri.as_str(), "http://example.org/terms/abc");
    }
}
