//! JSKOS API backend.
//!
//! # Responsibilities
//! - Query `GET {base}data?uri=<uri>` on a JSKOS API
//! - Map an empty result to "no item"
//! - Surface transport failures and error statuses as `BackendError`
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` shared by all requests
//! - No timeout unless configured; no retries

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::backend::{Backend, BackendError, Item};

/// Backend forwarding lookups to a JSKOS API.
#[derive(Debug, Clone)]
pub struct ApiBackend {
    base: Url,
    client: reqwest::Client,
}

impl ApiBackend {
    /// Create a backend for the API at `url`.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut base = Url::parse(url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base,
            client: builder.build()?,
        })
    }

    fn endpoint(&self, uri: &str) -> Result<Url, BackendError> {
        let mut endpoint = self.base.join("data")?;
        endpoint.query_pairs_mut().append_pair("uri", uri);
        Ok(endpoint)
    }
}

#[async_trait]
impl Backend for ApiBackend {
    async fn get_item(&self, uri: &str) -> Result<Option<Item>, BackendError> {
        let endpoint = self.endpoint(uri)?;
        tracing::debug!(endpoint = %endpoint, "Querying JSKOS API");

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let items: Vec<Item> = response.json().await?;
        Ok(items.into_iter().next())
    }
}

impl std::fmt::Display for ApiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "api {}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_uri() {
        let backend = ApiBackend::new("http://api.example.org/jskos", None).unwrap();
        let endpoint = backend.endpoint("http://example.org/terms/a b").unwrap();
        assert_eq!(
            endpoint.as_str(),
            "http://api.example.org/jskos/data?uri=http%3A%2F%2Fexample.org%2Fterms%2Fa+b"
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            ApiBackend::new("not a url", None),
            Err(BackendError::Url(_))
        ));
    }
}
