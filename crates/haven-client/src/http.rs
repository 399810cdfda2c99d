use anyhow::{Context, Result};
use reqwest::{header::COOKIE, Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;

/// HTTP handle on the marketplace data source.
///
/// Endpoint paths are resolved against the origin of `base_url`. The optional
/// session is the caller's `Cookie` header, forwarded verbatim so the data
/// source can resolve the seller from it.
#[derive(Debug, Clone)]
pub struct DataSource {
    client: Client,
    base_url: Url,
    session: Option<String>,
}

impl DataSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid data source URL")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid data source URL: {base_url} cannot be a base");
        }
        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// A copy of this handle that sends `cookie` with every request.
    pub fn with_session(&self, cookie: Option<String>) -> Self {
        Self {
            session: cookie,
            ..self.clone()
        }
    }

    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(None);
        if !query.is_empty() {
            let mut qs = url.query_pairs_mut();
            for (k, v) in query {
                qs.append_pair(k, v);
            }
        }
        url
    }

    /// One GET round-trip, decoded as `T`. No retries.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint(path, query);
        debug!(url = %url, "Fetching from data source");

        let mut request = self.client.get(url);
        if let Some(cookie) = &self.session {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.map_err(FetchError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_replaces_path_and_encodes_query() {
        let source = DataSource::new("http://haven.test:8080/ignored?x=1").unwrap();
        let url = source.endpoint("/api/product-images", &[("category", "wood & glass")]);
        assert_eq!(
            url.as_str(),
            "http://haven.test:8080/api/product-images?category=wood+%26+glass"
        );
    }

    #[test]
    fn endpoint_without_query_has_no_question_mark() {
        let source = DataSource::new("http://haven.test").unwrap();
        let url = source.endpoint("/api/product-images", &[]);
        assert_eq!(url.as_str(), "http://haven.test/api/product-images");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(DataSource::new("not a url").is_err());
        assert!(DataSource::new("mailto:seller@haven.test").is_err());
    }
}
