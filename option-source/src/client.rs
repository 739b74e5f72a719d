//! HTTP option source client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use url::Url;

use crate::OptionEntry;
use crate::OptionSource;
use crate::OptionsResponse;
use crate::SourceError;

/// Fetches option lists from a remote endpoint.
///
/// Issues a single `GET` to the configured URL and expects a JSON body of
/// the form `{ "options": [{ "label": "...", "value": "..." }] }`.
///
/// This client is cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use option_source::OptionSourceClient;
///
/// let client = OptionSourceClient::builder()
///     .url("https://forge.example.org/p/test/bugs/milestone_options")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let options = client.fetch().await?;
/// ```
#[derive(Clone)]
pub struct OptionSourceClient {
    inner: Arc<OptionSourceClientInner>,
}

struct OptionSourceClientInner {
    url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl OptionSourceClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> OptionSourceClientBuilder<Missing> {
        OptionSourceClientBuilder::new()
    }

    /// Fetches and parses the option list.
    pub async fn fetch(&self) -> Result<Vec<OptionEntry>, SourceError> {
        log::debug!("Fetching options from {}", self.inner.url);

        let mut request = self
            .inner
            .http_client
            .get(self.inner.url.clone())
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::http(status, body));
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let parsed: OptionsResponse = serde_json::from_str(&body).map_err(|e| {
            SourceError::parse_with_body(format!("Failed to parse option list: {}", e), body.clone())
        })?;

        log::debug!(
            "Fetched {} options from {}",
            parsed.options.len(),
            self.inner.url
        );
        Ok(parsed.options)
    }

    /// Returns the source URL.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    fn map_send_error(&self, err: reqwest::Error) -> SourceError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => SourceError::Timeout(timeout),
            _ => SourceError::Network(err),
        }
    }
}

#[async_trait]
impl OptionSource for OptionSourceClient {
    async fn fetch_options(&self) -> Result<Vec<OptionEntry>, SourceError> {
        self.fetch().await
    }
}

impl std::fmt::Debug for OptionSourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSourceClient")
            .field("url", &self.inner.url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`OptionSourceClient`].
///
/// Uses the typestate pattern so `build()` is only reachable once a URL has
/// been given.
pub struct OptionSourceClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl OptionSourceClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the source URL.
    pub fn url(self, url: impl Into<String>) -> OptionSourceClientBuilder<Set<String>> {
        OptionSourceClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for OptionSourceClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> OptionSourceClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the request timeout if one is given.
    pub fn maybe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl OptionSourceClientBuilder<Set<String>> {
    /// Builds the [`OptionSourceClient`].
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be created.
    pub fn build(self) -> Result<OptionSourceClient, SourceError> {
        let raw = self.url.0;
        let url = Url::parse(&raw).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", raw, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(OptionSourceClient {
            inner: Arc::new(OptionSourceClientInner {
                url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_invalid_url() {
        let result = OptionSourceClient::builder().url("not a url").build();
        assert!(matches!(result, Err(SourceError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_keeps_url() {
        let client = OptionSourceClient::builder()
            .url("http://localhost:8080/options")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.url().as_str(), "http://localhost:8080/options");
    }
}
