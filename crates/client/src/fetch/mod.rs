//! HTTP fetch pipeline for search and detail pages.
//!
//! ### Behaviour
//! - One GET per call, markup returned as text.
//! - Non-2xx responses fail with the status text.
//! - Redirects are followed by the transport.
//! - No retries. No timeout unless one is configured.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reelscore_core::{AppConfig, Error};
use reqwest::{Client, header};
use url::Url;

/// Source of page markup.
///
/// The pipeline only depends on this trait, so tests can serve fixtures
/// without a network.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// GET `url` and return the body as text.
    async fn fetch_html(&self, url: &Url) -> Result<String, Error>;
}

/// Configuration for the fetch client.
#[derive(Debug, Clone, Default)]
pub struct FetchConfig {
    /// User agent string. reqwest sends none when unset.
    pub user_agent: Option<String>,

    /// Request timeout. Requests can wait indefinitely when unset.
    pub timeout: Option<Duration>,
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), timeout: config.timeout() }
    }
}

/// reqwest-backed [`HtmlFetcher`].
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut builder = Client::builder().use_rustls_tls().gzip(true).brotli(true).deflate(true);

        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| Error::ClientBuild(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl HtmlFetcher for FetchClient {
    async fn fetch_html(&self, url: &Url) -> Result<String, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| Error::Network { url: url.to_string(), message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network { url: url.to_string(), message: format!("failed to read response: {}", e) })?;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes)",
            url,
            final_url,
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert!(config.user_agent.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { user_agent: Some("reelscore/0.1".into()), timeout_ms: Some(2500), ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.user_agent.as_deref(), Some("reelscore/0.1"));
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/title/tt0114709/");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body("<html><body>Toy Story</body></html>");
            })
            .await;

        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let url = Url::parse(&server.url("/title/tt0114709/")).unwrap();
        let body = client.fetch_html(&url).await.unwrap();

        mock.assert_async().await;
        assert!(body.contains("Toy Story"));
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_user_agent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/").header("user-agent", "reelscore-test");
                then.status(200).body("ok");
            })
            .await;

        let config = FetchConfig { user_agent: Some("reelscore-test".into()), ..Default::default() };
        let client = FetchClient::new(config).unwrap();
        let url = Url::parse(&server.url("/")).unwrap();
        client.fetch_html(&url).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/m/toy_story");
                then.status(404);
            })
            .await;

        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let url = Url::parse(&server.url("/m/toy_story")).unwrap();
        let err = client.fetch_html(&url).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let client = FetchClient::new(FetchConfig { timeout: Some(Duration::from_secs(2)), ..Default::default() })
            .unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let result = client.fetch_html(&url).await;
        assert!(matches!(result, Err(Error::Network { .. })));
    }
}
