//! HTTP connection with retry and backoff
//!
//! Provides the reqwest-backed [`Connection`] that handles:
//! - Automatic retries with configurable backoff
//! - Basic auth before a district token exists, bearer auth after
//! - Wrapping every response in the [`Response`] envelope

use super::types::{Connection, Response};
use crate::auth::AuthScheme;
use crate::error::{Error, Result};
use crate::types::{BackoffType, Method, QueryParams};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP connection
#[derive(Debug, Clone)]
pub struct HttpConnectionConfig {
    /// Base URL for relative paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            default_headers: HashMap::new(),
            user_agent: format!("clever-roster/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConnectionConfig {
    /// Create a new config builder
    pub fn builder() -> HttpConnectionConfigBuilder {
        HttpConnectionConfigBuilder::default()
    }
}

/// Builder for HTTP connection config
#[derive(Default)]
pub struct HttpConnectionConfigBuilder {
    config: HttpConnectionConfig,
}

impl HttpConnectionConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpConnectionConfig {
        self.config
    }
}

/// reqwest-backed connection to the roster API
pub struct HttpConnection {
    client: Client,
    config: HttpConnectionConfig,
    auth: AuthScheme,
}

impl HttpConnection {
    /// Create a connection with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpConnectionConfig::default())
    }

    /// Create a connection with custom configuration
    pub fn with_config(config: HttpConnectionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            auth: AuthScheme::None,
        })
    }

    /// Set the authorization scheme
    #[must_use]
    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    /// Current authorization scheme
    pub fn auth(&self) -> &AuthScheme {
        &self.auth
    }

    /// Connection configuration
    pub fn config(&self) -> &HttpConnectionConfig {
        &self.config
    }

    /// Send one request, retrying retryable statuses and transport errors.
    ///
    /// Only idempotent methods are retried; a POST is sent exactly once.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<Response> {
        let full_url = self.build_url(url);
        let max_retries = if method.is_idempotent() {
            self.config.max_retries
        } else {
            0
        };
        let mut attempt = 0;

        loop {
            let mut req = self.client.request(method.into(), &full_url);

            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }

            if let Some(query) = query.filter(|q| !q.is_empty()) {
                req = req.query(query);
            }

            if let Some(body) = body {
                req = req.json(body);
            }

            req = self.auth.apply(req);

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if is_retryable_status(status) && attempt < max_retries {
                        let delay = if status == StatusCode::TOO_MANY_REQUESTS {
                            extract_retry_after(&response)
                                .map_or_else(|| self.calculate_backoff(attempt), |d| {
                                    d.min(self.config.max_backoff)
                                })
                        } else {
                            self.calculate_backoff(attempt)
                        };
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let raw_body = response.text().await?;
                    debug!(status = status.as_u16(), "{} {}", method, full_url);
                    return Response::new(status.as_u16(), raw_body);
                }
                Err(e) => {
                    let err = if e.is_timeout() {
                        Error::Timeout {
                            timeout_ms: self.config.timeout.as_millis() as u64,
                        }
                    } else {
                        Error::Http(e)
                    };

                    if err.is_retryable() && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Transport error ({}), attempt {}/{}, retrying in {:?}",
                            err,
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(err);
                }
            }
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self
                .config
                .initial_backoff
                .checked_mul(attempt.saturating_add(1))
                .unwrap_or(self.config.max_backoff),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config
                    .initial_backoff
                    .checked_mul(factor)
                    .unwrap_or(self.config.max_backoff)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

#[async_trait]
impl Connection for HttpConnection {
    async fn execute(
        &self,
        url: &str,
        method: Method,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<Response> {
        self.send(method, url, query, body).await
    }

    fn set_token(&mut self, access_token: &str) {
        self.auth = AuthScheme::bearer(access_token);
    }
}

impl std::fmt::Debug for HttpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnection")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// Check if an HTTP status is retryable
fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Extract retry-after header value
fn extract_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
}
