//! External API integrations
//!
//! Both gateways share one outbound policy: a client-wide timeout and a small
//! number of retries with linear backoff for transient failures.

pub mod prediction;
pub mod weather;

pub use prediction::PredictionClient;
pub use weather::WeatherClient;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use thiserror::Error;

use crate::config::HttpConfig;

/// Timeout and retry settings for outbound calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpPolicy {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl From<&HttpConfig> for HttpPolicy {
    fn from(config: &HttpConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

impl HttpPolicy {
    /// Build a client that enforces the timeout on every request
    pub fn client(&self) -> Result<Client, reqwest::Error> {
        Client::builder().timeout(self.timeout).build()
    }

    fn delay_before(&self, attempt: u32) -> Duration {
        self.retry_backoff * attempt
    }
}

/// Why an outbound call failed
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Connect errors, timeouts and 5xx responses are worth another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Transport(e) => e.is_connect() || e.is_timeout(),
            GatewayError::Status { status, .. } => status.is_server_error(),
            GatewayError::Decode(_) => false,
        }
    }
}

async fn send_once(request: RequestBuilder) -> Result<Response, GatewayError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(GatewayError::Status { status, body })
}

/// Send a request built by `build`, retrying transient failures.
///
/// The request is rebuilt for every attempt. Attempt `n` (1-based) that fails
/// transiently waits `retry_backoff * n` before the next one.
pub async fn send_with_retry<F>(
    policy: &HttpPolicy,
    target: &str,
    build: F,
) -> Result<Response, GatewayError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match send_once(build()).await {
            Ok(response) => {
                if attempt > 1 {
                    tracing::info!("{} succeeded on attempt {}", target, attempt);
                }
                return Ok(response);
            }
            Err(e) if e.is_transient() && attempt <= policy.max_retries => {
                let delay = policy.delay_before(attempt);
                tracing::warn!(
                    "Attempt {} to {} failed: {}. Retrying in {:?}...",
                    attempt,
                    target,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Decode a JSON body, reporting failures as [`GatewayError::Decode`]
pub async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, GatewayError> {
    response
        .json()
        .await
        .map_err(|e| GatewayError::Decode(e.to_string()))
}
