//! # Calculation Client
//!
//! The order service's view of the calculation service. Handlers depend on
//! the [`CalculationApi`] trait; production wires in [`CalculationClient`]
//! (HTTP via `reqwest`), tests wire in [`MockCalculationClient`](crate::clients::MockCalculationClient).
use crate::model::CalculationResult;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use service_framework::propagation::inject_current_context;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, field, info, instrument, warn, Span};

/// Hard deadline for one `GET /calculate`, connect to last body byte.
pub const CALCULATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Ways the calculation service can be unavailable to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationClientError {
    /// No complete response within the deadline.
    #[error("Calculation service timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-2xx status.
    #[error("Calculation service returned status {0}")]
    Status(u16),

    /// Connection refused, reset, DNS failure, ...
    #[error("Calculation service unreachable: {0}")]
    Transport(String),

    /// A 2xx response whose body is not a calculation result.
    #[error("Invalid calculation response: {0}")]
    InvalidBody(String),

    #[error("Invalid calculation service URL: {0}")]
    InvalidUrl(String),
}

/// Anything that can produce a cost estimate for the order service.
#[async_trait]
pub trait CalculationApi: Send + Sync {
    async fn calculate(&self) -> Result<CalculationResult, CalculationClientError>;
}

/// HTTP client for `GET <base>/calculate`.
///
/// Cheap to clone; clones share one connection pool. Failures are reported,
/// never retried.
#[derive(Debug, Clone)]
pub struct CalculationClient {
    http: reqwest::Client,
    calculate_url: String,
    timeout: Duration,
}

impl CalculationClient {
    /// Creates a client with the standard 5 second deadline.
    pub fn new(base_url: &str) -> Result<Self, CalculationClientError> {
        Self::with_timeout(base_url, CALCULATION_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, CalculationClientError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let has_host = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(CalculationClientError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CalculationClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            calculate_url: format!("{}/calculate", base_url),
            timeout,
        })
    }

    pub fn calculate_url(&self) -> &str {
        &self.calculate_url
    }

    /// Deadline applied to every request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, e: reqwest::Error) -> CalculationClientError {
        if e.is_timeout() {
            CalculationClientError::Timeout(self.timeout)
        } else if let Some(status) = e.status() {
            CalculationClientError::Status(status.as_u16())
        } else if e.is_decode() {
            CalculationClientError::InvalidBody(error_chain(&e))
        } else {
            CalculationClientError::Transport(error_chain(&e))
        }
    }
}

/// `e` followed by each of its sources, joined with `: `.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[async_trait]
impl CalculationApi for CalculationClient {
    #[instrument(name = "call_calculation_service", skip(self), fields(http.url = field::Empty))]
    async fn calculate(&self) -> Result<CalculationResult, CalculationClientError> {
        Span::current().record("http.url", self.calculate_url.as_str());
        debug!("Sending request");

        let mut headers = HeaderMap::new();
        inject_current_context(&mut headers);

        let response = self
            .http
            .get(&self.calculate_url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Calculation service rejected request");
            return Err(CalculationClientError::Status(status.as_u16()));
        }

        let calculation: CalculationResult =
            response.json().await.map_err(|e| self.classify(e))?;
        info!(?calculation, "calculation_received");
        Ok(calculation)
    }
}
