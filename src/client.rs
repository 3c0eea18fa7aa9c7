//! Client for the analysis service, and error types.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use thiserror::Error;

use crate::dispatch::FeedEvent;
use crate::http::{build_http_client, decorate_request};
use crate::options::{HttpTransport, TransportOptions};
use crate::stream::FeedResponseExt;

const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("service error: {0}")]
    Service(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// A boxed, ordered stream of feed events. At most one terminal event,
/// always last.
pub type EventStream = Pin<Box<dyn Stream<Item = FeedEvent> + Send>>;

/// Streaming side of the analysis service.
///
/// The session driver in [`crate::session`] is written against this trait
/// rather than the concrete client, so consumers can substitute a scripted
/// feed in tests.
#[async_trait]
pub trait StreamingAnalysis: Send + Sync {
    /// Open the long-lived analysis feed for one email record.
    ///
    /// A successful return means the response body is open; everything
    /// after that point, mid-stream transport failures included, arrives
    /// through the event stream itself.
    async fn analyze_stream(&self, email_id: u64) -> Result<EventStream, FeedError>;
}

/// HTTP client for the mail analysis service.
pub struct MailSiftClient {
    transport_options: TransportOptions<HttpTransport>,
}

impl MailSiftClient {
    /// Create a client with the given transport options.
    pub fn new(transport_options: TransportOptions<HttpTransport>) -> Self {
        Self { transport_options }
    }

    pub(crate) fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }

    pub(crate) fn api_base(&self) -> String {
        self.transport_options
            .provider
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    /// Decode a non-2xx response body into a service error.
    ///
    /// The service reports failures as JSON objects with an `error` field;
    /// anything else falls back to the raw status and body.
    pub(crate) fn handle_error_response(status: reqwest::StatusCode, body: &str) -> FeedError {
        if let Ok(error_resp) = serde_json::from_str::<ServiceErrorBody>(body) {
            FeedError::Service(error_resp.error)
        } else {
            FeedError::Service(format!("HTTP {}: {}", status, body))
        }
    }
}

impl Default for MailSiftClient {
    fn default() -> Self {
        Self::new(TransportOptions {
            timeout: None,
            provider: HttpTransport::default(),
        })
    }
}

#[async_trait]
impl StreamingAnalysis for MailSiftClient {
    async fn analyze_stream(&self, email_id: u64) -> Result<EventStream, FeedError> {
        let url = format!("{}/emails/{}/analyze_with_ai", self.api_base(), email_id);

        let http_client = build_http_client(&self.transport_options)?;
        let req = decorate_request(
            http_client.post(&url).header(CONTENT_TYPE, "application/json"),
            &self.transport_options.provider,
        );

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::handle_error_response(status, &body));
        }

        Ok(Box::pin(response.feed_events()))
    }
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}
