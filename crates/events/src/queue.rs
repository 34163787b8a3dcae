//! HTTP client for the external event queue.
//!
//! The queue exposes an Inngest-style event API: a single `POST` of a JSON
//! event to the configured URL (which already carries the event key).

use std::time::Duration;

use crate::envelope::QueueEvent;

/// Upper bound on a single publish call.
const PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from publishing to the queue.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The queue answered with a non-2xx status.
    #[error("Queue rejected event ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Publishes events to the external queue.
pub struct EventQueueClient {
    client: reqwest::Client,
    url: String,
}

impl EventQueueClient {
    /// Create a client for the queue's event endpoint.
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Publish one event. Succeeds once the queue has accepted it.
    pub async fn publish(&self, event: &QueueEvent) -> Result<(), QueueError> {
        let response = self
            .client
            .post(&self.url)
            .timeout(PUBLISH_TIMEOUT)
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(QueueError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(event = %event.name, url = %self.url, "Event published");
        Ok(())
    }
}
