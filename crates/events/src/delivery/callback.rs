//! Callback delivery with exponential-backoff retry.
//!
//! [`CallbackDelivery`] posts an [`ArtistCallback`] to the API's webhook.
//! Failed attempts are retried three times with exponential backoff
//! (1 s, 2 s, 4 s). Client errors other than 408 and 429 are final.

use std::time::Duration;

use musebot_core::ArtistCallback;

/// Retry delays (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(4),
];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The webhook returned a non-2xx status code.
    #[error("Callback returned HTTP {0}")]
    HttpStatus(u16),
}

impl CallbackError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CallbackError::Request(_) => true,
            CallbackError::HttpStatus(status) => {
                !(400..500).contains(status) || matches!(status, 408 | 429)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CallbackDelivery
// ---------------------------------------------------------------------------

pub struct CallbackDelivery {
    client: reqwest::Client,
    retry_delays: Vec<Duration>,
}

impl CallbackDelivery {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            retry_delays: RETRY_DELAYS.to_vec(),
        }
    }

    /// Override the backoff schedule. One retry per entry.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Post `callback` to `url`, retrying on failure.
    ///
    /// Returns `Ok(())` on the first successful attempt, otherwise the first
    /// error seen.
    pub async fn deliver(&self, url: &str, callback: &ArtistCallback) -> Result<(), CallbackError> {
        let mut first_err: Option<CallbackError> = None;

        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.try_send(url, callback).await {
                Ok(()) => return Ok(()),
                Err(e) if !e.is_retryable() => {
                    tracing::error!(
                        url,
                        artist_name = %callback.artist_name,
                        error = %e,
                        "Callback rejected, not retrying"
                    );
                    return Err(first_err.unwrap_or(e));
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url,
                        artist_name = %callback.artist_name,
                        error = %e,
                        "Callback delivery attempt failed, retrying"
                    );
                    first_err.get_or_insert(e);
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(url, callback).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(
                    url,
                    artist_name = %callback.artist_name,
                    error = %e,
                    "Callback delivery failed after all retries"
                );
                Err(first_err.unwrap_or(e))
            }
        }
    }

    async fn try_send(&self, url: &str, callback: &ArtistCallback) -> Result<(), CallbackError> {
        let response = self
            .client
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .json(callback)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CallbackError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}
