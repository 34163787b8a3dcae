use std::time::Duration;

use async_trait::async_trait;
use musebot_core::poller::PollSource;
use musebot_core::LookupReport;
use serde::Deserialize;
use serde_json::json;

/// Per-request timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Response of `POST /trigger-artist`.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerAck {
    pub status: String,
    pub artist_name: String,
    pub mode: String,
    pub message: String,
}

/// Lookup started by the chat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistLookupHint {
    pub artist_name: String,
    pub mode: String,
}

/// Response of `POST /message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub status: String,
    #[serde(default)]
    pub artist_lookup: Option<ArtistLookupHint>,
}

impl ChatReply {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Error body the API sends with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - e.g. `http://localhost:4000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// POST /trigger-artist
    pub async fn trigger_artist(&self, artist_name: &str) -> Result<TriggerAck, ClientError> {
        let response = self
            .client
            .post(format!("{}/trigger-artist", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "artist_name": artist_name }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// GET /get-artist-results
    pub async fn artist_results(&self, artist_name: &str) -> Result<LookupReport, ClientError> {
        let response = self
            .client
            .get(format!("{}/get-artist-results", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .query(&[("artist_name", artist_name)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// POST /message
    pub async fn send_message(&self, message: &str) -> Result<ChatReply, ClientError> {
        let response = self
            .client
            .post(format!("{}/message", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "message": message }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PollSource for ApiClient {
    type Error = ClientError;

    async fn dispatch(&self, artist_name: &str) -> Result<(), ClientError> {
        let ack = self.trigger_artist(artist_name).await?;
        tracing::debug!(artist_name = %ack.artist_name, mode = %ack.mode, "Lookup dispatched");
        Ok(())
    }

    async fn poll(&self, artist_name: &str) -> Result<LookupReport, ClientError> {
        self.artist_results(artist_name).await
    }
}
