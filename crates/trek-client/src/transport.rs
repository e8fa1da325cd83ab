use async_trait::async_trait;
use bytes::Bytes;
use protocol::{PredictionRequest, HEALTH_PATH};
use reqwest::Client;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("api base url is empty")]
    EmptyBaseUrl,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Status and raw body of a completed exchange. The body is left unparsed so
/// the orchestrator can classify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: Bytes,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<RawReply, TransportError>;
}

pub fn join_base_path(base: &str, path: &str) -> Result<String, TransportError> {
    if base.trim().is_empty() {
        return Err(TransportError::EmptyBaseUrl);
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}

pub struct HttpTransport {
    http_client: Client,
    predict_url: String,
    health_url: String,
}

impl HttpTransport {
    pub fn new(api_base: &str, predict_path: &str) -> Result<Self, TransportError> {
        let predict_url = join_base_path(api_base, predict_path)?;
        let health_url = join_base_path(api_base, HEALTH_PATH)?;
        let http_client = match build_http_client() {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!(
                    event = "transport.client.build_failed",
                    error = %err,
                    "reqwest build failed; falling back to default client"
                );
                Client::new()
            }
        };
        Ok(Self {
            http_client,
            predict_url,
            health_url,
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    pub async fn health(&self) -> Result<RawReply, TransportError> {
        let response = self.http_client.get(&self.health_url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(RawReply { status, body })
    }
}

#[async_trait]
impl PredictionTransport for HttpTransport {
    async fn predict(&self, request: &PredictionRequest) -> Result<RawReply, TransportError> {
        tracing::debug!(
            event = "transport.request",
            url = %self.predict_url,
            location_len = request.location.len(),
            "sending prediction request"
        );
        let started = Instant::now();
        let response = self
            .http_client
            .post(&self.predict_url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(
                    event = "transport.error",
                    is_connect = err.is_connect(),
                    is_timeout = err.is_timeout(),
                    error = %err,
                    "prediction request did not complete"
                );
                err
            })?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::debug!(
            event = "transport.response",
            status,
            body_len = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "prediction response received"
        );
        Ok(RawReply { status, body })
    }
}

fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("trek-safety/", env!("CARGO_PKG_VERSION")))
        .build()
}
