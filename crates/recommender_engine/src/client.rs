use std::time::Duration;

use futures_util::StreamExt;
use recommender_logging::{rec_debug, rec_info};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::{decode_response, FailureKind, RecommendError, ResponseContract};

pub const DEFAULT_ENDPOINT: &str = "https://acelucid-backend.vercel.app/api/recommend";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub contract: ResponseContract,
    pub connect_timeout: Duration,
    /// Overall deadline per request. `None` waits for as long as the endpoint takes.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            contract: ResponseContract::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 1024 * 1024,
        }
    }
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    genre: &'a str,
}

/// Maps a genre/preference query to an ordered list of movie titles.
#[async_trait::async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, query: &str) -> Result<Vec<String>, RecommendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRecommender {
    settings: ClientSettings,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestRecommender {
    pub fn new(settings: ClientSettings) -> Result<Self, RecommendError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| RecommendError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RecommendError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, RecommendError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(RecommendError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(RecommendError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Recommender for ReqwestRecommender {
    async fn recommend(&self, query: &str) -> Result<Vec<String>, RecommendError> {
        let body = serde_json::to_vec(&RecommendRequest { genre: query })
            .map_err(|err| RecommendError::parse(format!("encoding request body: {err}")))?;

        rec_debug!(
            "POST {} query_len={} contract={}",
            self.endpoint,
            query.len(),
            self.settings.contract.name()
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let bytes = self.read_body(response).await?;
        rec_info!("Endpoint answered status={} bytes={}", status, bytes.len());

        decode_response(self.settings.contract, status, &bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RecommendError {
    if err.is_timeout() {
        return RecommendError::new(FailureKind::Timeout, err.to_string());
    }
    RecommendError::new(FailureKind::Network, err.to_string())
}
