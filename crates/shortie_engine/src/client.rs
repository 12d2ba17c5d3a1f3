use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use shortie_core::wire::{encode_shorten_request, parse_shorten_response, parse_stats_payload};
use shortie_core::{ShortenResult, StatsKey, StatsResult};
use shortie_logging::{redact, shortie_debug};

use crate::{EngineError, FailureKind, RequestError};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// `POST` endpoint that accepts `{ "longUrl": ... }`.
    pub shorten_endpoint: String,
    /// `GET` endpoint queried with the stats key.
    pub stats_endpoint: String,
    /// Query parameter carrying the stats key.
    pub stats_query_param: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            shorten_endpoint: "https://n8n.presiyangeorgiev.eu/webhook/shortie/shorten-url"
                .to_string(),
            stats_endpoint: "https://n8n.presiyangeorgiev.eu/webhook/shortie/stats".to_string(),
            stats_query_param: "secret".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ShortenService: Send + Sync {
    async fn shorten(&self, long_url: &str) -> Result<ShortenResult, RequestError>;
}

#[async_trait::async_trait]
pub trait StatsService: Send + Sync {
    async fn fetch_stats(&self, key: &StatsKey) -> Result<StatsResult, RequestError>;
}

/// HTTP client for both remote endpoints.
#[derive(Debug, Clone)]
pub struct ReqwestShortieClient {
    client: reqwest::Client,
    shorten_url: Url,
    stats_url: Url,
    stats_query_param: String,
    max_bytes: u64,
}

impl ReqwestShortieClient {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        let shorten_url = parse_endpoint(&settings.shorten_endpoint)?;
        let stats_url = parse_endpoint(&settings.stats_endpoint)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self {
            client,
            shorten_url,
            stats_url,
            stats_query_param: settings.stats_query_param,
            max_bytes: settings.max_bytes,
        })
    }

    fn stats_url_for(&self, key: &StatsKey) -> Url {
        let mut url = self.stats_url.clone();
        url.query_pairs_mut()
            .append_pair(&self.stats_query_param, key.as_str());
        url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, RequestError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(too_large(self.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(too_large(self.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ShortenService for ReqwestShortieClient {
    async fn shorten(&self, long_url: &str) -> Result<ShortenResult, RequestError> {
        let body = encode_shorten_request(long_url)?;
        shortie_debug!("POST {} ({} bytes)", self.shorten_url, body.len());

        let response = self
            .client
            .post(self.shorten_url.clone())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = self.read_body(response).await?;
        Ok(parse_shorten_response(&bytes)?)
    }
}

#[async_trait::async_trait]
impl StatsService for ReqwestShortieClient {
    async fn fetch_stats(&self, key: &StatsKey) -> Result<StatsResult, RequestError> {
        shortie_debug!(
            "GET {} ({}={})",
            self.stats_url,
            self.stats_query_param,
            redact(key.as_str())
        );

        let response = self
            .client
            .get(self.stats_url_for(key))
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = self.read_body(response).await?;
        Ok(parse_stats_payload(&bytes)?)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, EngineError> {
    let url = Url::parse(raw).map_err(|err| EngineError::InvalidEndpoint {
        url: raw.to_string(),
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(EngineError::InvalidEndpoint {
            url: raw.to_string(),
            message: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

fn too_large(max_bytes: u64, actual: u64) -> RequestError {
    RequestError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_url_carries_key_as_query_parameter() {
        let settings = ServiceSettings {
            stats_endpoint: "https://api.example/stats".to_string(),
            ..ServiceSettings::default()
        };
        let client = ReqwestShortieClient::new(settings).unwrap();
        let key = StatsKey::new("a b&c").unwrap();

        assert_eq!(
            client.stats_url_for(&key).as_str(),
            "https://api.example/stats?secret=a+b%26c"
        );
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let settings = ServiceSettings {
            shorten_endpoint: "ftp://api.example/shorten".to_string(),
            ..ServiceSettings::default()
        };
        assert!(matches!(
            ReqwestShortieClient::new(settings),
            Err(EngineError::InvalidEndpoint { .. })
        ));
    }
}
