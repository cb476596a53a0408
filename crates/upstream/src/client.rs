//! reqwest-backed provider client.
//!
//! Identification headers are installed once as client defaults; every
//! request is a single GET with the configured timeout.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use tracing::{debug, warn};

use crate::TransportError;
use crate::config::UpstreamConfig;
use crate::provider::Upstream;

const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";

#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct UpstreamClient {
    config: UpstreamConfig,
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, ClientBuildError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(HOST_HEADER),
            HeaderValue::from_str(&config.host)
                .map_err(|_| ClientBuildError::InvalidHeader(HOST_HEADER))?,
        );
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ClientBuildError::InvalidHeader(KEY_HEADER))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(KEY_HEADER), key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_decode() {
        TransportError::Decode(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait::async_trait]
impl Upstream for UpstreamClient {
    fn name(&self) -> &str {
        &self.config.host
    }

    async fn fetch(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, TransportError> {
        let url = self.config.url_for(path);
        debug!(url = %url, params = query.len(), "upstream request");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let err = classify(e);
                warn!(path, error = %err, "upstream request failed");
                err
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "upstream returned error status");
            return Err(TransportError::Status(status.as_u16()));
        }

        resp.json().await.map_err(|e| {
            let err = match classify(e) {
                TransportError::Network(msg) => TransportError::Decode(msg),
                other => other,
            };
            warn!(path, error = %err, "upstream body unreadable");
            err
        })
    }
}
