//! HTTP client for the TruthLens verification service.
//!
//! Provides a minimal client with generic JSON/multipart POST helpers and the
//! per-modality analyze calls. The scanner crate drives it through the
//! `ScanTransport` trait so sessions can be tested against scripted transports.

pub mod api;
pub mod transport;

use anyhow::{Context, Result};
use reqwest::multipart::Form;
use reqwest::Client;
use std::time::Duration;
use truthlens_core::{ScanConfig, TransportError};

pub use transport::{ScanTransport, TransportReply};

/// Endpoint paths of the verification service.
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub text: String,
    pub image: String,
    pub video: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        let config = ScanConfig::default();
        Self {
            text: config.text_endpoint,
            image: config.image_endpoint,
            video: config.video_endpoint,
        }
    }
}

/// HTTP client for the verification service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(base_url: String, endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints,
        })
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            Endpoints {
                text: config.text_endpoint.clone(),
                image: config.image_endpoint.clone(),
                video: config.video_endpoint.clone(),
            },
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Create client from environment: TRUTHLENS_API_URL (or API_URL) and friends.
    pub fn from_env() -> Result<Self> {
        let config = ScanConfig::from_env().context("Invalid scan configuration")?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body. Returns the reply without judging its status.
    pub async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<TransportReply, TransportError> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        TransportReply::read(response).await
    }

    /// POST a multipart form. Returns the reply without judging its status.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
    ) -> Result<TransportReply, TransportError> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        TransportReply::read(response).await
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Collapse a reqwest failure (DNS, connect, timeout, body read) into a transport error.
pub(crate) fn network_error(err: reqwest::Error) -> TransportError {
    use std::error::Error;

    let mut cause = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };

    let mut source = err.source();
    while let Some(inner) = source {
        cause.push_str(&format!(": {}", inner));
        source = inner.source();
    }

    TransportError::NetworkUnavailable(cause)
}
