//! Transport seam between scan sessions and the network.
//!
//! A scan crosses the network in two observable steps: the HTTP exchange
//! (`ScanTransport::send`) and the interpretation of its body
//! (`TransportReply::into_raw`). Sessions report progress between the two.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::fmt::Debug;
use truthlens_core::{ContentPayload, RawResponse, TransportError};

use crate::network_error;

/// Anything that can carry a payload to the verification service.
#[async_trait]
pub trait ScanTransport: Send + Sync + Debug {
    /// Perform the HTTP exchange for `payload`.
    ///
    /// Only failures to complete the exchange are errors here; an error status
    /// is still a reply and is judged by `TransportReply::into_raw`.
    async fn send(&self, payload: &ContentPayload) -> Result<TransportReply, TransportError>;
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: Bytes,
}

impl TransportReply {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, TransportError> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;
        Ok(Self { status, body })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check the status and parse the body into a raw response object.
    pub fn into_raw(self) -> Result<RawResponse, TransportError> {
        if !self.is_success() {
            return Err(TransportError::HttpStatus {
                code: self.status,
                message: self.error_message(),
            });
        }

        RawResponse::from_slice(&self.body)
    }

    /// The backend's `error` field when present, else the status reason.
    fn error_message(&self) -> String {
        serde_json::from_slice::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_string)
            })
            .filter(|message| !message.trim().is_empty())
            .or_else(|| {
                StatusCode::from_u16(self.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}
