//! Domain methods for the verification service.
//!
//! | Payload | Endpoint | Encoding |
//! |---|---|---|
//! | text | text endpoint | JSON `{ "text" }` |
//! | URL | text endpoint | JSON `{ "url" }` |
//! | image | image endpoint | multipart field `image` |
//! | video file | video endpoint | multipart field `video` |
//! | video URL | video endpoint | JSON `{ "url" }` |

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use truthlens_core::{ContentPayload, RawResponse, TransportError};

use crate::transport::{ScanTransport, TransportReply};
use crate::ApiClient;

impl ApiClient {
    /// Analyze pasted text.
    pub async fn analyze_text(&self, text: &str) -> Result<TransportReply, TransportError> {
        self.post_json(&self.endpoints().text, &json!({ "text": text }))
            .await
    }

    /// Analyze the article behind a URL; the backend fetches and extracts it.
    pub async fn analyze_url(&self, url: &str) -> Result<TransportReply, TransportError> {
        self.post_json(&self.endpoints().text, &json!({ "url": url }))
            .await
    }

    /// Analyze an uploaded image (OCR, then text analysis on the backend).
    pub async fn analyze_image(
        &self,
        bytes: &Bytes,
        mime_type: &str,
        file_name: &str,
    ) -> Result<TransportReply, TransportError> {
        let form = Form::new().part("image", file_part(bytes, mime_type, file_name));
        self.post_multipart(&self.endpoints().image, form).await
    }

    /// Analyze an uploaded video (transcription, then text analysis on the backend).
    pub async fn analyze_video(
        &self,
        bytes: &Bytes,
        mime_type: &str,
        file_name: &str,
    ) -> Result<TransportReply, TransportError> {
        let form = Form::new().part("video", file_part(bytes, mime_type, file_name));
        self.post_multipart(&self.endpoints().video, form).await
    }

    /// Analyze a video the backend downloads itself.
    pub async fn analyze_video_url(&self, url: &str) -> Result<TransportReply, TransportError> {
        self.post_json(&self.endpoints().video, &json!({ "url": url }))
            .await
    }

    /// Full round trip for one payload: exchange, status check, and parse.
    pub async fn submit(&self, payload: &ContentPayload) -> Result<RawResponse, TransportError> {
        self.send(payload).await?.into_raw()
    }
}

#[async_trait]
impl ScanTransport for ApiClient {
    async fn send(&self, payload: &ContentPayload) -> Result<TransportReply, TransportError> {
        tracing::debug!(
            modality = %payload.modality(),
            base_url = %self.base_url(),
            "Sending scan request"
        );

        match payload {
            ContentPayload::Text { body } => self.analyze_text(body).await,
            ContentPayload::UrlRef { href } => self.analyze_url(href).await,
            ContentPayload::Image {
                bytes,
                mime_type,
                file_name,
            } => self.analyze_image(bytes, mime_type, file_name).await,
            ContentPayload::Video {
                bytes,
                mime_type,
                file_name,
            } => self.analyze_video(bytes, mime_type, file_name).await,
            ContentPayload::VideoUrlRef { href } => self.analyze_video_url(href).await,
        }
    }
}

/// File part with the reported MIME type; an unparseable type is left off.
fn file_part(bytes: &Bytes, mime_type: &str, file_name: &str) -> Part {
    let part = Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
    match part.mime_str(mime_type) {
        Ok(part) => part,
        Err(_) => {
            tracing::debug!(mime_type = %mime_type, "Ignoring unparseable MIME type");
            Part::bytes(bytes.to_vec()).file_name(file_name.to_string())
        }
    }
}
