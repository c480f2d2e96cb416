use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;

use super::modality::Modality;
use crate::validation::content_type_for_path;

/// Validated content ready for submission. One variant is active per scan.
#[derive(Clone, PartialEq, Eq)]
pub enum ContentPayload {
    Text {
        body: String,
    },
    UrlRef {
        href: String,
    },
    Image {
        bytes: Bytes,
        mime_type: String,
        file_name: String,
    },
    Video {
        bytes: Bytes,
        mime_type: String,
        file_name: String,
    },
    VideoUrlRef {
        href: String,
    },
}

impl ContentPayload {
    pub fn modality(&self) -> Modality {
        match self {
            ContentPayload::Text { .. } => Modality::Text,
            ContentPayload::UrlRef { .. } => Modality::Url,
            ContentPayload::Image { .. } => Modality::Image,
            ContentPayload::Video { .. } | ContentPayload::VideoUrlRef { .. } => Modality::Video,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ContentPayload::Text { body } => body.trim().is_empty(),
            ContentPayload::UrlRef { href } | ContentPayload::VideoUrlRef { href } => {
                href.trim().is_empty()
            }
            ContentPayload::Image { bytes, .. } | ContentPayload::Video { bytes, .. } => {
                bytes.is_empty()
            }
        }
    }

    /// Displayable preview for file payloads.
    pub fn preview(&self) -> Option<Preview> {
        match self {
            ContentPayload::Image {
                bytes, mime_type, ..
            }
            | ContentPayload::Video {
                bytes, mime_type, ..
            } => Some(Preview::new(mime_type.as_str(), bytes.clone())),
            _ => None,
        }
    }
}

impl Debug for ContentPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ContentPayload::Text { body } => f
                .debug_struct("Text")
                .field("chars", &body.chars().count())
                .finish(),
            ContentPayload::UrlRef { href } => {
                f.debug_struct("UrlRef").field("href", href).finish()
            }
            ContentPayload::Image {
                bytes,
                mime_type,
                file_name,
            } => f
                .debug_struct("Image")
                .field("size", &bytes.len())
                .field("mime_type", mime_type)
                .field("file_name", file_name)
                .finish(),
            ContentPayload::Video {
                bytes,
                mime_type,
                file_name,
            } => f
                .debug_struct("Video")
                .field("size", &bytes.len())
                .field("mime_type", mime_type)
                .field("file_name", file_name)
                .finish(),
            ContentPayload::VideoUrlRef { href } => {
                f.debug_struct("VideoUrlRef").field("href", href).finish()
            }
        }
    }
}

/// Unvalidated user input as it arrives from the front end.
#[derive(Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Typed or pasted text; also the URL field of URL and video-by-URL scans.
    Text(String),
    /// A selected file with the MIME type reported for it.
    File {
        bytes: Bytes,
        mime_type: String,
        file_name: String,
    },
}

impl RawInput {
    pub fn text(value: impl Into<String>) -> Self {
        RawInput::Text(value.into())
    }

    pub fn file(
        bytes: impl Into<Bytes>,
        mime_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        RawInput::File {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Read a file from disk, inferring its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        let mime_type = content_type_for_path(path).to_string();

        Ok(RawInput::File {
            bytes: Bytes::from(bytes),
            mime_type,
            file_name,
        })
    }
}

impl Debug for RawInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RawInput::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            RawInput::File {
                bytes,
                mime_type,
                file_name,
            } => f
                .debug_struct("File")
                .field("size", &bytes.len())
                .field("mime_type", mime_type)
                .field("file_name", file_name)
                .finish(),
        }
    }
}

/// Selected file kept for display before the scan is confirmed.
///
/// Shares the payload's buffer; the base64 data URL is only built when asked for.
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
    mime_type: String,
    bytes: Bytes,
}

impl Preview {
    pub fn new(mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// `data:<mime>;base64,...` rendering of the file.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl Debug for Preview {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Preview")
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}
