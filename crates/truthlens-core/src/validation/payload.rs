//! Turns raw user input into a typed `ContentPayload`.

use crate::error::ValidationError;
use crate::models::{ContentPayload, Modality, RawInput};

/// Optional checks on top of the always-on ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadRules {
    pub max_text_chars: Option<usize>,
    pub strict_video_types: bool,
}

/// Validate and normalize input for the given modality.
///
/// Text is kept verbatim; URLs are trimmed but otherwise not inspected, since
/// the backend decides whether it can fetch them.
pub fn build_payload(
    modality: Modality,
    input: RawInput,
    rules: &PayloadRules,
) -> Result<ContentPayload, ValidationError> {
    match (modality, input) {
        (Modality::Text, RawInput::Text(body)) => {
            if body.trim().is_empty() {
                return Err(ValidationError::EmptyInput);
            }
            if let Some(max) = rules.max_text_chars {
                let len = body.chars().count();
                if len > max {
                    return Err(ValidationError::TooLong { len, max });
                }
            }
            Ok(ContentPayload::Text { body })
        }
        (Modality::Url, RawInput::Text(href)) => Ok(ContentPayload::UrlRef {
            href: non_empty_trimmed(&href)?,
        }),
        (Modality::Video, RawInput::Text(href)) => Ok(ContentPayload::VideoUrlRef {
            href: non_empty_trimmed(&href)?,
        }),
        (
            Modality::Image,
            RawInput::File {
                bytes,
                mime_type,
                file_name,
            },
        ) => {
            if !has_type_prefix(&mime_type, "image/") {
                return Err(ValidationError::UnsupportedType { mime_type });
            }
            if bytes.is_empty() {
                return Err(ValidationError::EmptyInput);
            }
            Ok(ContentPayload::Image {
                bytes,
                mime_type,
                file_name,
            })
        }
        (
            Modality::Video,
            RawInput::File {
                bytes,
                mime_type,
                file_name,
            },
        ) => {
            if rules.strict_video_types && !has_type_prefix(&mime_type, "video/") {
                return Err(ValidationError::UnsupportedType { mime_type });
            }
            if bytes.is_empty() {
                return Err(ValidationError::EmptyInput);
            }
            Ok(ContentPayload::Video {
                bytes,
                mime_type,
                file_name,
            })
        }
        (Modality::Image, RawInput::Text(_)) => Err(ValidationError::UnsupportedType {
            mime_type: "text/plain".to_string(),
        }),
        (Modality::Text | Modality::Url, RawInput::File { mime_type, .. }) => {
            Err(ValidationError::UnsupportedType { mime_type })
        }
    }
}

fn non_empty_trimmed(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

fn has_type_prefix(mime_type: &str, prefix: &str) -> bool {
    mime_type.trim().to_lowercase().starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(modality: Modality, input: RawInput) -> Result<ContentPayload, ValidationError> {
        build_payload(modality, input, &PayloadRules::default())
    }

    #[test]
    fn text_is_kept_verbatim() {
        let payload = build(Modality::Text, RawInput::text("  Water is wet.  ")).unwrap();
        assert_eq!(
            payload,
            ContentPayload::Text {
                body: "  Water is wet.  ".to_string()
            }
        );
    }

    #[test]
    fn blank_text_is_empty_input() {
        assert_eq!(
            build(Modality::Text, RawInput::text(" \n\t ")),
            Err(ValidationError::EmptyInput)
        );
    }

    #[test]
    fn long_text_is_accepted_without_a_limit() {
        let body = "a".repeat(100_000);
        assert!(build(Modality::Text, RawInput::text(body)).is_ok());
    }

    #[test]
    fn configured_limit_rejects_long_text() {
        let rules = PayloadRules {
            max_text_chars: Some(10),
            ..PayloadRules::default()
        };
        let err = build_payload(Modality::Text, RawInput::text("x".repeat(11)), &rules);
        assert_eq!(err, Err(ValidationError::TooLong { len: 11, max: 10 }));
    }

    #[test]
    fn url_is_trimmed_but_not_validated() {
        let payload = build(Modality::Url, RawInput::text("  not really a url ")).unwrap();
        assert_eq!(
            payload,
            ContentPayload::UrlRef {
                href: "not really a url".to_string()
            }
        );
        assert_eq!(
            build(Modality::Url, RawInput::text("   ")),
            Err(ValidationError::EmptyInput)
        );
    }

    #[test]
    fn video_text_input_becomes_video_url() {
        let payload = build(Modality::Video, RawInput::text("https://youtu.be/abc")).unwrap();
        assert!(matches!(payload, ContentPayload::VideoUrlRef { .. }));
    }

    #[test]
    fn image_requires_image_mime_type() {
        let err = build(
            Modality::Image,
            RawInput::file(b"hello".to_vec(), "text/plain", "notes.txt"),
        );
        assert_eq!(
            err,
            Err(ValidationError::UnsupportedType {
                mime_type: "text/plain".to_string()
            })
        );

        let ok = build(
            Modality::Image,
            RawInput::file(b"\x89PNG".to_vec(), "IMAGE/PNG", "a.png"),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn empty_image_file_is_empty_input() {
        assert_eq!(
            build(Modality::Image, RawInput::file(Vec::<u8>::new(), "image/png", "a.png")),
            Err(ValidationError::EmptyInput)
        );
    }

    #[test]
    fn video_file_type_is_not_checked_by_default() {
        let payload = build(
            Modality::Video,
            RawInput::file(b"data".to_vec(), "application/octet-stream", "clip.bin"),
        )
        .unwrap();
        assert!(matches!(payload, ContentPayload::Video { .. }));
    }

    #[test]
    fn strict_rules_check_video_type() {
        let rules = PayloadRules {
            strict_video_types: true,
            ..PayloadRules::default()
        };
        let err = build_payload(
            Modality::Video,
            RawInput::file(b"data".to_vec(), "image/gif", "clip.gif"),
            &rules,
        );
        assert!(matches!(
            err,
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn mismatched_input_kinds_are_unsupported() {
        assert!(matches!(
            build(Modality::Image, RawInput::text("https://x.test/a.png")),
            Err(ValidationError::UnsupportedType { .. })
        ));
        assert!(matches!(
            build(
                Modality::Text,
                RawInput::file(b"a".to_vec(), "text/plain", "a.txt")
            ),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }
}
