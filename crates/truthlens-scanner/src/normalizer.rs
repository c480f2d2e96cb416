//! Converts a loosely-typed backend response into a `ScanResult`.
//!
//! Normalization is total: missing or mistyped fields fall back to defaults
//! instead of failing the scan.

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use truthlens_core::{Analysis, HateSpeech, Modality, RawResponse, ScanResult, Verdict};

pub const NO_TRANSCRIPT: &str = "No transcript available";

pub fn normalize(raw: &RawResponse, modality: Modality) -> ScanResult {
    let fake = percentage(raw.get("fake_percentage"));
    let real = percentage(raw.get("real_percentage"));
    // Ties resolve to Verified.
    let flagged = fake > real;

    let is_video = modality == Modality::Video;

    let analysis = Analysis {
        source_credibility: pick(flagged, "Low", "High"),
        language_patterns: pick(flagged, "Emotional/Sensational", "Factual/Neutral"),
        factual_claims: pick(flagged, "Unverified", "Cross-referenced"),
        bias_score: pick(flagged, "High", "Low"),
        transcription: is_video.then(|| transcription(raw)),
    };

    ScanResult {
        verdict: if flagged {
            Verdict::Misinformation
        } else {
            Verdict::Verified
        },
        confidence: fake.max(real).round() as u8,
        analysis,
        hate_speech: raw
            .get("hate_speech")
            .and_then(JsonValue::as_object)
            .map(hate_speech),
        metadata: is_video.then(|| metadata(raw)),
    }
}

fn pick(flagged: bool, when_flagged: &str, otherwise: &str) -> String {
    if flagged { when_flagged } else { otherwise }.to_string()
}

/// Numbers and numeric strings are accepted; anything else reads as absent.
fn number(value: Option<&JsonValue>) -> Option<f64> {
    match value? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn percentage(value: Option<&JsonValue>) -> f64 {
    number(value).map(|v| v.clamp(0.0, 100.0)).unwrap_or(0.0)
}

fn transcription(raw: &RawResponse) -> String {
    raw.get("text_snippet")
        .and_then(JsonValue::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NO_TRANSCRIPT)
        .to_string()
}

fn hate_speech(object: &Map<String, JsonValue>) -> HateSpeech {
    let scores = object
        .get("scores")
        .and_then(JsonValue::as_object)
        .map(|scores| {
            scores
                .iter()
                .filter_map(|(label, score)| {
                    number(Some(score)).map(|s| (label.clone(), s.clamp(0.0, 1.0)))
                })
                .collect()
        })
        .unwrap_or_default();

    HateSpeech {
        label: object
            .get("label")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        confidence: number(object.get("confidence")),
        scores,
    }
}

fn metadata(raw: &RawResponse) -> BTreeMap<String, String> {
    raw.get("metadata")
        .and_then(JsonValue::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, value)| {
                    let rendered = match value {
                        JsonValue::Null => return None,
                        JsonValue::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    Some((key.clone(), rendered))
                })
                .collect()
        })
        .unwrap_or_default()
}
