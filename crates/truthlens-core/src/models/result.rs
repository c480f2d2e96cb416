use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Outcome classification of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Verified,
    Misinformation,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Verdict::Verified => write!(f, "VERIFIED"),
            Verdict::Misinformation => write!(f, "MISINFORMATION"),
        }
    }
}

/// Descriptive breakdown shown next to the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub source_credibility: String,
    pub language_patterns: String,
    pub factual_claims: String,
    pub bias_score: String,
    /// Transcript snippet; video scans only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

impl Analysis {
    /// Label/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = Vec::with_capacity(5);
        if let Some(transcription) = &self.transcription {
            entries.push(("Transcription", transcription.as_str()));
        }
        entries.push(("Source Credibility", self.source_credibility.as_str()));
        entries.push(("Language Patterns", self.language_patterns.as_str()));
        entries.push(("Factual Claims", self.factual_claims.as_str()));
        entries.push(("Bias Score", self.bias_score.as_str()));
        entries
    }
}

/// Hate-speech classification passed through from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HateSpeech {
    /// Winning category, e.g. "Neither" or "Offensive Language".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Category label to score in [0.0, 1.0].
    pub scores: BTreeMap<String, f64>,
}

/// Normalized outcome of one successful scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub verdict: Verdict,
    /// Rounded, in [0, 100].
    pub confidence: u8,
    pub analysis: Analysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hate_speech: Option<HateSpeech>,
    /// Video scans only, e.g. duration and format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}
