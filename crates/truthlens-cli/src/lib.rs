use truthlens_core::{ErrorMetadata, ScanResult, ScanStage};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One progress line per video stage, e.g. `[3/5] Transcribing audio`.
pub fn format_stage(stage: ScanStage) -> String {
    format!(
        "[{}/{}] {}",
        stage.index() + 1,
        ScanStage::ALL.len(),
        stage.description()
    )
}

/// Verdict line followed by the analysis breakdown, for the terminal.
/// The full result goes to stdout as JSON.
pub fn summarize(result: &ScanResult) -> String {
    let mut out = format!("{} ({}% confidence)", result.verdict, result.confidence);
    for (label, value) in result.analysis.entries() {
        out.push_str(&format!("\n  {}: {}", label, truncate_string(value, 60)));
    }
    out
}

/// User-facing explanation of an error, with the suggested next step when there is one.
pub fn describe_error(error: &impl ErrorMetadata) -> String {
    match error.suggested_action() {
        Some(action) => format!("{}. {}.", error.client_message(), action),
        None => error.client_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthlens_core::{Analysis, ValidationError, Verdict};

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_counts_characters() {
        assert_eq!(truncate_string("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn stage_lines_are_one_based() {
        assert_eq!(format_stage(ScanStage::Submitting), "[1/5] Uploading video / fetching URL");
        assert_eq!(format_stage(ScanStage::Done), "[5/5] Finished");
    }

    fn sample_result(transcription: Option<&str>) -> ScanResult {
        ScanResult {
            verdict: Verdict::Misinformation,
            confidence: 70,
            analysis: Analysis {
                source_credibility: "Low".to_string(),
                language_patterns: "Emotional/Sensational".to_string(),
                factual_claims: "Unverified".to_string(),
                bias_score: "High".to_string(),
                transcription: transcription.map(str::to_string),
            },
            hate_speech: None,
            metadata: None,
        }
    }

    #[test]
    fn summary_lists_analysis_in_display_order() {
        let summary = summarize(&sample_result(None));
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(
            lines,
            vec![
                "MISINFORMATION (70% confidence)",
                "  Source Credibility: Low",
                "  Language Patterns: Emotional/Sensational",
                "  Factual Claims: Unverified",
                "  Bias Score: High",
            ]
        );
    }

    #[test]
    fn summary_leads_with_transcription_for_video() {
        let summary = summarize(&sample_result(Some("short clip")));
        assert_eq!(summary.lines().nth(1), Some("  Transcription: short clip"));
        assert_eq!(summary.lines().count(), 6);
    }

    #[test]
    fn rejected_input_is_described_with_next_step() {
        let error = ValidationError::UnsupportedType {
            mime_type: "text/plain".to_string(),
        };
        assert_eq!(
            describe_error(&error),
            "Files of type 'text/plain' cannot be scanned here. Choose a file of the supported type."
        );
        assert_eq!(
            describe_error(&ValidationError::EmptyInput),
            "Please provide some content to scan. Enter some content before scanning."
        );
    }
}

/// Initialize tracing for the CLI. JSON lines when `json` is set or `LOG_FORMAT=json`.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let json = json || std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
