//! TruthLens CLI: submit content to the verification service and print the verdict.
//!
//! Set TRUTHLENS_API_URL (or API_URL) to point at the backend; see `ScanConfig`
//! for the remaining variables.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use truthlens_api_client::ApiClient;
use truthlens_cli::{describe_error, format_stage, init_tracing, summarize};
use truthlens_core::{Modality, RawInput, ScanConfig};
use truthlens_scanner::{ScanController, SessionEvent, SubmitOutcome};

#[derive(Parser)]
#[command(name = "truthlens", about = "Misinformation scanner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan pasted text
    Text {
        /// Text to analyze
        text: String,
    },
    /// Scan the article behind a URL
    Url {
        /// Article URL
        url: String,
    },
    /// Scan an image (the backend extracts its text)
    Image {
        /// Path to the image file
        path: PathBuf,
    },
    /// Scan a video file or a video URL
    Video {
        /// Path to the video file
        #[arg(required_unless_present = "url")]
        path: Option<PathBuf>,
        /// Video URL for the backend to download instead
        #[arg(long, conflicts_with = "path")]
        url: Option<String>,
    },
}

impl Commands {
    async fn into_input(self) -> anyhow::Result<(Modality, RawInput)> {
        let input = match self {
            Commands::Text { text } => (Modality::Text, RawInput::text(text)),
            Commands::Url { url } => (Modality::Url, RawInput::text(url)),
            Commands::Image { path } => (Modality::Image, read_file(&path).await?),
            Commands::Video { path, url } => match (path, url) {
                (_, Some(url)) => (Modality::Video, RawInput::text(url)),
                (Some(path), None) => (Modality::Video, read_file(&path).await?),
                (None, None) => anyhow::bail!("Provide a video path or --url"),
            },
        };
        Ok(input)
    }
}

async fn read_file(path: &Path) -> anyhow::Result<RawInput> {
    RawInput::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize result")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env as well.
    let config = ScanConfig::from_env()
        .context("Invalid configuration. Check TRUTHLENS_API_URL (or API_URL)")?;
    init_tracing(config.is_production());
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;

    let cli = Cli::parse();
    let (modality, input) = cli.command.into_input().await?;

    let controller = ScanController::with_rules(modality, config.payload_rules(), client);
    let mut events = controller.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let SessionEvent::StageReached { stage, .. } = event {
                eprintln!("{}", format_stage(stage));
            }
        }
    });

    if let Err(error) = controller.acquire_input(input).await {
        eprintln!("{}", describe_error(&error));
        return Err(error).context("Input rejected");
    }

    tracing::info!(modality = %modality, api_url = %config.api_url, "Scanning");
    let outcome = controller.submit().await;

    // Closing the channel lets the printer finish what is queued.
    drop(controller);
    printer.await.ok();

    match outcome {
        SubmitOutcome::Completed(result) => {
            eprintln!("{}", summarize(&result));
            print_json(&result)?;
            Ok(())
        }
        SubmitOutcome::Failed(error) => {
            eprintln!("{}", describe_error(&error));
            anyhow::bail!("{}", error.user_message())
        }
        SubmitOutcome::Ignored => anyhow::bail!("Nothing to scan"),
        SubmitOutcome::Discarded => anyhow::bail!("Scan was cancelled"),
    }
}
