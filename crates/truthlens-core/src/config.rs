//! Configuration module
//!
//! Settings for reaching the verification service and for the optional input
//! checks applied by the payload builder.

use std::env;

use crate::validation::PayloadRules;

// Common constants
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const TEXT_ENDPOINT: &str = "/analyze";
const IMAGE_ENDPOINT: &str = "/analyze-image";
const VIDEO_ENDPOINT: &str = "/analyze-video";
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Scan client configuration
#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub api_url: String,
    pub text_endpoint: String,
    pub image_endpoint: String,
    pub video_endpoint: String,
    pub request_timeout_secs: u64,
    /// Upper bound on submitted text length. `None` leaves text unbounded.
    pub max_text_chars: Option<usize>,
    /// Reject video files whose MIME type is not `video/*`.
    pub strict_video_types: bool,
    pub environment: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            text_endpoint: TEXT_ENDPOINT.to_string(),
            image_endpoint: IMAGE_ENDPOINT.to_string(),
            video_endpoint: VIDEO_ENDPOINT.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            max_text_chars: None,
            strict_video_types: false,
            environment: "development".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let api_url = env::var("TRUTHLENS_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let max_text_chars = match env::var("TRUTHLENS_MAX_TEXT_CHARS") {
            Ok(raw) => Some(raw.trim().parse::<usize>().map_err(|_| {
                anyhow::anyhow!("TRUTHLENS_MAX_TEXT_CHARS must be a valid number")
            })?),
            Err(_) => None,
        };

        let config = ScanConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            text_endpoint: env::var("TRUTHLENS_TEXT_ENDPOINT")
                .unwrap_or_else(|_| TEXT_ENDPOINT.to_string()),
            image_endpoint: env::var("TRUTHLENS_IMAGE_ENDPOINT")
                .unwrap_or_else(|_| IMAGE_ENDPOINT.to_string()),
            video_endpoint: env::var("TRUTHLENS_VIDEO_ENDPOINT")
                .unwrap_or_else(|_| VIDEO_ENDPOINT.to_string()),
            request_timeout_secs: env::var("TRUTHLENS_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            max_text_chars,
            strict_video_types: env::var("TRUTHLENS_STRICT_VIDEO_TYPES")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "TRUTHLENS_API_URL must be an http:// or https:// URL"
            ));
        }

        for (name, endpoint) in [
            ("TRUTHLENS_TEXT_ENDPOINT", &self.text_endpoint),
            ("TRUTHLENS_IMAGE_ENDPOINT", &self.image_endpoint),
            ("TRUTHLENS_VIDEO_ENDPOINT", &self.video_endpoint),
        ] {
            if !endpoint.starts_with('/') {
                return Err(anyhow::anyhow!("{} must start with '/'", name));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "TRUTHLENS_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Input rules handed to the payload builder.
    pub fn payload_rules(&self) -> PayloadRules {
        PayloadRules {
            max_text_chars: self.max_text_chars,
            strict_video_types: self.strict_video_types,
        }
    }
}
