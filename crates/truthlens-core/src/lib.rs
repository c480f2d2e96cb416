//! TruthLens Core Library
//!
//! This crate provides the domain models, error types, configuration, and input
//! validation shared by the transport, scanner, and CLI crates.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{ErrorMetadata, LogLevel, ScanError, TransportError, ValidationError};
pub use models::{
    Analysis, ContentPayload, HateSpeech, Modality, Preview, RawInput, RawResponse, ScanResult,
    ScanStage, Verdict,
};
pub use validation::{build_payload, PayloadRules};
