//! Validation modules

pub mod content_type;
pub mod payload;

pub use content_type::{content_type_for_extension, content_type_for_path};
pub use payload::{build_payload, PayloadRules};
