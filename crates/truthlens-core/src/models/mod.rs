//! Data models for scans
//!
//! Each sub-module covers one concern of a scan: what is submitted, what the
//! backend returns, what the user is shown, and where a video scan stands.

mod modality;
mod payload;
mod response;
mod result;
mod stage;

pub use modality::*;
pub use payload::*;
pub use response::*;
pub use result::*;
pub use stage::*;
