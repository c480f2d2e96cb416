//! Scan orchestration for TruthLens.
//!
//! `ScanSession` is a value object holding one scan's lifecycle with plain
//! transition methods. `ScanController` sequences those transitions around the
//! asynchronous network exchange, publishes session events, and drops replies
//! that arrive for a session that has since been reset.

pub mod controller;
pub mod normalizer;
pub mod progress;
pub mod session;

pub use controller::{ScanController, SessionEvent, SubmitOutcome};
pub use normalizer::{normalize, NO_TRANSCRIPT};
pub use progress::ProgressTracker;
pub use session::{InputOutcome, ScanSession, SessionState, SubmitTicket};
