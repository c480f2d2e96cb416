use truthlens_core::{Modality, ScanStage};

/// Monotonic stage cursor for one scan attempt.
///
/// Only video scans report stages; for other modalities the tracker stays at
/// `Submitting` and every advance is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    enabled: bool,
    current: ScanStage,
}

impl ProgressTracker {
    pub fn for_modality(modality: Modality) -> Self {
        Self {
            enabled: modality.tracks_progress(),
            current: ScanStage::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn current(&self) -> ScanStage {
        self.current
    }

    /// Move forward to `stage`. Returns the new stage only when it changed.
    pub fn advance(&mut self, stage: ScanStage) -> Option<ScanStage> {
        if !self.enabled || stage <= self.current {
            return None;
        }
        tracing::debug!(from = %self.current, to = %stage, "Scan stage advanced");
        self.current = stage;
        Some(stage)
    }

    pub fn reset(&mut self) {
        self.current = ScanStage::default();
    }
}
