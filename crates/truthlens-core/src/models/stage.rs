use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Checkpoint in the progress display of a video scan.
///
/// Ordered: within one attempt the active stage never moves backwards.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    #[default]
    Submitting = 0,
    AwaitingResponse = 1,
    Parsing = 2,
    Finalizing = 3,
    Done = 4,
}

impl ScanStage {
    pub const ALL: [ScanStage; 5] = [
        ScanStage::Submitting,
        ScanStage::AwaitingResponse,
        ScanStage::Parsing,
        ScanStage::Finalizing,
        ScanStage::Done,
    ];

    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Short narrative label.
    pub fn label(&self) -> &'static str {
        match self {
            ScanStage::Submitting => "uploading",
            ScanStage::AwaitingResponse => "converting",
            ScanStage::Parsing => "transcribing",
            ScanStage::Finalizing => "detecting",
            ScanStage::Done => "finished",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScanStage::Submitting => "Uploading video / fetching URL",
            ScanStage::AwaitingResponse => "Converting video to audio",
            ScanStage::Parsing => "Transcribing audio",
            ScanStage::Finalizing => "Running detection",
            ScanStage::Done => "Finished",
        }
    }
}

impl Display for ScanStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered_by_index() {
        for pair in ScanStage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].index() + 1, pair[1].index());
        }
    }

    #[test]
    fn default_is_first_stage() {
        assert_eq!(ScanStage::default(), ScanStage::Submitting);
        assert_eq!(ScanStage::Done.label(), "finished");
    }
}
