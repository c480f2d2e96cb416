use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Kind of content accepted for scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Url,
    Image,
    Video,
}

impl Modality {
    /// Only video scans report staged progress.
    pub fn tracks_progress(&self) -> bool {
        matches!(self, Modality::Video)
    }
}

impl Display for Modality {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Modality::Text => write!(f, "text"),
            Modality::Url => write!(f, "url"),
            Modality::Image => write!(f, "image"),
            Modality::Video => write!(f, "video"),
        }
    }
}

impl FromStr for Modality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Modality::Text),
            "url" => Ok(Modality::Url),
            "image" => Ok(Modality::Image),
            "video" => Ok(Modality::Video),
            _ => Err(anyhow::anyhow!("Invalid modality: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("VIDEO".parse::<Modality>().unwrap(), Modality::Video);
        assert_eq!("url".parse::<Modality>().unwrap(), Modality::Url);
        assert!("audio".parse::<Modality>().is_err());
    }

    #[test]
    fn only_video_tracks_progress() {
        assert!(Modality::Video.tracks_progress());
        assert!(!Modality::Text.tracks_progress());
        assert!(!Modality::Image.tracks_progress());
    }
}
