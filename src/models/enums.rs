//! Closed enumerations shared across the pipeline.

use serde::{Deserialize, Serialize};

/// Subscription tier controlling content depth and frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Trial,
    Free,
    Basic,
    Pro,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Pro => "pro",
        }
    }
}

/// Tone/content-bias profile applied to generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Calm,
    Knowledge,
    Success,
    Evidence,
}

impl Perspective {
    pub const ALL: [Perspective; 4] = [
        Self::Calm,
        Self::Knowledge,
        Self::Success,
        Self::Evidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Knowledge => "knowledge",
            Self::Success => "success",
            Self::Evidence => "evidence",
        }
    }

    /// Parse from the lowercase wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "calm" => Some(Self::Calm),
            "knowledge" => Some(Self::Knowledge),
            "success" => Some(Self::Success),
            "evidence" => Some(Self::Evidence),
            _ => None,
        }
    }
}

/// Newsletter cadence for composed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Daily,
    Weekly,
    Monthly,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Reader focus area used to weight composed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Love,
    Career,
    Wellness,
    Growth,
    Finance,
}
