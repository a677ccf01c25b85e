//! Subscriber profile.

use serde::{Deserialize, Serialize};

use super::{FocusArea, Perspective, Tier};

/// The slice of subscriber state the composition pipeline needs.
///
/// Registration, billing and delivery own the rest of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub tier: Tier,
    pub perspective: Perspective,
    /// Ordered by preference; the first two act as primary/secondary.
    #[serde(default)]
    pub focus_areas: Vec<FocusArea>,
    pub birth_location: String,
    pub timezone: String,
    /// Rising sign if the subscriber supplied a birth time.
    #[serde(default)]
    pub rising_sign: Option<String>,
    /// Preferred locale code, if the subscriber picked one.
    #[serde(default)]
    pub locale: Option<String>,
}
