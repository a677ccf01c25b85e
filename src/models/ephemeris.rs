//! Ephemeris snapshot types.
//!
//! Computed astronomical positions for a given date. The pipeline treats
//! these as opaque input data: it formats and forwards, never computes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single planetary aspect (angular relationship between two planets).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aspect {
    pub planet1: String,
    pub planet2: String,
    /// Aspect name, e.g. "conjunction", "trine".
    pub name: String,
    /// Orb in degrees. Informational only.
    #[serde(default)]
    pub orb: f64,
}

/// Sky snapshot for one date, as delivered by the ephemeris provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSnapshot {
    pub date: NaiveDate,
    pub sun_sign: String,
    pub sun_degree: f64,
    pub moon_sign: String,
    pub moon_degree: f64,
    /// Moon phase name, e.g. "waxing gibbous".
    pub moon_phase: String,
    /// Major aspects, strongest first.
    #[serde(default)]
    pub aspects: Vec<Aspect>,
    /// Planets currently retrograde.
    #[serde(default)]
    pub retrogrades: Vec<String>,
}
