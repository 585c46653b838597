//! Types for greatest elongations, solar conjunctions and oppositions.

use serde::Serialize;

use almanac_core::Body;
use almanac_time::{Days, Instant};

use crate::kernel_types::ScanConfig;

/// Side of the Sun a planet stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElongationSide {
    /// Planet east of the Sun: evening sky.
    East,
    /// Planet west of the Sun: morning sky.
    West,
}

impl ElongationSide {
    pub const fn name(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// A validated greatest elongation of Mercury or Venus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GreatestElongation {
    pub body: Body,
    pub instant: Instant,
    /// Unsigned angular distance from the Sun, degrees.
    pub elongation_deg: f64,
    pub side: ElongationSide,
}

/// Conjunction with the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConjunctionKind {
    /// Mercury or Venus between Earth and Sun.
    Inferior,
    /// Mercury or Venus beyond the Sun.
    Superior,
    /// A planet outside Earth's orbit behind the Sun.
    Conjunction,
}

impl ConjunctionKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inferior => "inferior",
            Self::Superior => "superior",
            Self::Conjunction => "conjunction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarConjunction {
    pub body: Body,
    pub instant: Instant,
    pub kind: ConjunctionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Opposition {
    pub body: Body,
    pub instant: Instant,
}

/// Greatest-elongation search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElongationConfig {
    /// Smaller extrema are rejected. Default: 5°.
    pub min_magnitude_deg: f64,
    /// Offset of the side samples used to confirm an extremum. Default: 1 day.
    pub probe: Days,
    pub scan: ScanConfig,
}

impl Default for ElongationConfig {
    fn default() -> Self {
        Self {
            min_magnitude_deg: 5.0,
            probe: Days(1.0),
            scan: ScanConfig::elongation(),
        }
    }
}

impl ElongationConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..180.0).contains(&self.min_magnitude_deg) {
            return Err("min_magnitude_deg must be in [0, 180)");
        }
        if !self.probe.is_finite() || self.probe.as_days() <= 0.0 {
            return Err("probe must be positive");
        }
        self.scan.validate()
    }
}
