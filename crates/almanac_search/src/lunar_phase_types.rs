//! Types for lunar phase classification.

use serde::Serialize;

use almanac_time::Instant;

/// Width of one named-phase bucket, degrees.
const BUCKET_DEG: f64 = 45.0;

/// The eight conventional phase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// In order of increasing Moon–Sun elongation.
    pub const ALL: [PhaseName; 8] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Name for a Moon–Sun longitude difference. Buckets are 45° wide and
    /// centred on 0, 45, ..., 315; a value on a boundary belongs to the
    /// later phase.
    pub fn from_angle(angle_deg: f64) -> Self {
        let a = angle_deg.rem_euclid(360.0);
        let idx = ((a + BUCKET_DEG / 2.0) / BUCKET_DEG).floor() as usize % 8;
        Self::ALL[idx]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "new_moon",
            Self::WaxingCrescent => "waxing_crescent",
            Self::FirstQuarter => "first_quarter",
            Self::WaxingGibbous => "waxing_gibbous",
            Self::FullMoon => "full_moon",
            Self::WaningGibbous => "waning_gibbous",
            Self::LastQuarter => "last_quarter",
            Self::WaningCrescent => "waning_crescent",
        }
    }
}

/// The four principal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorPhase {
    NewMoon,
    FirstQuarter,
    FullMoon,
    LastQuarter,
}

impl MajorPhase {
    pub const ALL: [MajorPhase; 4] = [
        Self::NewMoon,
        Self::FirstQuarter,
        Self::FullMoon,
        Self::LastQuarter,
    ];

    /// Moon–Sun longitude difference at which the phase occurs.
    pub const fn target_deg(self) -> f64 {
        match self {
            Self::NewMoon => 0.0,
            Self::FirstQuarter => 90.0,
            Self::FullMoon => 180.0,
            Self::LastQuarter => 270.0,
        }
    }

    pub const fn name(self) -> &'static str {
        self.phase_name().name()
    }

    pub const fn phase_name(self) -> PhaseName {
        match self {
            Self::NewMoon => PhaseName::NewMoon,
            Self::FirstQuarter => PhaseName::FirstQuarter,
            Self::FullMoon => PhaseName::FullMoon,
            Self::LastQuarter => PhaseName::LastQuarter,
        }
    }
}

/// The Moon's phase at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPhase {
    /// Moon minus Sun ecliptic longitude, [0, 360).
    pub angle_deg: f64,
    /// Illuminated fraction of the disc, [0, 1].
    pub illumination: f64,
    /// `illumination` as a percentage.
    pub percent: f64,
    pub name: PhaseName,
}

/// Instant of a principal phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MajorPhaseEvent {
    pub phase: MajorPhase,
    pub instant: Instant,
}
