//! Types for rise/set, culmination and twilight searches.

use chrono::NaiveDate;
use serde::Serialize;

use almanac_core::{Body, Observer};
use almanac_time::Instant;

use crate::kernel_types::ScanConfig;

/// Horizon-related event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitKind {
    /// Upper limb crosses the horizon upward.
    Rise,
    /// Upper limb crosses the horizon downward.
    Set,
    /// Upper culmination (maximum altitude).
    Transit,
}

impl TransitKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rise => "rise",
            Self::Set => "set",
            Self::Transit => "transit",
        }
    }
}

/// Sun-centre twilight events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwilightEvent {
    /// Sun centre at -6 deg, rising.
    CivilDawn,
    /// Sun centre at -6 deg, setting.
    CivilDusk,
    /// Sun centre at -12 deg, rising.
    NauticalDawn,
    /// Sun centre at -12 deg, setting.
    NauticalDusk,
    /// Sun centre at -18 deg, rising.
    AstronomicalDawn,
    /// Sun centre at -18 deg, setting.
    AstronomicalDusk,
}

impl TwilightEvent {
    pub const ALL: [TwilightEvent; 6] = [
        Self::AstronomicalDawn,
        Self::NauticalDawn,
        Self::CivilDawn,
        Self::CivilDusk,
        Self::NauticalDusk,
        Self::AstronomicalDusk,
    ];

    /// Depression of the Sun's centre below the geometric horizon, degrees.
    pub const fn depression_deg(self) -> f64 {
        match self {
            Self::CivilDawn | Self::CivilDusk => 6.0,
            Self::NauticalDawn | Self::NauticalDusk => 12.0,
            Self::AstronomicalDawn | Self::AstronomicalDusk => 18.0,
        }
    }

    /// Whether this is a morning event.
    pub const fn is_rising(self) -> bool {
        matches!(
            self,
            Self::CivilDawn | Self::NauticalDawn | Self::AstronomicalDawn
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::CivilDawn => "civil_dawn",
            Self::CivilDusk => "civil_dusk",
            Self::NauticalDawn => "nautical_dawn",
            Self::NauticalDusk => "nautical_dusk",
            Self::AstronomicalDawn => "astronomical_dawn",
            Self::AstronomicalDusk => "astronomical_dusk",
        }
    }
}

/// Configurable parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Whether to lower the horizon by the geometric dip for the observer's
    /// elevation, `sqrt(2h/R)` radians. Default: true.
    pub altitude_correction: bool,
    pub scan: ScanConfig,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            altitude_correction: true,
            scan: ScanConfig::rise_set(),
        }
    }
}

impl RiseSetConfig {
    /// Topocentric geometric altitude of the body's centre at which its
    /// upper limb touches the apparent horizon.
    ///
    /// `h0 = -(refraction + semidiameter) / 60 - dip`
    pub fn horizon_altitude_deg(&self, body: Body, observer: &Observer) -> f64 {
        let base = (self.refraction_arcmin + body.mean_semidiameter_arcmin()) / 60.0;
        let dip = if self.altitude_correction {
            observer.horizon_dip_deg()
        } else {
            0.0
        };
        -(base + dip)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.refraction_arcmin.is_finite() || self.refraction_arcmin < 0.0 {
            return Err("refraction_arcmin must be finite and non-negative");
        }
        self.scan.validate()
    }
}

/// Result of a single rise or set search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    Event { instant: Instant, kind: TransitKind },
    /// Body stays below the horizon for the whole search window.
    NeverRises,
    /// Body stays above the horizon for the whole search window.
    NeverSets,
}

impl RiseSetResult {
    /// Event instant, if there was one.
    pub fn instant(&self) -> Option<Instant> {
        match self {
            Self::Event { instant, .. } => Some(*instant),
            Self::NeverRises | Self::NeverSets => None,
        }
    }
}

/// Horizon behaviour of a body over one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonStatus {
    RisesAndSets,
    /// Circumpolar for the day.
    AlwaysUp,
    NeverUp,
}

/// One rise, set or culmination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitTime {
    pub kind: TransitKind,
    pub instant: Instant,
}

/// Rise, set and culmination times of one body for one UTC day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTransits {
    pub body: Body,
    pub date: NaiveDate,
    pub status: HorizonStatus,
    /// Ascending, at most four entries. May start with the previous day's
    /// rise when the first horizon event of the day is a set.
    pub events: Vec<TransitTime>,
}

impl DayTransits {
    /// Instants of the given kind, in order.
    pub fn of_kind(&self, kind: TransitKind) -> impl Iterator<Item = Instant> + '_ {
        self.events
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.instant)
    }
}
