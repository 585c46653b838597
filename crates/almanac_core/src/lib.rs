//! Core contract of the almanac engine.
//!
//! Defines the [`Body`] catalogue, the validated [`Observer`], the
//! [`Position`] record and the [`Ephemeris`] trait every position source
//! implements. Nothing here performs astronomy; the search layer only ever
//! talks to an `&dyn Ephemeris` (or a generic `E: Ephemeris`).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use almanac_time::Instant;

pub mod error;
pub mod observer;

pub use error::{EphemerisError, EphemerisFailure, ObserverError};
pub use observer::Observer;

/// Solar-system bodies the engine can reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Every body, Sun and Moon first.
    pub const ALL: [Body; 10] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    /// The eight planets tracked besides the luminaries (Pluto included).
    pub const PLANETS: [Body; 8] = [
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    /// Lowercase name, matching the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
        }
    }

    pub const fn is_planet(self) -> bool {
        !matches!(self, Self::Sun | Self::Moon)
    }

    /// Orbit inside Earth's: Mercury and Venus.
    pub const fn is_inferior(self) -> bool {
        matches!(self, Self::Mercury | Self::Venus)
    }

    /// Orbit outside Earth's: Mars through Pluto.
    pub const fn is_superior(self) -> bool {
        self.is_planet() && !self.is_inferior()
    }

    /// Mean apparent semidiameter in arcminutes used for rise/set limbs.
    ///
    /// Planets are treated as points.
    pub const fn mean_semidiameter_arcmin(self) -> f64 {
        match self {
            Self::Sun => 16.0,
            Self::Moon => 15.5,
            _ => 0.0,
        }
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.name() == lower)
            .ok_or_else(|| format!("unknown body '{s}'"))
    }
}

/// Apparent place of a body for one observer at one instant.
///
/// Angles in degrees, distance in km. Altitude and azimuth are topocentric;
/// ecliptic coordinates are geocentric, referred to the equinox of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub altitude_deg: f64,
    /// Azimuth from north through east, [0, 360).
    pub azimuth_deg: f64,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub ecliptic_lon_deg: f64,
    pub ecliptic_lat_deg: f64,
    pub distance_km: f64,
}

/// Position source consumed by every finder.
///
/// Implementations must be deterministic: the same arguments always give
/// the same answer.
pub trait Ephemeris {
    fn position(
        &self,
        body: Body,
        observer: &Observer,
        t: Instant,
    ) -> Result<Position, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn position(
        &self,
        body: Body,
        observer: &Observer,
        t: Instant,
    ) -> Result<Position, EphemerisError> {
        (**self).position(body, observer, t)
    }
}
