//! Error types for observers and ephemeris queries.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::Body;

/// Why an ephemeris could not produce a position.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisFailure {
    /// Instant outside the validity span of the underlying model.
    OutOfRange,
    /// The source does not model this body.
    Unsupported,
    Other(String),
}

/// Failed position query, tagged with what was asked.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisError {
    pub body: Body,
    pub jd: f64,
    pub reason: EphemerisFailure,
}

impl EphemerisError {
    pub fn new(body: Body, jd: f64, reason: EphemerisFailure) -> Self {
        Self { body, jd, reason }
    }

    pub fn out_of_range(body: Body, jd: f64) -> Self {
        Self::new(body, jd, EphemerisFailure::OutOfRange)
    }

    pub fn unsupported(body: Body, jd: f64) -> Self {
        Self::new(body, jd, EphemerisFailure::Unsupported)
    }
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self { body, jd, reason } = self;
        match reason {
            EphemerisFailure::OutOfRange => write!(f, "{body}: JD {jd} outside ephemeris range"),
            EphemerisFailure::Unsupported => write!(f, "{body}: body not supported by ephemeris"),
            EphemerisFailure::Other(msg) => write!(f, "{body} at JD {jd}: {msg}"),
        }
    }
}

impl Error for EphemerisError {}

/// Observer coordinates outside their physical range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ObserverError {
    InvalidLatitude(f64),
    InvalidLongitude(f64),
    InvalidElevation(f64),
}

impl Display for ObserverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLatitude(v) => write!(f, "latitude {v} not in [-90, 90]"),
            Self::InvalidLongitude(v) => write!(f, "longitude {v} not in [-180, 180]"),
            Self::InvalidElevation(v) => write!(f, "elevation {v} m is not a usable height"),
        }
    }
}

impl Error for ObserverError {}
