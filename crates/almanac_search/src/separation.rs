//! Close approaches between two bodies.
//!
//! Separation is measured on the observer's sky, from both bodies'
//! altitude/azimuth. Close approaches are local minima of that separation
//! no wider than [`SeparationConfig::max_separation_deg`].

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use almanac_core::{Body, Ephemeris, Observer};
use almanac_frames::angular_separation_deg;
use almanac_time::Instant;

use crate::error::SearchError;
use crate::kernel::find_all;
use crate::kernel_types::{ScanConfig, SearchMode};
use crate::utc_day;

/// Close-approach search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationConfig {
    /// Minima wider than this are not close approaches. Default: 4°.
    pub max_separation_deg: f64,
    pub scan: ScanConfig,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            max_separation_deg: 4.0,
            scan: ScanConfig::separation(),
        }
    }
}

impl SeparationConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.max_separation_deg.is_finite()
            || self.max_separation_deg <= 0.0
            || self.max_separation_deg > 180.0
        {
            return Err("max_separation_deg must be in (0, 180]");
        }
        self.scan.validate()
    }
}

/// A local minimum of the separation between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloseApproach {
    pub bodies: [Body; 2],
    pub instant: Instant,
    pub separation_deg: f64,
}

/// Topocentric angular separation of `a` and `b` at `t`, degrees.
pub fn angular_separation<E: Ephemeris + ?Sized>(
    eph: &E,
    a: Body,
    b: Body,
    observer: &Observer,
    t: Instant,
) -> Result<f64, SearchError> {
    let pa = eph.position(a, observer, t)?;
    let pb = eph.position(b, observer, t)?;
    Ok(angular_separation_deg(
        pa.azimuth_deg,
        pa.altitude_deg,
        pb.azimuth_deg,
        pb.altitude_deg,
    ))
}

/// Close approaches of `a` and `b` in `[start, end]`, ascending.
pub fn search_close_approaches<E: Ephemeris + ?Sized>(
    eph: &E,
    a: Body,
    b: Body,
    observer: &Observer,
    start: Instant,
    end: Instant,
    config: &SeparationConfig,
) -> Result<Vec<CloseApproach>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if a == b {
        return Err(SearchError::InvalidConfig("bodies must differ"));
    }
    let separation = |t: Instant| angular_separation(eph, a, b, observer, t);
    let minima = find_all(&separation, start, end, SearchMode::Minimum, &config.scan)?;
    Ok(minima
        .into_iter()
        .filter(|m| m.value.is_finite() && m.value <= config.max_separation_deg)
        .map(|m| CloseApproach {
            bodies: [a, b],
            instant: m.instant,
            separation_deg: m.value,
        })
        .collect())
}

/// Closest approach of `a` and `b` during the UTC day `date`, if any.
///
/// The scan is padded by one step on each side so that a minimum near
/// midnight is still bracketed; only minima inside the day are kept.
pub fn close_approach_on<E: Ephemeris + ?Sized>(
    eph: &E,
    a: Body,
    b: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &SeparationConfig,
) -> Result<Option<CloseApproach>, SearchError> {
    let (start, end) = utc_day(date);
    let pad = config.scan.step;
    let found = search_close_approaches(eph, a, b, observer, start - pad, end + pad, config)?;
    let best = found
        .into_iter()
        .filter(|c| c.instant >= start && c.instant < end)
        .min_by(|x, y| x.separation_deg.total_cmp(&y.separation_deg));
    debug!(%a, %b, %date, found = best.is_some(), "close approach search");
    Ok(best)
}
