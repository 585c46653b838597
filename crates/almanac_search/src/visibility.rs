//! Naked-eye visibility of a body at twilight.
//!
//! A body counts as visible at a reference instant when it stands at least
//! `min_altitude_deg` above the horizon and at least `min_elongation_deg`
//! away from the Sun. Both checks must pass.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use almanac_core::{Body, Ephemeris, Observer};
use almanac_frames::angular_separation_deg;
use almanac_time::{Days, Instant};

use crate::error::SearchError;
use crate::kernel_types::ScanConfig;
use crate::transit::{approximate_local_noon, sun_twilight};
use crate::transit_types::TwilightEvent;

/// Thresholds for naked-eye visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityCriteria {
    /// Default: 10°.
    pub min_altitude_deg: f64,
    /// Default: 15°.
    pub min_elongation_deg: f64,
}

impl Default for VisibilityCriteria {
    fn default() -> Self {
        Self {
            min_altitude_deg: 10.0,
            min_elongation_deg: 15.0,
        }
    }
}

impl VisibilityCriteria {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(-90.0..=90.0).contains(&self.min_altitude_deg) {
            return Err("min_altitude_deg must be in [-90, 90]");
        }
        if !(0.0..=180.0).contains(&self.min_elongation_deg) {
            return Err("min_elongation_deg must be in [0, 180]");
        }
        Ok(())
    }
}

/// Visibility verdict at one reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visibility {
    pub body: Body,
    pub visible: bool,
    pub altitude_deg: f64,
    pub elongation_deg: f64,
    pub reference: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewingWindow {
    Evening,
    Morning,
}

impl ViewingWindow {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Evening => "evening",
            Self::Morning => "morning",
        }
    }
}

/// Visibility of one body at the day's morning and evening twilight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NightlyVisibility {
    pub morning: Visibility,
    pub evening: Visibility,
}

impl NightlyVisibility {
    /// The visible window with the higher altitude; evening wins ties.
    pub fn best(&self) -> Option<(ViewingWindow, Visibility)> {
        let candidates = [
            (ViewingWindow::Evening, self.evening),
            (ViewingWindow::Morning, self.morning),
        ];
        candidates
            .into_iter()
            .filter(|(_, v)| v.visible)
            .reduce(|best, next| {
                if next.1.altitude_deg > best.1.altitude_deg {
                    next
                } else {
                    best
                }
            })
    }
}

/// Angular distance of `body` from the Sun, degrees in [0, 180].
pub fn solar_elongation<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    t: Instant,
) -> Result<f64, SearchError> {
    let p = eph.position(body, observer, t)?;
    let sun = eph.position(Body::Sun, observer, t)?;
    Ok(angular_separation_deg(
        p.ecliptic_lon_deg,
        p.ecliptic_lat_deg,
        sun.ecliptic_lon_deg,
        sun.ecliptic_lat_deg,
    ))
}

/// Check `body` against `criteria` at `reference`.
pub fn evaluate_visibility<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    reference: Instant,
    criteria: &VisibilityCriteria,
) -> Result<Visibility, SearchError> {
    criteria.validate().map_err(SearchError::InvalidConfig)?;
    let altitude = eph.position(body, observer, reference)?.altitude_deg;
    let elongation = solar_elongation(eph, body, observer, reference)?;
    Ok(Visibility {
        body,
        visible: altitude >= criteria.min_altitude_deg && elongation >= criteria.min_elongation_deg,
        altitude_deg: altitude,
        elongation_deg: elongation,
        reference,
    })
}

/// Morning and evening reference instants of the local day `date`:
/// nautical dawn and dusk, or local midnight when the Sun never reaches
/// -12° on that side of noon.
pub fn twilight_references<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    scan: &ScanConfig,
) -> Result<(Instant, Instant), SearchError> {
    let noon = approximate_local_noon(date, observer);
    let morning = sun_twilight(eph, observer, date, TwilightEvent::NauticalDawn, scan)?
        .instant()
        .unwrap_or(noon - Days(0.5));
    let evening = sun_twilight(eph, observer, date, TwilightEvent::NauticalDusk, scan)?
        .instant()
        .unwrap_or(noon + Days(0.5));
    Ok((morning, evening))
}

/// Highest Sun altitude at which a twilight reference still counts as dark
/// enough to see anything.
pub const MAX_SUN_ALTITUDE_DEG: f64 = -6.0;

fn window_visibility<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    reference: Instant,
    criteria: &VisibilityCriteria,
) -> Result<Visibility, SearchError> {
    let mut v = evaluate_visibility(eph, body, observer, reference, criteria)?;
    if v.visible {
        let sun_alt = eph.position(Body::Sun, observer, reference)?.altitude_deg;
        if sun_alt > MAX_SUN_ALTITUDE_DEG {
            debug!(%body, sun_alt, "reference instant in daylight");
            v.visible = false;
        }
    }
    Ok(v)
}

/// Visibility of `body` at the morning and evening twilight of `date`.
///
/// A window whose reference instant has the Sun above
/// [`MAX_SUN_ALTITUDE_DEG`] (the midnight fallback in polar summer) is never
/// visible.
pub fn nightly_visibility<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    criteria: &VisibilityCriteria,
    scan: &ScanConfig,
) -> Result<NightlyVisibility, SearchError> {
    let (morning_ref, evening_ref) = twilight_references(eph, observer, date, scan)?;
    let nightly = NightlyVisibility {
        morning: window_visibility(eph, body, observer, morning_ref, criteria)?,
        evening: window_visibility(eph, body, observer, evening_ref, criteria)?,
    };
    debug!(%body, %date, best = ?nightly.best().map(|(w, _)| w), "visibility evaluated");
    Ok(nightly)
}
