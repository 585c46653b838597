//! Lunar phase classification and principal-phase timing.
//!
//! The phase angle used throughout is the difference of apparent ecliptic
//! longitudes, Moon minus Sun, in [0, 360). It grows monotonically through
//! a synodic month.

use chrono::NaiveDate;
use tracing::debug;

use almanac_core::{Body, Ephemeris, Observer};
use almanac_time::Instant;

use crate::error::SearchError;
use crate::kernel::{find_first, find_next};
use crate::kernel_types::{ScanConfig, SearchMode};
use crate::lunar_phase_types::{MajorPhase, MajorPhaseEvent, MoonPhase, PhaseName};
use crate::utc_day;

/// Moon − Sun ecliptic longitude at `t`, degrees in [0, 360).
pub fn phase_angle_deg<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    t: Instant,
) -> Result<f64, SearchError> {
    let moon = eph.position(Body::Moon, observer, t)?;
    let sun = eph.position(Body::Sun, observer, t)?;
    Ok((moon.ecliptic_lon_deg - sun.ecliptic_lon_deg).rem_euclid(360.0))
}

/// Illuminated fraction of the disc for a Moon–Sun elongation,
/// `(1 − cos ψ) / 2`.
pub fn illuminated_fraction(elongation_deg: f64) -> f64 {
    (1.0 - elongation_deg.to_radians().cos()) / 2.0
}

/// Principal phase passed between two successive phase-angle samples.
///
/// A phase counts only when `prev < target ≤ curr`; a decrease from `prev`
/// to `curr` is a wrap through 360° and counts as new moon. When several
/// phases lie in between, the earliest is returned.
pub fn crossed_major_phase(prev_deg: f64, curr_deg: f64) -> Option<MajorPhase> {
    let prev = prev_deg.rem_euclid(360.0);
    let curr = curr_deg.rem_euclid(360.0);
    if curr < prev {
        return Some(MajorPhase::NewMoon);
    }
    MajorPhase::ALL
        .into_iter()
        .filter(|p| *p != MajorPhase::NewMoon)
        .find(|p| prev < p.target_deg() && p.target_deg() <= curr)
}

/// Phase of the Moon at `t`.
pub fn moon_phase_at<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    t: Instant,
) -> Result<MoonPhase, SearchError> {
    let angle = phase_angle_deg(eph, observer, t)?;
    let illumination = illuminated_fraction(angle);
    Ok(MoonPhase {
        angle_deg: angle,
        illumination,
        percent: illumination * 100.0,
        name: PhaseName::from_angle(angle),
    })
}

/// Principal phase occurring during the UTC day `date`, if any.
///
/// The phase angle is sampled at the start and end of the day; if a
/// principal phase lies in between, its instant is refined by the kernel.
pub fn major_phase_on<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    scan: &ScanConfig,
) -> Result<Option<MajorPhaseEvent>, SearchError> {
    let (start, end) = utc_day(date);
    let prev = phase_angle_deg(eph, observer, start)?;
    let curr = phase_angle_deg(eph, observer, end)?;
    let Some(phase) = crossed_major_phase(prev, curr) else {
        return Ok(None);
    };
    let angle = |t: Instant| phase_angle_deg(eph, observer, t);
    let mode = SearchMode::AngleCrossing {
        target_deg: phase.target_deg(),
    };
    let refined = find_first(&angle, start, end, mode, scan)?;
    debug!(%date, phase = phase.name(), refined = refined.is_some(), "major phase");
    Ok(refined.map(|found| MajorPhaseEvent {
        phase,
        instant: found.instant,
    }))
}

/// Next occurrence of `phase` after `start`.
pub fn next_major_phase<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    start: Instant,
    phase: MajorPhase,
    scan: &ScanConfig,
) -> Result<Option<MajorPhaseEvent>, SearchError> {
    let angle = |t: Instant| phase_angle_deg(eph, observer, t);
    let mode = SearchMode::AngleCrossing {
        target_deg: phase.target_deg(),
    };
    Ok(find_next(&angle, start, mode, scan)?.map(|found| MajorPhaseEvent {
        phase,
        instant: found.instant,
    }))
}
