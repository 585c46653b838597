//! Lunar perigee and apogee.
//!
//! Extrema of the Earth–Moon distance. The distance curve is smooth with a
//! ~27.55 day period, so a half-day step brackets every apsis.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use almanac_core::{Body, Ephemeris, Observer};
use almanac_time::Instant;

use crate::error::SearchError;
use crate::kernel::{find_all, find_next};
use crate::kernel_types::{ScanConfig, SearchMode};
use crate::transit::by_instant;
use crate::utc_day;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApsisKind {
    Perigee,
    Apogee,
}

impl ApsisKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Perigee => "perigee",
            Self::Apogee => "apogee",
        }
    }

    fn mode(self) -> SearchMode {
        match self {
            Self::Perigee => SearchMode::Minimum,
            Self::Apogee => SearchMode::Maximum,
        }
    }
}

/// A lunar apsis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApsisEvent {
    pub kind: ApsisKind,
    pub instant: Instant,
    pub distance_km: f64,
}

fn distance_fn<'a, E: Ephemeris + ?Sized>(
    eph: &'a E,
    observer: &'a Observer,
) -> impl Fn(Instant) -> Result<f64, SearchError> + 'a {
    move |t| Ok(eph.position(Body::Moon, observer, t)?.distance_km)
}

/// All perigees and apogees in `[start, end]`, ascending.
pub fn search_apsides<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    start: Instant,
    end: Instant,
    scan: &ScanConfig,
) -> Result<Vec<ApsisEvent>, SearchError> {
    let distance = distance_fn(eph, observer);
    let mut events = Vec::new();
    for kind in [ApsisKind::Perigee, ApsisKind::Apogee] {
        for found in find_all(&distance, start, end, kind.mode(), scan)? {
            events.push(ApsisEvent {
                kind,
                instant: found.instant,
                distance_km: found.value,
            });
        }
    }
    events.sort_by(|a, b| by_instant(a.instant, b.instant));
    Ok(events)
}

fn next_apsis<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    start: Instant,
    kind: ApsisKind,
    scan: &ScanConfig,
) -> Result<Option<ApsisEvent>, SearchError> {
    let distance = distance_fn(eph, observer);
    Ok(find_next(&distance, start, kind.mode(), scan)?.map(|found| ApsisEvent {
        kind,
        instant: found.instant,
        distance_km: found.value,
    }))
}

/// First perigee after `start`.
pub fn next_perigee<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    start: Instant,
    scan: &ScanConfig,
) -> Result<Option<ApsisEvent>, SearchError> {
    next_apsis(eph, observer, start, ApsisKind::Perigee, scan)
}

/// First apogee after `start`.
pub fn next_apogee<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    start: Instant,
    scan: &ScanConfig,
) -> Result<Option<ApsisEvent>, SearchError> {
    next_apsis(eph, observer, start, ApsisKind::Apogee, scan)
}

/// The apsis falling in the UTC day `date`, if any.
///
/// The scan covers one step either side of the day so extrema near
/// midnight stay bracketed.
pub fn apsis_on<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    scan: &ScanConfig,
) -> Result<Option<ApsisEvent>, SearchError> {
    let (start, end) = utc_day(date);
    let found = search_apsides(eph, observer, start - scan.step, end + scan.step, scan)?;
    let hit = found
        .into_iter()
        .find(|e| e.instant >= start && e.instant < end);
    debug!(%date, found = ?hit.map(|e| e.kind), "apsis search");
    Ok(hit)
}
