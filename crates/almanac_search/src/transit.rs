//! Rise, set, culmination and twilight searches.
//!
//! All events are found by the kernel on the body's topocentric altitude:
//! rises and sets are crossings of the horizon altitude from
//! [`RiseSetConfig::horizon_altitude_deg`], culminations are altitude
//! maxima, twilight is the Sun's centre crossing -6/-12/-18 deg.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::debug;

use almanac_core::{Body, Ephemeris, Observer};
use almanac_time::{Days, Instant};

use crate::error::SearchError;
use crate::kernel::{find_adjacent, find_all, find_first, find_next, find_previous};
use crate::kernel_types::{Found, ScanConfig, SearchDirection, SearchMode};
use crate::transit_types::{
    DayTransits, HorizonStatus, RiseSetConfig, RiseSetResult, TransitKind, TransitTime,
    TwilightEvent,
};
use crate::utc_day;

/// Most events reported for one body and day.
pub const MAX_DAY_EVENTS: usize = 4;

/// Topocentric altitude of `body` as a sampled function.
pub fn altitude_fn<'a, E: Ephemeris + ?Sized>(
    eph: &'a E,
    body: Body,
    observer: &'a Observer,
) -> impl Fn(Instant) -> Result<f64, SearchError> + 'a {
    move |t| Ok(eph.position(body, observer, t)?.altitude_deg)
}

/// Approximate local solar noon of a calendar date.
///
/// `0h UTC + 0.5 d - longitude / 360`
pub fn approximate_local_noon(date: NaiveDate, observer: &Observer) -> Instant {
    Instant::from_date(date) + Days(0.5 - observer.local_mean_time_offset_days())
}

fn horizon_event<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    from: Instant,
    direction: SearchDirection,
    kind: TransitKind,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let h0 = config.horizon_altitude_deg(body, observer);
    let altitude = altitude_fn(eph, body, observer);
    let mode = match kind {
        TransitKind::Rise => SearchMode::rising(h0),
        _ => SearchMode::falling(h0),
    };
    let Some(found) = find_adjacent(&altitude, from, direction, mode, &config.scan)? else {
        return Ok(if altitude(from)? >= h0 {
            RiseSetResult::NeverSets
        } else {
            RiseSetResult::NeverRises
        });
    };
    Ok(RiseSetResult::Event {
        instant: found.instant,
        kind,
    })
}

/// Next rise of `body` after `start`, within the scan lookahead.
pub fn next_rise<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    start: Instant,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    horizon_event(eph, body, observer, start, SearchDirection::Forward, TransitKind::Rise, config)
}

/// Next set of `body` after `start`.
pub fn next_set<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    start: Instant,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    horizon_event(eph, body, observer, start, SearchDirection::Forward, TransitKind::Set, config)
}

/// Last rise of `body` before `before`.
pub fn prev_rise<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    before: Instant,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    horizon_event(eph, body, observer, before, SearchDirection::Backward, TransitKind::Rise, config)
}

/// Last set of `body` before `before`.
pub fn prev_set<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    before: Instant,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    horizon_event(eph, body, observer, before, SearchDirection::Backward, TransitKind::Set, config)
}

/// Next upper culmination of `body` after `start`. `value` is the
/// culmination altitude in degrees.
pub fn next_meridian_transit<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    start: Instant,
    config: &RiseSetConfig,
) -> Result<Option<Found>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let altitude = altitude_fn(eph, body, observer);
    find_next(&altitude, start, SearchMode::Maximum, &config.scan)
}

/// Twilight event of the observer's local solar day `date`.
///
/// Dawn is searched between local midnight and local noon, dusk between
/// local noon and the following midnight, so each day has at most one of
/// each. Without a crossing the Sun either stays below the limit all day
/// (`NeverRises`) or above it all night (`NeverSets`).
pub fn sun_twilight<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    event: TwilightEvent,
    scan: &ScanConfig,
) -> Result<RiseSetResult, SearchError> {
    let threshold = -event.depression_deg();
    let noon = approximate_local_noon(date, observer);
    let altitude = altitude_fn(eph, Body::Sun, observer);
    let (start, end, mode, kind) = if event.is_rising() {
        (noon - Days(0.5), noon, SearchMode::rising(threshold), TransitKind::Rise)
    } else {
        (noon, noon + Days(0.5), SearchMode::falling(threshold), TransitKind::Set)
    };
    let Some(found) = find_first(&altitude, start, end, mode, scan)? else {
        return Ok(if altitude(noon)? < threshold {
            RiseSetResult::NeverRises
        } else {
            RiseSetResult::NeverSets
        });
    };
    Ok(RiseSetResult::Event {
        instant: found.instant,
        kind,
    })
}

/// Rises, sets and culminations of `body` during the UTC day `date`.
///
/// Culminations below the horizon are omitted. When the first horizon event
/// of the day is a set, the preceding rise is prepended. The list is sorted
/// and capped at [`MAX_DAY_EVENTS`].
pub fn transits_on<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &RiseSetConfig,
) -> Result<DayTransits, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let (start, end) = utc_day(date);
    let h0 = config.horizon_altitude_deg(body, observer);
    let altitude = altitude_fn(eph, body, observer);

    let rises = find_all(&altitude, start, end, SearchMode::rising(h0), &config.scan)?;
    let sets = find_all(&altitude, start, end, SearchMode::falling(h0), &config.scan)?;
    // An extremum needs a sample on each side, so pad the culmination scan.
    let step = config.scan.step;
    let culminations: Vec<Found> =
        find_all(&altitude, start - step, end + step, SearchMode::Maximum, &config.scan)?
            .into_iter()
            .filter(|c| c.instant >= start && c.instant < end && c.value >= h0)
            .collect();

    let tagged = |found: Vec<Found>, kind| {
        found
            .into_iter()
            .map(move |f| TransitTime {
                kind,
                instant: f.instant,
            })
    };
    let mut events: Vec<TransitTime> = tagged(rises, TransitKind::Rise)
        .chain(tagged(sets, TransitKind::Set))
        .chain(tagged(culminations, TransitKind::Transit))
        .collect();
    events.sort_by(|a, b| by_instant(a.instant, b.instant));

    let status = if events.iter().any(|e| e.kind != TransitKind::Transit) {
        HorizonStatus::RisesAndSets
    } else if altitude(start)? >= h0 {
        HorizonStatus::AlwaysUp
    } else {
        HorizonStatus::NeverUp
    };

    let first_horizon = events.iter().find(|e| e.kind != TransitKind::Transit).copied();
    if let Some(first) = first_horizon.filter(|e| e.kind == TransitKind::Set) {
        if let Some(rise) =
            find_previous(&altitude, first.instant, SearchMode::rising(h0), &config.scan)?
        {
            events.insert(
                0,
                TransitTime {
                    kind: TransitKind::Rise,
                    instant: rise.instant,
                },
            );
        }
    }
    events.truncate(MAX_DAY_EVENTS);

    debug!(%body, %date, ?status, count = events.len(), "transits computed");
    Ok(DayTransits {
        body,
        date,
        status,
        events,
    })
}

pub(crate) fn by_instant(a: Instant, b: Instant) -> Ordering {
    a.jd().total_cmp(&b.jd())
}
