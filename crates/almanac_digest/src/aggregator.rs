//! Runs every finder for one date and observer and assembles the digest.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use almanac_config::DigestConfig;
use almanac_core::{Body, Ephemeris, Observer};
use almanac_search::{
    ApsisKind, DayTransits, MeteorShower, PeakPosition, RiseSetConfig, SearchError, TransitKind,
    TwilightEvent, active_showers, apsis_on, close_approach_on, greatest_elongation_on,
    major_phase_on, moon_phase_at, nightly_visibility, opposition_on, season_on,
    solar_conjunction_on, solar_elongation, sun_twilight, transits_on, utc_day,
};
use almanac_time::Days;

use crate::error::DigestError;
use crate::event::{Event, EventKind};

/// Date and place of one digest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DigestRequest {
    pub date: NaiveDate,
    pub observer: Observer,
}

impl DigestRequest {
    pub fn new(date: NaiveDate, observer: Observer) -> Self {
        Self { date, observer }
    }

    /// Build a request from raw coordinates, validating them.
    pub fn from_coordinates(
        date: NaiveDate,
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
    ) -> Result<Self, DigestError> {
        let observer = Observer::new(latitude_deg, longitude_deg, elevation_m)?;
        Ok(Self::new(date, observer))
    }
}

/// A sub-computation that could not be completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub scope: &'static str,
    pub bodies: Vec<Body>,
    pub reason: String,
}

/// All events of one UTC day for one observer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDigest {
    pub date: NaiveDate,
    pub observer: Observer,
    /// Sorted by first instant, then kind, then bodies.
    pub events: Vec<Event>,
    pub failures: Vec<Failure>,
}

impl DailyDigest {
    /// Events of one kind, in digest order.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Collector {
    events: Vec<Event>,
    failures: Vec<Failure>,
}

impl Collector {
    /// Keep the events of a successful sub-computation. Ephemeris failures
    /// are recorded and the digest carries on; anything else aborts it.
    fn record(
        &mut self,
        scope: &'static str,
        bodies: &[Body],
        result: Result<Vec<Event>, SearchError>,
    ) -> Result<(), DigestError> {
        match result {
            Ok(events) => {
                debug!(scope, ?bodies, count = events.len(), "sub-computation done");
                self.events.extend(events);
                Ok(())
            }
            Err(SearchError::Ephemeris(e)) => {
                warn!(scope, ?bodies, error = %e, "sub-computation failed");
                self.failures.push(Failure {
                    scope,
                    bodies: bodies.to_vec(),
                    reason: e.to_string(),
                });
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Compute the digest of `request.date` for `request.observer`.
///
/// Sub-computations run in a fixed order and independently: an ephemeris
/// failure in one is recorded in [`DailyDigest::failures`] without
/// affecting the others. Invalid configuration aborts before any search.
pub fn compute_digest<E: Ephemeris + ?Sized>(
    eph: &E,
    request: &DigestRequest,
    config: &DigestConfig,
) -> Result<DailyDigest, DigestError> {
    config.validate()?;
    let DigestRequest { date, observer } = *request;
    let observer = &observer;
    let mut out = Collector {
        events: Vec::new(),
        failures: Vec::new(),
    };
    let rise_set = config.rise_set_config();
    let includes_moon = config.bodies.contains(&Body::Moon);
    let planets: Vec<Body> = config.bodies.iter().copied().filter(|b| b.is_planet()).collect();

    let sun_transits = transit_events(eph, Body::Sun, observer, date, &rise_set);
    out.record("transits", &[Body::Sun], sun_transits)?;
    out.record("twilight", &[Body::Sun], twilight_events(eph, observer, date, config))?;

    if includes_moon {
        let moon_transits = transit_events(eph, Body::Moon, observer, date, &rise_set);
        out.record("transits", &[Body::Moon], moon_transits)?;
        out.record("phase", &[Body::Moon], phase_event(eph, observer, date, config))?;
        out.record("apsis", &[Body::Moon], apsis_events(eph, observer, date, config))?;
    }

    for &planet in &planets {
        let visibility = visibility_events(eph, planet, observer, date, config);
        out.record("visibility", &[planet], visibility)?;
    }

    for &planet in &planets {
        let conjunction = conjunction_events(eph, planet, observer, date, config);
        out.record("solar_conjunction", &[planet], conjunction)?;
        if planet.is_superior() {
            let opposition = opposition_events(eph, planet, observer, date, config);
            out.record("opposition", &[planet], opposition)?;
        }
        if planet.is_inferior() {
            let elongation = elongation_events(eph, planet, observer, date, config);
            out.record("elongation", &[planet], elongation)?;
        }
    }

    // Each unordered pair once.
    let bodies = &config.bodies;
    for (i, &a) in bodies.iter().enumerate() {
        for &b in &bodies[i + 1..] {
            let approach = close_approach_events(eph, a, b, observer, date, config);
            out.record("close_approach", &[a, b], approach)?;
        }
    }

    out.events.extend(shower_events(date));
    out.record("season", &[Body::Sun], season_events(eph, observer, date, config))?;

    let Collector {
        mut events,
        failures,
    } = out;
    events.sort_by(Event::digest_order);
    debug!(%date, events = events.len(), failures = failures.len(), "digest computed");
    Ok(DailyDigest {
        date,
        observer: *observer,
        events,
        failures,
    })
}

fn transit_kind(kind: TransitKind) -> EventKind {
    match kind {
        TransitKind::Rise => EventKind::Rise,
        TransitKind::Set => EventKind::Set,
        TransitKind::Transit => EventKind::Transit,
    }
}

fn day_events(day: &DayTransits) -> Vec<Event> {
    day.events
        .iter()
        .map(|e| {
            let event = Event::new(transit_kind(e.kind), &[day.body], &[e.instant]);
            if e.instant.date() == Some(day.date) {
                event
            } else {
                event.with_flag("previous_day", true)
            }
        })
        .collect()
}

fn transit_events<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &RiseSetConfig,
) -> Result<Vec<Event>, SearchError> {
    Ok(day_events(&transits_on(eph, body, observer, date, config)?))
}

fn twilight_events<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    let scan = config.rise_set_scan();
    let mut events = Vec::new();
    for twilight in TwilightEvent::ALL {
        if let Some(t) = sun_twilight(eph, observer, date, twilight, &scan)?.instant() {
            events.push(
                Event::new(EventKind::Twilight, &[Body::Sun], &[t])
                    .with_flag("phase", twilight.name()),
            );
        }
    }
    Ok(events)
}

/// Phase at 00:00 UTC, or at the principal phase if one falls on the day.
fn phase_event<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    let (start, _) = utc_day(date);
    let major = major_phase_on(eph, observer, date, &config.lunar_phase_scan())?;
    let at = major.map_or(start, |m| m.instant);
    let phase = moon_phase_at(eph, observer, at)?;
    let name = major.map_or(phase.name, |m| m.phase.phase_name());
    Ok(vec![
        Event::new(EventKind::Phase, &[Body::Moon], &[at])
            .with_value(phase.percent)
            .with_flag("name", name.name())
            .with_flag("illumination", phase.illumination)
            .with_flag("major", major.is_some()),
    ])
}

fn apsis_events<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    Ok(apsis_on(eph, observer, date, &config.apsis_scan())?
        .map(|a| {
            let kind = match a.kind {
                ApsisKind::Perigee => EventKind::Perigee,
                ApsisKind::Apogee => EventKind::Apogee,
            };
            Event::new(kind, &[Body::Moon], &[a.instant]).with_value(a.distance_km)
        })
        .into_iter()
        .collect())
}

/// Visibility at the better twilight window, plus the day's transits of a
/// visible planet.
fn visibility_events<E: Ephemeris + ?Sized>(
    eph: &E,
    planet: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    let nightly = nightly_visibility(
        eph,
        planet,
        observer,
        date,
        &config.visibility_criteria(),
        &config.rise_set_scan(),
    )?;
    let Some((window, v)) = nightly.best() else {
        return Ok(Vec::new());
    };
    let mut events = vec![
        Event::new(EventKind::Visibility, &[planet], &[v.reference])
            .with_value(v.altitude_deg)
            .with_flag("window", window.name())
            .with_flag("elongation", v.elongation_deg),
    ];
    events.extend(day_events(&transits_on(
        eph,
        planet,
        observer,
        date,
        &config.rise_set_config(),
    )?));
    Ok(events)
}

/// Solar conjunction of `planet`, kept only when it passes within the
/// configured separation limit of the Sun.
fn conjunction_events<E: Ephemeris + ?Sized>(
    eph: &E,
    planet: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    let scan = config.elongation_config().scan;
    let Some(c) = solar_conjunction_on(eph, planet, observer, date, &scan)? else {
        return Ok(Vec::new());
    };
    let separation = solar_elongation(eph, planet, observer, c.instant)?;
    if separation > config.separation.max_separation_deg {
        debug!(%planet, separation, "solar conjunction beyond separation limit");
        return Ok(Vec::new());
    }
    Ok(vec![
        Event::new(EventKind::Conjunction, &[Body::Sun, planet], &[c.instant])
            .with_value(separation)
            .with_flag("kind", c.kind.name()),
    ])
}

fn opposition_events<E: Ephemeris + ?Sized>(
    eph: &E,
    planet: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    let scan = config.elongation_config().scan;
    let Some(o) = opposition_on(eph, planet, observer, date, &scan)? else {
        return Ok(Vec::new());
    };
    let elongation = solar_elongation(eph, planet, observer, o.instant)?;
    Ok(vec![
        Event::new(EventKind::Opposition, &[planet], &[o.instant]).with_value(elongation),
    ])
}

fn elongation_events<E: Ephemeris + ?Sized>(
    eph: &E,
    planet: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    let Some(g) = greatest_elongation_on(eph, planet, observer, date, &config.elongation_config())?
    else {
        return Ok(Vec::new());
    };
    Ok(vec![
        Event::new(EventKind::Elongation, &[planet], &[g.instant])
            .with_value(g.elongation_deg)
            .with_flag("side", g.side.name()),
    ])
}

fn close_approach_events<E: Ephemeris + ?Sized>(
    eph: &E,
    a: Body,
    b: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    let Some(c) = close_approach_on(eph, a, b, observer, date, &config.separation_config())? else {
        return Ok(Vec::new());
    };
    let mut pair = [a, b];
    pair.sort();
    Ok(vec![
        Event::new(EventKind::Conjunction, &pair, &[c.instant]).with_value(c.separation_deg),
    ])
}

/// Active showers, with the day start and the nearest peak (00:00 UTC) as
/// instants.
fn shower_events(date: NaiveDate) -> Vec<Event> {
    let (start, _) = utc_day(date);
    active_showers(date)
        .into_iter()
        .map(|active| {
            let MeteorShower { name, .. } = active.shower;
            let (position, offset) = match active.peak {
                PeakPosition::BeforePeak { days } => ("before_peak", days),
                PeakPosition::AtPeak => ("at_peak", 0),
                PeakPosition::AfterPeak { days } => ("after_peak", -days),
            };
            let peak = start + Days(offset as f64);
            Event::new(EventKind::Shower, &[], &[start, peak])
                .with_flag("name", name)
                .with_flag("peak", position)
                .with_flag("days_to_peak", offset)
        })
        .collect()
}

fn season_events<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    config: &DigestConfig,
) -> Result<Vec<Event>, SearchError> {
    Ok(season_on(eph, observer, date, &config.seasonal_scan())?
        .map(|s| {
            let kind = if s.season.is_equinox() {
                EventKind::Equinox
            } else {
                EventKind::Solstice
            };
            Event::new(kind, &[Body::Sun], &[s.instant]).with_flag("season", s.season.name())
        })
        .into_iter()
        .collect())
}
