//! Golden-value integration tests for the event finders on the analytic
//! ephemeris.
//!
//! Reference times are USNO/IMCCE almanac values for Madrid and Tromsø.
//! Tolerances allow for the accuracy of the analytic theory.

use chrono::NaiveDate;

use almanac_core::{Body, Observer};
use almanac_ephem::AnalyticEphemeris;
use almanac_search::{
    ApsisKind, HorizonStatus, MajorPhase, RiseSetConfig, RiseSetResult, ScanConfig, Season,
    SeparationConfig, TransitKind, TwilightEvent, apsis_on, close_approach_on, major_phase_on,
    next_rise, next_set, season_on, sun_twilight, transits_on,
};
use almanac_time::Instant;

fn madrid() -> Observer {
    Observer::new(40.4168, -3.7038, 650.0).unwrap()
}

fn tromso() -> Observer {
    Observer::new(69.65, 18.96, 0.0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Instant {
    Instant::from_utc(y, mo, d, h, mi, 0.0).unwrap()
}

fn minutes_between(a: Instant, b: Instant) -> f64 {
    (a - b).as_days().abs() * 1440.0
}

/// Sunrise 06:11, sunset 17:54 UTC.
#[test]
fn madrid_sun_2017_10_05() {
    let cfg = RiseSetConfig::default();
    let start = Instant::from_date(date(2017, 10, 5));
    let rise = next_rise(&AnalyticEphemeris, Body::Sun, &madrid(), start, &cfg).unwrap();
    let set = next_set(&AnalyticEphemeris, Body::Sun, &madrid(), start, &cfg).unwrap();
    let (rise, set) = (rise.instant().unwrap(), set.instant().unwrap());
    assert!(minutes_between(rise, at(2017, 10, 5, 6, 11)) < 3.0, "rise {rise}");
    assert!(minutes_between(set, at(2017, 10, 5, 17, 54)) < 3.0, "set {set}");

    let day = transits_on(&AnalyticEphemeris, Body::Sun, &madrid(), date(2017, 10, 5), &cfg)
        .unwrap();
    let kinds: Vec<_> = day.events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [TransitKind::Rise, TransitKind::Transit, TransitKind::Set]);
    assert_eq!(day.status, HorizonStatus::RisesAndSets);
    let noon = day.of_kind(TransitKind::Transit).next().unwrap();
    assert!(minutes_between(noon, at(2017, 10, 5, 12, 2)) < 3.0);
}

/// Moon sets 05:42 and rises 17:59; the previous evening's rise (Oct 4,
/// 17:26) is prepended. Both culminations fall just outside the day.
#[test]
fn madrid_moon_day_list_prepends_previous_rise() {
    let cfg = RiseSetConfig::default();
    let day = transits_on(&AnalyticEphemeris, Body::Moon, &madrid(), date(2017, 10, 5), &cfg)
        .unwrap();
    let kinds: Vec<_> = day.events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [TransitKind::Rise, TransitKind::Set, TransitKind::Rise]);
    assert_eq!(day.events[0].instant.date(), Some(date(2017, 10, 4)));
    assert!(minutes_between(day.events[0].instant, at(2017, 10, 4, 17, 26)) < 5.0);
    assert!(minutes_between(day.events[1].instant, at(2017, 10, 5, 5, 42)) < 5.0);
    assert!(minutes_between(day.events[2].instant, at(2017, 10, 5, 17, 59)) < 5.0);
}

/// Nautical dawn 05:16, nautical dusk 18:49.
#[test]
fn madrid_nautical_twilight() {
    let scan = ScanConfig::rise_set();
    let d = date(2017, 10, 5);
    let dawn = sun_twilight(&AnalyticEphemeris, &madrid(), d, TwilightEvent::NauticalDawn, &scan)
        .unwrap()
        .instant()
        .unwrap();
    let dusk = sun_twilight(&AnalyticEphemeris, &madrid(), d, TwilightEvent::NauticalDusk, &scan)
        .unwrap()
        .instant()
        .unwrap();
    assert!(minutes_between(dawn, at(2017, 10, 5, 5, 16)) < 3.0, "dawn {dawn}");
    assert!(minutes_between(dusk, at(2017, 10, 5, 18, 49)) < 3.0, "dusk {dusk}");
}

/// Venus and Mars pass within a quarter degree of each other in the
/// afternoon of 2017-10-05.
#[test]
fn venus_mars_close_approach() {
    let cfg = SeparationConfig::default();
    let hit = close_approach_on(
        &AnalyticEphemeris,
        Body::Venus,
        Body::Mars,
        &madrid(),
        date(2017, 10, 5),
        &cfg,
    )
    .unwrap()
    .expect("close approach");
    assert!(hit.separation_deg < 0.6, "{}", hit.separation_deg);
    assert_eq!(hit.instant.date(), Some(date(2017, 10, 5)));
}

/// Full Moon 2017-10-05 18:40 UTC.
#[test]
fn full_moon_october_2017() {
    let scan = ScanConfig::lunar_phase();
    let ev = major_phase_on(&AnalyticEphemeris, &madrid(), date(2017, 10, 5), &scan)
        .unwrap()
        .expect("full moon");
    assert_eq!(ev.phase, MajorPhase::FullMoon);
    assert!(minutes_between(ev.instant, at(2017, 10, 5, 18, 40)) < 15.0);
    assert!(
        major_phase_on(&AnalyticEphemeris, &madrid(), date(2017, 10, 6), &scan)
            .unwrap()
            .is_none()
    );
}

/// Perigee 2017-10-09 ~06:00, apogee 2017-10-25 ~02:26.
#[test]
fn lunar_apsides_october_2017() {
    let scan = ScanConfig::apsis();
    let perigee = apsis_on(&AnalyticEphemeris, &madrid(), date(2017, 10, 9), &scan)
        .unwrap()
        .expect("perigee");
    assert_eq!(perigee.kind, ApsisKind::Perigee);
    let apogee = apsis_on(&AnalyticEphemeris, &madrid(), date(2017, 10, 25), &scan)
        .unwrap()
        .expect("apogee");
    assert_eq!(apogee.kind, ApsisKind::Apogee);
    assert!(apsis_on(&AnalyticEphemeris, &madrid(), date(2017, 10, 15), &scan)
        .unwrap()
        .is_none());
}

#[test]
fn seasons_of_2016() {
    let scan = ScanConfig::seasonal();
    let cases = [
        (date(2016, 3, 20), Season::MarchEquinox),
        (date(2016, 6, 20), Season::JuneSolstice),
        (date(2016, 9, 22), Season::SeptemberEquinox),
        (date(2016, 12, 21), Season::DecemberSolstice),
    ];
    for (d, expected) in cases {
        let ev = season_on(&AnalyticEphemeris, &madrid(), d, &scan)
            .unwrap()
            .unwrap_or_else(|| panic!("no season event on {d}"));
        assert_eq!(ev.season, expected);
    }
    assert!(season_on(&AnalyticEphemeris, &madrid(), date(2016, 5, 1), &scan)
        .unwrap()
        .is_none());
}

#[test]
fn tromso_polar_night_and_midnight_sun() {
    let cfg = RiseSetConfig::default();
    let winter = transits_on(&AnalyticEphemeris, Body::Sun, &tromso(), date(2017, 12, 21), &cfg)
        .unwrap();
    assert_eq!(winter.status, HorizonStatus::NeverUp);
    assert!(winter.events.is_empty());

    let summer = transits_on(&AnalyticEphemeris, Body::Sun, &tromso(), date(2017, 6, 21), &cfg)
        .unwrap();
    assert_eq!(summer.status, HorizonStatus::AlwaysUp);
    assert!(summer.events.iter().all(|e| e.kind == TransitKind::Transit));

    let start = Instant::from_date(date(2017, 12, 21));
    let mut short = cfg;
    short.scan.max_lookahead = almanac_time::Days(1.0);
    let rise = next_rise(&AnalyticEphemeris, Body::Sun, &tromso(), start, &short).unwrap();
    assert_eq!(rise, RiseSetResult::NeverRises);
}
