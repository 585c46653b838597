//! End-to-end digest tests on the analytic ephemeris.
//!
//! Madrid, 2017-10-05: full Moon at 18:40 UTC and Venus 0.2° from Mars in
//! the afternoon, with the Orionids active.

use std::cmp::Ordering;

use chrono::NaiveDate;

use almanac_config::DigestConfig;
use almanac_core::{Body, Ephemeris, EphemerisError, Observer, Position};
use almanac_digest::{DigestError, DigestRequest, EventKind, FlagValue, compute_digest};
use almanac_ephem::AnalyticEphemeris;
use almanac_time::Instant;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 10, 5).unwrap()
}

fn madrid() -> DigestRequest {
    DigestRequest::from_coordinates(date(), 40.4168, -3.7038, 650.0).unwrap()
}

/// Analytic ephemeris with one body switched off.
struct Broken(Body);

impl Ephemeris for Broken {
    fn position(
        &self,
        body: Body,
        observer: &Observer,
        t: Instant,
    ) -> Result<Position, EphemerisError> {
        if body == self.0 {
            return Err(EphemerisError::unsupported(body, t.jd()));
        }
        AnalyticEphemeris.position(body, observer, t)
    }
}

#[test]
fn madrid_full_moon_day() {
    let digest = compute_digest(&AnalyticEphemeris, &madrid(), &DigestConfig::default()).unwrap();
    assert!(digest.is_complete(), "{:?}", digest.failures);

    let phase: Vec<_> = digest.of_kind(EventKind::Phase).collect();
    assert_eq!(phase.len(), 1);
    assert_eq!(phase[0].flag("name"), Some(&FlagValue::Text("full_moon".into())));
    assert_eq!(phase[0].flag("major"), Some(&FlagValue::Bool(true)));
    assert!(phase[0].value().unwrap() > 99.0);

    let venus_mars = digest
        .of_kind(EventKind::Conjunction)
        .find(|e| e.bodies() == [Body::Venus, Body::Mars])
        .expect("Venus–Mars conjunction");
    assert!(venus_mars.value().unwrap() < 0.6);

    let showers: Vec<_> = digest.of_kind(EventKind::Shower).collect();
    assert_eq!(showers.len(), 1);
    assert_eq!(showers[0].flag("name"), Some(&FlagValue::Text("Orionids".into())));
    assert_eq!(showers[0].flag("days_to_peak"), Some(&FlagValue::Number(16.0)));

    let sun_kinds: Vec<_> = digest
        .events
        .iter()
        .filter(|e| e.bodies() == [Body::Sun])
        .filter(|e| matches!(e.kind(), EventKind::Rise | EventKind::Set | EventKind::Transit))
        .map(|e| e.kind())
        .collect();
    assert_eq!(sun_kinds, [EventKind::Rise, EventKind::Transit, EventKind::Set]);
    assert_eq!(digest.of_kind(EventKind::Twilight).count(), 6);
    assert_eq!(digest.of_kind(EventKind::Solstice).count(), 0);
    assert_eq!(digest.of_kind(EventKind::Equinox).count(), 0);
}

#[test]
fn previous_day_moonrise_is_flagged() {
    let digest = compute_digest(&AnalyticEphemeris, &madrid(), &DigestConfig::default()).unwrap();
    let moon: Vec<_> = digest
        .events
        .iter()
        .filter(|e| e.bodies() == [Body::Moon])
        .filter(|e| matches!(e.kind(), EventKind::Rise | EventKind::Set | EventKind::Transit))
        .collect();
    assert_eq!(moon.len(), 3);
    assert_eq!(moon[0].kind(), EventKind::Rise);
    assert_eq!(moon[0].flag("previous_day"), Some(&FlagValue::Bool(true)));
    assert_eq!(moon[1].flag("previous_day"), None);
}

#[test]
fn events_are_sorted_and_rounded() {
    let digest = compute_digest(&AnalyticEphemeris, &madrid(), &DigestConfig::default()).unwrap();
    assert!(
        digest
            .events
            .windows(2)
            .all(|w| w[0].digest_order(&w[1]) != Ordering::Greater)
    );
    for e in &digest.events {
        if let Some(v) = e.value() {
            assert_eq!(v, (v * 100.0).round() / 100.0, "{e:?}");
        }
        assert!(!e.instants().is_empty());
    }
}

#[test]
fn conjunctions_respect_separation_limit() {
    let digest = compute_digest(&AnalyticEphemeris, &madrid(), &DigestConfig::default()).unwrap();
    for e in digest.of_kind(EventKind::Conjunction) {
        let v = e.value().expect("conjunction carries its separation");
        assert!(v <= 4.0, "{e:?}");
    }

    let tight = DigestConfig::from_toml_str("[separation]\nmax_separation_deg = 0.1\n").unwrap();
    let digest = compute_digest(&AnalyticEphemeris, &madrid(), &tight).unwrap();
    assert!(
        digest
            .of_kind(EventKind::Conjunction)
            .all(|e| e.bodies() != [Body::Venus, Body::Mars])
    );
}

#[test]
fn same_request_same_digest() {
    let config = DigestConfig::default();
    let a = compute_digest(&AnalyticEphemeris, &madrid(), &config).unwrap();
    let b = compute_digest(&AnalyticEphemeris, &madrid(), &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn one_failing_body_does_not_spoil_the_rest() {
    let digest = compute_digest(&Broken(Body::Jupiter), &madrid(), &DigestConfig::default()).unwrap();
    assert!(!digest.is_complete());
    assert!(digest.failures.iter().all(|f| f.bodies.contains(&Body::Jupiter)));
    assert!(digest.failures.iter().any(|f| f.scope == "visibility"));
    assert!(digest.failures.iter().any(|f| f.scope == "close_approach"));

    assert_eq!(digest.of_kind(EventKind::Phase).count(), 1);
    assert!(
        digest
            .of_kind(EventKind::Conjunction)
            .any(|e| e.bodies() == [Body::Venus, Body::Mars])
    );
    assert!(digest.events.iter().all(|e| !e.bodies().contains(&Body::Jupiter)));
}

#[test]
fn out_of_range_date_fails_softly() {
    let old = NaiveDate::from_ymd_opt(1700, 1, 1).unwrap();
    let request = DigestRequest::new(old, madrid().observer);
    let digest = compute_digest(&AnalyticEphemeris, &request, &DigestConfig::default()).unwrap();
    assert!(!digest.failures.is_empty());
    // Only the ephemeris-free shower table survives.
    assert!(digest.events.iter().all(|e| e.kind() == EventKind::Shower));
}

#[test]
fn invalid_observer_is_rejected() {
    let err = DigestRequest::from_coordinates(date(), 95.0, 0.0, 0.0).unwrap_err();
    assert!(matches!(err, DigestError::InvalidRequest(_)));
}

#[test]
fn invalid_config_aborts() {
    let config = DigestConfig {
        bodies: vec![Body::Sun],
        ..DigestConfig::default()
    };
    let err = compute_digest(&AnalyticEphemeris, &madrid(), &config).unwrap_err();
    assert!(matches!(err, DigestError::Config(_)));
}

#[test]
fn serialises_flat_records() {
    let digest = compute_digest(&AnalyticEphemeris, &madrid(), &DigestConfig::default()).unwrap();
    let json = serde_json::to_value(&digest).unwrap();
    let first = &json["events"][0];
    assert!(first["type"].is_string());
    assert!(first["bodies"].is_array());
    let instant = first["instants"][0].as_str().unwrap();
    assert_eq!(instant.len(), "2017-10-05T00:00:00Z".len());
    assert!(instant.ends_with('Z'));
    assert_eq!(json["date"], "2017-10-05");
}
