//! Spot checks against published event times.
//!
//! Reference instants are from the USNO/IMCCE almanacs. The analytic model
//! is only expected to reproduce them to within a few arcminutes.

use almanac_core::{Body, Ephemeris, Observer};
use almanac_ephem::AnalyticEphemeris;
use almanac_frames::{angular_separation_deg, normalize_to_pm180};
use almanac_time::Instant;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Instant {
    Instant::from_utc(y, mo, d, h, mi, 0.0).unwrap()
}

fn sun_lon(t: Instant) -> f64 {
    AnalyticEphemeris
        .geocentric_ecliptic(Body::Sun, t)
        .unwrap()
        .lon_deg
}

#[test]
fn sun_at_2016_equinoxes_and_solstices() {
    // Sun moves ~0.0007°/min; 0.02° ≈ half an hour.
    let cases = [
        (at(2016, 3, 20, 4, 30), 0.0),
        (at(2016, 6, 20, 22, 34), 90.0),
        (at(2016, 9, 22, 14, 21), 180.0),
        (at(2016, 12, 21, 10, 44), 270.0),
    ];
    for (t, expected) in cases {
        let d = normalize_to_pm180(sun_lon(t) - expected);
        assert!(d.abs() < 0.02, "{t}: off by {d}°");
    }
}

#[test]
fn full_moon_2017_10_05() {
    let t = at(2017, 10, 5, 18, 40);
    let moon = AnalyticEphemeris.geocentric_ecliptic(Body::Moon, t).unwrap();
    let elong = normalize_to_pm180(moon.lon_deg - sun_lon(t) - 180.0);
    assert!(elong.abs() < 0.1, "phase angle off by {elong}°");
}

#[test]
fn lunar_perigee_and_apogee_distances_october_2017() {
    let perigee = AnalyticEphemeris
        .geocentric_ecliptic(Body::Moon, at(2017, 10, 9, 5, 53))
        .unwrap();
    assert!((perigee.distance_km - 366_857.0).abs() < 300.0, "{}", perigee.distance_km);
    let apogee = AnalyticEphemeris
        .geocentric_ecliptic(Body::Moon, at(2017, 10, 25, 2, 26))
        .unwrap();
    assert!((apogee.distance_km - 405_151.0).abs() < 300.0, "{}", apogee.distance_km);
}

#[test]
fn venus_mars_close_on_2017_10_05() {
    let obs = Observer::new(40.4168, -3.7038, 650.0).unwrap();
    let t = at(2017, 10, 5, 16, 0);
    let v = AnalyticEphemeris.position(Body::Venus, &obs, t).unwrap();
    let m = AnalyticEphemeris.position(Body::Mars, &obs, t).unwrap();
    let sep = angular_separation_deg(v.azimuth_deg, v.altitude_deg, m.azimuth_deg, m.altitude_deg);
    assert!(sep < 0.6, "separation {sep}°");
}

#[test]
fn sun_below_horizon_at_local_midnight() {
    let obs = Observer::new(40.4168, -3.7038, 650.0).unwrap();
    let p = AnalyticEphemeris
        .position(Body::Sun, &obs, at(2017, 10, 5, 0, 15))
        .unwrap();
    assert!(p.altitude_deg < -30.0, "alt = {}", p.altitude_deg);
}
