//! Greenwich and local sidereal time.
//!
//! UT1 is taken equal to UTC (|UT1 − UTC| < 0.9 s, well under the
//! resolution of a rise/set search).
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use crate::instant::Instant;
use crate::julian::J2000_JD;

/// Earth Rotation Angle in degrees, [0, 360).
pub fn earth_rotation_angle_deg(t: Instant) -> f64 {
    let du = t.jd() - J2000_JD;
    let turns = 0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du;
    (turns.rem_euclid(1.0)) * 360.0
}

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
pub fn gmst_deg(t: Instant) -> f64 {
    let c = t.centuries_since_j2000();
    let poly_arcsec = 0.014506
        + c * (4612.156534 + c * (1.3915817 + c * (-0.00000044 + c * (-0.000029956 - c * 0.0000000368))));
    (earth_rotation_angle_deg(t) + poly_arcsec / 3600.0).rem_euclid(360.0)
}

/// Local Mean Sidereal Time in degrees for an east-positive longitude.
pub fn local_sidereal_time_deg(t: Instant, longitude_east_deg: f64) -> f64 {
    (gmst_deg(t) + longitude_east_deg).rem_euclid(360.0)
}

/// Local hour angle of a right ascension, in (-180, 180].
///
/// Negative east of the meridian (before culmination).
pub fn hour_angle_deg(t: Instant, longitude_east_deg: f64, ra_deg: f64) -> f64 {
    let h = (local_sidereal_time_deg(t, longitude_east_deg) - ra_deg).rem_euclid(360.0);
    if h > 180.0 { h - 360.0 } else { h }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000_noon() {
        let era = earth_rotation_angle_deg(Instant::from_jd(J2000_JD));
        assert!((era - 280.46).abs() < 0.01, "ERA = {era}");
    }

    #[test]
    fn gmst_meeus_example() {
        // Meeus example 12.a: 1987 Apr 10 0h UT, GMST = 13h10m46.3668s
        let t = Instant::from_utc(1987, 4, 10, 0, 0, 0.0).unwrap();
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert!((gmst_deg(t) - expected).abs() < 0.001, "{}", gmst_deg(t));
    }

    #[test]
    fn gmst_advances_faster_than_solar_day() {
        let t = Instant::from_jd(2_458_031.5);
        let a = gmst_deg(t);
        let b = gmst_deg(Instant::from_jd(t.jd() + 1.0));
        let gain = (b - a).rem_euclid(360.0);
        assert!((gain - 0.9856).abs() < 0.001, "gain = {gain}");
    }

    #[test]
    fn lst_adds_longitude() {
        let t = Instant::from_jd(2_458_031.5);
        let diff = (local_sidereal_time_deg(t, 90.0) - gmst_deg(t)).rem_euclid(360.0);
        assert!((diff - 90.0).abs() < 1e-9);
    }

    #[test]
    fn hour_angle_range() {
        let t = Instant::from_jd(2_458_031.5);
        for ra in [0.0, 45.0, 179.0, 181.0, 359.0] {
            let h = hour_angle_deg(t, -3.7, ra);
            assert!(h > -180.0 && h <= 180.0);
        }
    }
}
