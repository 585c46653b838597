//! Ecliptic → equatorial → horizontal rotations.
//!
//! All angles in degrees. Azimuth is measured from north through east.

/// Mean obliquity of the ecliptic (IAU 1980 linear fit, good to ~0.01″ over
/// the supported range) for `t` Julian centuries since J2000.0.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    23.439_291 - 0.013_004_2 * t
}

/// Right ascension [0, 360) and declination [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

/// Altitude above the horizon and azimuth from north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
}

/// Rotate ecliptic longitude/latitude into right ascension/declination.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> Equatorial {
    let (sin_l, cos_l) = lon_deg.to_radians().sin_cos();
    let (sin_b, cos_b) = lat_deg.to_radians().sin_cos();
    let (sin_e, cos_e) = obliquity_deg.to_radians().sin_cos();

    let sin_dec = sin_b * cos_e + cos_b * sin_e * sin_l;
    let y = sin_l * cos_b * cos_e - sin_b * sin_e;
    let x = cos_l * cos_b;
    Equatorial {
        ra_deg: y.atan2(x).to_degrees().rem_euclid(360.0),
        dec_deg: sin_dec.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

/// Convert a local hour angle and declination into altitude/azimuth for an
/// observer at `latitude_deg`.
pub fn equatorial_to_horizontal(
    hour_angle_deg: f64,
    dec_deg: f64,
    latitude_deg: f64,
) -> Horizontal {
    let (sin_h, cos_h) = hour_angle_deg.to_radians().sin_cos();
    let (sin_d, cos_d) = dec_deg.to_radians().sin_cos();
    let (sin_p, cos_p) = latitude_deg.to_radians().sin_cos();

    let sin_alt = sin_p * sin_d + cos_p * cos_d * cos_h;
    // Azimuth from south, then shifted to north-based.
    let az_south = sin_h.atan2(cos_h * sin_p - (sin_d / cos_d.max(1e-15)) * cos_p);
    Horizontal {
        altitude_deg: sin_alt.clamp(-1.0, 1.0).asin().to_degrees(),
        azimuth_deg: (az_south.to_degrees() + 180.0).rem_euclid(360.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn equinox_point_maps_to_origin() {
        let eq = ecliptic_to_equatorial(0.0, 0.0, 23.44);
        assert!(eq.ra_deg.abs() < EPS && eq.dec_deg.abs() < EPS);
    }

    #[test]
    fn june_solstice_point() {
        let eps = mean_obliquity_deg(0.0);
        let eq = ecliptic_to_equatorial(90.0, 0.0, eps);
        assert!((eq.ra_deg - 90.0).abs() < EPS);
        assert!((eq.dec_deg - eps).abs() < EPS);
    }

    #[test]
    fn meeus_example_13a_declination() {
        // Pollux: λ = 113.215630°, β = 6.684170°, ε = 23.4392911° → α = 116.328942°, δ = 28.026183°
        let eq = ecliptic_to_equatorial(113.215_630, 6.684_170, 23.439_291_1);
        assert!((eq.ra_deg - 116.328_942).abs() < 1e-5, "ra = {}", eq.ra_deg);
        assert!((eq.dec_deg - 28.026_183).abs() < 1e-5, "dec = {}", eq.dec_deg);
    }

    #[test]
    fn culmination_is_due_south() {
        // Body on the meridian, south of the zenith for a northern observer.
        let h = equatorial_to_horizontal(0.0, 10.0, 50.0);
        assert!((h.altitude_deg - 50.0).abs() < EPS);
        assert!((h.azimuth_deg - 180.0).abs() < EPS);
    }

    #[test]
    fn rising_body_is_east() {
        let h = equatorial_to_horizontal(-90.0, 0.0, 40.0);
        assert!(h.altitude_deg.abs() < 1e-6);
        assert!((h.azimuth_deg - 90.0).abs() < 1e-6, "az = {}", h.azimuth_deg);
    }

    #[test]
    fn pole_star_altitude_equals_latitude() {
        let h = equatorial_to_horizontal(123.0, 90.0 - 1e-9, 35.0);
        assert!((h.altitude_deg - 35.0).abs() < 1e-6);
    }
}
