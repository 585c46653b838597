//! Angle arithmetic in degrees.

/// Normalize an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, 180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Great-circle separation between two points on a sphere, in [0, 180].
///
/// Points are given as (longitude, latitude) pairs in any consistent frame
/// (ecliptic, equatorial, or azimuth/altitude). Uses the Vincenty form, which
/// stays accurate for both tiny and near-antipodal separations.
pub fn angular_separation_deg(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (sin_dl, cos_dl) = (lon2 - lon1).to_radians().sin_cos();
    let (sin_b1, cos_b1) = lat1.to_radians().sin_cos();
    let (sin_b2, cos_b2) = lat2.to_radians().sin_cos();

    let a = cos_b2 * sin_dl;
    let b = cos_b1 * sin_b2 - sin_b1 * cos_b2 * cos_dl;
    let num = (a * a + b * b).sqrt();
    let den = sin_b1 * sin_b2 + cos_b1 * cos_b2 * cos_dl;
    num.atan2(den).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_360_cases() {
        assert_eq!(normalize_360(360.0), 0.0);
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert!(normalize_360(-1e-17) < 360.0);
    }

    #[test]
    fn pm180_cases() {
        assert!((normalize_to_pm180(190.0) + 170.0).abs() < 1e-12);
        assert!((normalize_to_pm180(-190.0) - 170.0).abs() < 1e-12);
        assert_eq!(normalize_to_pm180(180.0), 180.0);
        assert_eq!(normalize_to_pm180(-180.0), 180.0);
    }

    #[test]
    fn separation_along_equator() {
        assert!((angular_separation_deg(10.0, 0.0, 40.0, 0.0) - 30.0).abs() < 1e-10);
        assert!((angular_separation_deg(350.0, 0.0, 10.0, 0.0) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn separation_is_symmetric_and_bounded() {
        let a = angular_separation_deg(12.0, 34.0, 200.0, -20.0);
        let b = angular_separation_deg(200.0, -20.0, 12.0, 34.0);
        assert!((a - b).abs() < 1e-12);
        assert!((0.0..=180.0).contains(&a));
    }

    #[test]
    fn separation_tiny() {
        let s = angular_separation_deg(100.0, 20.0, 100.0, 20.0 + 1.0 / 3600.0);
        assert!((s * 3600.0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn antipodes() {
        assert!((angular_separation_deg(0.0, 0.0, 180.0, 0.0) - 180.0).abs() < 1e-10);
    }
}
