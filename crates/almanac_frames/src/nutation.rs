//! Low-precision nutation (four leading terms).
//!
//! Accurate to about 0.5″ in longitude and 0.1″ in obliquity, which is far
//! below what the event searches can resolve.
//!
//! Source: Meeus, *Astronomical Algorithms*, 2nd ed., ch. 22.

/// Nutation in longitude and obliquity, `(Δψ, Δε)` in arcseconds, for `t`
/// Julian centuries since J2000.0.
pub fn nutation_arcsec(t: f64) -> (f64, f64) {
    // Longitude of the Moon's ascending node, and mean longitudes of Sun and Moon.
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let l_sun = (280.4665 + 36000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481267.8813 * t).to_radians();

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos() + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();
    (dpsi, deps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_22a() {
        // 1987 Apr 10 0h TD: Δψ = −3.788″, Δε = +9.443″
        let t = -0.127_296_372_348;
        let (dpsi, deps) = nutation_arcsec(t);
        assert!((dpsi + 3.788).abs() < 0.5, "dpsi = {dpsi}");
        assert!((deps - 9.443).abs() < 0.2, "deps = {deps}");
    }

    #[test]
    fn bounded_amplitude() {
        for i in 0..200 {
            let (dpsi, deps) = nutation_arcsec(-2.0 + i as f64 * 0.02);
            assert!(dpsi.abs() < 19.5 && deps.abs() < 10.5);
        }
    }
}
