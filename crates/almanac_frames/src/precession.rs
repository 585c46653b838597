//! IAU 2006 general precession in ecliptic longitude.
//!
//! Used to carry J2000 ecliptic longitudes to the equinox of date, which is
//! the frame solstices, equinoxes and lunar phases are defined in.
//!
//! Source: Capitaine, Wallace & Chapront 2003, A&A 412, 567-586 (Table 1).

/// Accumulated general precession p_A in arcseconds after `t` Julian
/// centuries from J2000.0. Roughly 5029″ per century.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    t * (5028.796195 + t * (1.1054348 + t * (0.00007964 + t * (-0.000023857 - t * 0.0000000383))))
}

/// General precession p_A in degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

/// Ecliptic longitude of date from a J2000 ecliptic longitude, [0, 360).
pub fn precess_longitude_deg(lon_j2000_deg: f64, t: f64) -> f64 {
    (lon_j2000_deg + general_precession_longitude_deg(t)).rem_euclid(360.0)
}
