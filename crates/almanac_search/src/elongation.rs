//! Planet–Sun configurations: greatest elongations, solar conjunctions and
//! oppositions.
//!
//! Greatest elongations are extrema of the signed elongation (positive
//! east of the Sun). Near inferior conjunction the sign flips abruptly
//! while the magnitude stays small, which produces spurious extrema; every
//! candidate is therefore confirmed by [`is_true_greatest_elongation`].
//! Conjunctions and oppositions are wrap-aware crossings of the ecliptic
//! longitude difference through 0° and 180°.

use chrono::NaiveDate;
use tracing::debug;

use almanac_core::{Body, Ephemeris, Observer};
use almanac_frames::{angular_separation_deg, normalize_to_pm180};
use almanac_time::{Days, Instant};

use crate::elongation_types::{
    ConjunctionKind, ElongationConfig, ElongationSide, GreatestElongation, Opposition,
    SolarConjunction,
};
use crate::error::SearchError;
use crate::kernel::{SampledFunction, find_all};
use crate::kernel_types::{ScanConfig, SearchMode};
use crate::transit::by_instant;
use crate::utc_day;

/// Angular distance from the Sun, positive when the body's longitude is
/// ahead of (east of) the Sun's.
pub fn signed_elongation<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    t: Instant,
) -> Result<f64, SearchError> {
    let p = eph.position(body, observer, t)?;
    let sun = eph.position(Body::Sun, observer, t)?;
    let magnitude = angular_separation_deg(
        p.ecliptic_lon_deg,
        p.ecliptic_lat_deg,
        sun.ecliptic_lon_deg,
        sun.ecliptic_lat_deg,
    );
    if normalize_to_pm180(p.ecliptic_lon_deg - sun.ecliptic_lon_deg) >= 0.0 {
        Ok(magnitude)
    } else {
        Ok(-magnitude)
    }
}

/// Whether `t` is a genuine greatest elongation of the signed elongation
/// `f`: `|f|` peaks at `t`, `f` keeps its sign `probe` before and after,
/// and `|f(t)|` reaches `min_magnitude_deg`.
pub fn is_true_greatest_elongation<F: SampledFunction>(
    f: &F,
    t: Instant,
    probe: Days,
    min_magnitude_deg: f64,
) -> Result<bool, F::Error> {
    let at = f.sample(t)?;
    let before = f.sample(t - probe)?;
    let after = f.sample(t + probe)?;
    let same_side = at != 0.0 && before * at > 0.0 && after * at > 0.0;
    let peaked = at.abs() >= before.abs() && at.abs() >= after.abs();
    Ok(same_side && peaked && at.abs() >= min_magnitude_deg)
}

/// Validated greatest elongations of Mercury or Venus in `[start, end]`.
pub fn search_greatest_elongations<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    start: Instant,
    end: Instant,
    config: &ElongationConfig,
) -> Result<Vec<GreatestElongation>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !body.is_inferior() {
        return Err(SearchError::InvalidConfig(
            "greatest elongation needs an inferior planet",
        ));
    }
    let elongation = |t: Instant| signed_elongation(eph, body, observer, t);
    let mut found = Vec::new();
    for mode in [SearchMode::Maximum, SearchMode::Minimum] {
        for candidate in find_all(&elongation, start, end, mode, &config.scan)? {
            if !is_true_greatest_elongation(
                &elongation,
                candidate.instant,
                config.probe,
                config.min_magnitude_deg,
            )? {
                debug!(%body, instant = %candidate.instant, "rejected elongation candidate");
                continue;
            }
            found.push(GreatestElongation {
                body,
                instant: candidate.instant,
                elongation_deg: candidate.value.abs(),
                side: if candidate.value > 0.0 {
                    ElongationSide::East
                } else {
                    ElongationSide::West
                },
            });
        }
    }
    found.sort_by(|a, b| by_instant(a.instant, b.instant));
    Ok(found)
}

/// Greatest elongation falling in the UTC day `date`, if any.
pub fn greatest_elongation_on<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    config: &ElongationConfig,
) -> Result<Option<GreatestElongation>, SearchError> {
    let (start, end) = utc_day(date);
    let pad = config.scan.step;
    Ok(
        search_greatest_elongations(eph, body, observer, start - pad, end + pad, config)?
            .into_iter()
            .find(|e| e.instant >= start && e.instant < end),
    )
}

fn longitude_difference<'a, E: Ephemeris + ?Sized>(
    eph: &'a E,
    body: Body,
    observer: &'a Observer,
) -> impl Fn(Instant) -> Result<f64, SearchError> + 'a {
    move |t| {
        let p = eph.position(body, observer, t)?;
        let sun = eph.position(Body::Sun, observer, t)?;
        Ok((p.ecliptic_lon_deg - sun.ecliptic_lon_deg).rem_euclid(360.0))
    }
}

/// Conjunctions of a planet with the Sun in `[start, end]`.
///
/// Mercury and Venus are typed inferior or superior by whether they are
/// nearer than the Sun; other planets get [`ConjunctionKind::Conjunction`].
pub fn search_solar_conjunctions<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    start: Instant,
    end: Instant,
    scan: &ScanConfig,
) -> Result<Vec<SolarConjunction>, SearchError> {
    if !body.is_planet() {
        return Err(SearchError::InvalidConfig("solar conjunctions need a planet"));
    }
    let diff = longitude_difference(eph, body, observer);
    let mode = SearchMode::AngleCrossing { target_deg: 0.0 };
    find_all(&diff, start, end, mode, scan)?
        .into_iter()
        .map(|found| {
            let kind = if body.is_inferior() {
                let planet = eph.position(body, observer, found.instant)?;
                let sun = eph.position(Body::Sun, observer, found.instant)?;
                if planet.distance_km < sun.distance_km {
                    ConjunctionKind::Inferior
                } else {
                    ConjunctionKind::Superior
                }
            } else {
                ConjunctionKind::Conjunction
            };
            Ok(SolarConjunction {
                body,
                instant: found.instant,
                kind,
            })
        })
        .collect()
}

/// Oppositions of a superior planet in `[start, end]`.
pub fn search_oppositions<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    start: Instant,
    end: Instant,
    scan: &ScanConfig,
) -> Result<Vec<Opposition>, SearchError> {
    if !body.is_superior() {
        return Err(SearchError::InvalidConfig("oppositions need a superior planet"));
    }
    let diff = longitude_difference(eph, body, observer);
    let mode = SearchMode::AngleCrossing { target_deg: 180.0 };
    Ok(find_all(&diff, start, end, mode, scan)?
        .into_iter()
        .map(|found| Opposition {
            body,
            instant: found.instant,
        })
        .collect())
}

/// Solar conjunction during the UTC day `date`, if any.
pub fn solar_conjunction_on<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    scan: &ScanConfig,
) -> Result<Option<SolarConjunction>, SearchError> {
    let (start, end) = utc_day(date);
    Ok(search_solar_conjunctions(eph, body, observer, start, end, scan)?
        .into_iter()
        .next())
}

/// Opposition during the UTC day `date`, if any.
pub fn opposition_on<E: Ephemeris + ?Sized>(
    eph: &E,
    body: Body,
    observer: &Observer,
    date: NaiveDate,
    scan: &ScanConfig,
) -> Result<Option<Opposition>, SearchError> {
    let (start, end) = utc_day(date);
    Ok(search_oppositions(eph, body, observer, start, end, scan)?
        .into_iter()
        .next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::{EphemerisError, Position};
    use std::f64::consts::TAU;

    const T0: f64 = 2_458_031.5;

    /// Sun fixed at longitude 0. Venus swings ±40° around it on a 100-day
    /// cycle with a 1° latitude offset, so inferior conjunction never
    /// reaches zero separation. Mars drifts 1°/day, opposite the Sun at
    /// d = 9.7.
    struct Swing;

    impl Ephemeris for Swing {
        fn position(
            &self,
            body: Body,
            _observer: &Observer,
            t: Instant,
        ) -> Result<Position, EphemerisError> {
            let d = t.jd() - T0;
            let (lon, lat, dist) = match body {
                Body::Sun => (0.0, 0.0, 1.5e8),
                // East elongation peak at d = 25, west at d = 75.
                // Inferior conjunction (near) at d = 50, superior at d = 0.
                Body::Venus => {
                    let phase = TAU * d / 100.0;
                    let dist = if phase.cos() < 0.0 { 0.5e8 } else { 2.5e8 };
                    (40.0 * phase.sin(), 1.0, dist)
                }
                Body::Mars => (170.3 + d, 0.0, 1.0e8),
                _ => return Err(EphemerisError::unsupported(body, t.jd())),
            };
            Ok(Position {
                altitude_deg: 0.0,
                azimuth_deg: 0.0,
                ra_deg: 0.0,
                dec_deg: 0.0,
                ecliptic_lon_deg: lon.rem_euclid(360.0),
                ecliptic_lat_deg: lat,
                distance_km: dist,
            })
        }
    }

    fn obs() -> Observer {
        Observer::new(0.0, 0.0, 0.0).unwrap()
    }

    fn day(d: f64) -> Instant {
        Instant::from_jd(T0 + d)
    }

    #[test]
    fn signed_elongation_sign() {
        let east = signed_elongation(&Swing, Body::Venus, &obs(), day(25.0)).unwrap();
        assert!(east > 39.9);
        let west = signed_elongation(&Swing, Body::Venus, &obs(), day(75.0)).unwrap();
        assert!(west < -39.9);
    }

    #[test]
    fn validator_rejects_zero_crossing_artefacts() {
        let f = |t: Instant| signed_elongation(&Swing, Body::Venus, &obs(), t);
        assert!(is_true_greatest_elongation(&f, day(25.0), Days(1.0), 5.0).unwrap());
        // At inferior conjunction |e| is a minimum and the sign flips.
        assert!(!is_true_greatest_elongation(&f, day(50.0), Days(1.0), 5.0).unwrap());
        // Off-peak point.
        assert!(!is_true_greatest_elongation(&f, day(20.0), Days(1.0), 5.0).unwrap());
        // Peak below the magnitude floor.
        assert!(!is_true_greatest_elongation(&f, day(25.0), Days(1.0), 45.0).unwrap());
    }

    #[test]
    fn finds_east_and_west_elongations() {
        let cfg = ElongationConfig::default();
        let hits =
            search_greatest_elongations(&Swing, Body::Venus, &obs(), day(5.0), day(95.0), &cfg)
                .unwrap();
        assert_eq!(hits.len(), 2, "{hits:?}");
        assert_eq!(hits[0].side, ElongationSide::East);
        assert!(((hits[0].instant - day(25.0)).as_days()).abs() < 0.01);
        assert_eq!(hits[1].side, ElongationSide::West);
        assert!(((hits[1].instant - day(75.0)).as_days()).abs() < 0.01);
        assert!(hits.iter().all(|h| h.elongation_deg > 39.0));
    }

    #[test]
    fn greatest_elongation_needs_inferior_planet() {
        let cfg = ElongationConfig::default();
        let err = search_greatest_elongations(&Swing, Body::Mars, &obs(), day(0.0), day(10.0), &cfg)
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
    }

    #[test]
    fn conjunction_types() {
        let scan = ScanConfig::elongation();
        let hits =
            search_solar_conjunctions(&Swing, Body::Venus, &obs(), day(10.0), day(110.0), &scan)
                .unwrap();
        let kinds: Vec<_> = hits.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [ConjunctionKind::Inferior, ConjunctionKind::Superior]);
        assert!(((hits[0].instant - day(50.0)).as_days()).abs() < 0.01);
    }

    #[test]
    fn opposition_of_mars() {
        let scan = ScanConfig::elongation();
        let hits = search_oppositions(&Swing, Body::Mars, &obs(), day(0.0), day(30.0), &scan).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(((hits[0].instant - day(9.7)).as_days()).abs() < 0.01);
        let date = hits[0].instant.date().unwrap();
        assert!(opposition_on(&Swing, Body::Mars, &obs(), date, &scan).unwrap().is_some());
        assert!(
            search_oppositions(&Swing, Body::Venus, &obs(), day(0.0), day(30.0), &scan).is_err()
        );
    }
}
