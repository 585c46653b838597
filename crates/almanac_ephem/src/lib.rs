//! Analytic ephemeris adapter.
//!
//! [`AnalyticEphemeris`] implements [`almanac_core::Ephemeris`] from closed
//! formulas only: Standish mean elements for the planets, a truncated
//! lunar series for the Moon, low-precision nutation and a ΔT fit. It needs
//! no data files and is good to a few arcminutes over 1800–2050, which is
//! enough to time rises, phases and conjunctions to within minutes.
//!
//! ```rust,ignore
//! let eph = AnalyticEphemeris::new();
//! let pos = eph.position(Body::Moon, &observer, instant)?;
//! ```

use almanac_core::{Body, Ephemeris, EphemerisError, Observer, Position};
use almanac_frames::{
    cartesian_to_spherical, ecliptic_to_equatorial, equatorial_to_horizontal,
    general_precession_longitude_deg, mean_obliquity_deg, normalize_to_pm180, nutation_arcsec,
};
use almanac_time::{Instant, J2000_JD, SECONDS_PER_DAY, local_sidereal_time_deg};

pub mod delta_t;
pub mod kepler;
pub mod moon;

use kepler::{EARTH_MOON_BARYCENTER, heliocentric_position, planet_elements};
use moon::lunar_position;

/// 1800-01-01 00:00 UTC.
pub const VALID_FROM_JD: f64 = 2_378_496.5;
/// 2051-01-01 00:00 UTC (exclusive).
pub const VALID_UNTIL_JD: f64 = 2_470_172.5;

/// Astronomical unit in km (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// Light travel time for one AU, in days.
const LIGHT_DAYS_PER_AU: f64 = 0.005_775_518_3;
/// 1 + Earth/Moon mass ratio.
const EARTH_MOON_MASS_FACTOR: f64 = 82.300_57;
/// Constant of annual aberration, arcseconds.
const ABERRATION_ARCSEC: f64 = 20.4898;
/// Earth equatorial radius used for horizontal parallax, km.
const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;

/// Apparent geocentric ecliptic place, referred to the true equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPlace {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub distance_km: f64,
}

/// Closed-form ephemeris for the Sun, Moon and planets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Whether `t` lies inside the supported 1800–2050 span.
    pub fn covers(&self, t: Instant) -> bool {
        (VALID_FROM_JD..VALID_UNTIL_JD).contains(&t.jd())
    }

    /// Apparent geocentric ecliptic longitude/latitude of date and distance.
    pub fn geocentric_ecliptic(
        &self,
        body: Body,
        t: Instant,
    ) -> Result<EclipticPlace, EphemerisError> {
        if !self.covers(t) {
            return Err(EphemerisError::out_of_range(body, t.jd()));
        }
        let tc = tt_centuries(t);
        let (dpsi_arcsec, _) = nutation_arcsec(tc);
        let dpsi = dpsi_arcsec / 3600.0;

        let place = match body {
            Body::Moon => {
                let m = lunar_position(tc);
                EclipticPlace {
                    lon_deg: m.lon_deg + dpsi,
                    lat_deg: m.lat_deg,
                    distance_km: m.distance_km,
                }
            }
            Body::Sun => {
                let earth = earth_heliocentric(tc);
                let s = cartesian_to_spherical(&[-earth[0], -earth[1], -earth[2]]);
                let aberration = ABERRATION_ARCSEC / 3600.0 / s.radius;
                EclipticPlace {
                    lon_deg: s.lon_deg + general_precession_longitude_deg(tc) + dpsi - aberration,
                    lat_deg: s.lat_deg,
                    distance_km: s.radius * AU_KM,
                }
            }
            planet => {
                let el = planet_elements(planet)
                    .ok_or_else(|| EphemerisError::unsupported(planet, t.jd()))?;
                let earth = earth_heliocentric(tc);
                let geometric = sub(heliocentric_position(el, tc), earth);
                // One light-time iteration: the planet where it was when the light left.
                let delay = norm(geometric) * LIGHT_DAYS_PER_AU / 36_525.0;
                let s = cartesian_to_spherical(&sub(heliocentric_position(el, tc - delay), earth));
                EclipticPlace {
                    lon_deg: s.lon_deg + general_precession_longitude_deg(tc) + dpsi,
                    lat_deg: s.lat_deg,
                    distance_km: s.radius * AU_KM,
                }
            }
        };
        Ok(EclipticPlace {
            lon_deg: place.lon_deg.rem_euclid(360.0),
            ..place
        })
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn position(
        &self,
        body: Body,
        observer: &Observer,
        t: Instant,
    ) -> Result<Position, EphemerisError> {
        let place = self.geocentric_ecliptic(body, t)?;
        let tc = tt_centuries(t);
        let (dpsi, deps) = nutation_arcsec(tc);
        let obliquity = mean_obliquity_deg(tc) + deps / 3600.0;
        let eq = ecliptic_to_equatorial(place.lon_deg, place.lat_deg, obliquity);

        // Apparent sidereal time = mean + equation of the equinoxes.
        let last = local_sidereal_time_deg(t, observer.longitude_deg())
            + dpsi / 3600.0 * obliquity.to_radians().cos();
        let hour_angle = normalize_to_pm180(last - eq.ra_deg);
        let geo = equatorial_to_horizontal(hour_angle, eq.dec_deg, observer.latitude_deg());

        // Diurnal parallax in altitude; only the Moon's is noticeable.
        let parallax = (EARTH_EQUATORIAL_RADIUS_KM / place.distance_km)
            .asin()
            .to_degrees();
        let altitude = geo.altitude_deg - parallax * geo.altitude_deg.to_radians().cos();

        Ok(Position {
            altitude_deg: altitude,
            azimuth_deg: geo.azimuth_deg,
            ra_deg: eq.ra_deg,
            dec_deg: eq.dec_deg,
            ecliptic_lon_deg: place.lon_deg,
            ecliptic_lat_deg: place.lat_deg,
            distance_km: place.distance_km,
        })
    }
}

/// Julian centuries of TT since J2000.0 for a UTC instant.
fn tt_centuries(t: Instant) -> f64 {
    let year = 2000.0 + (t.jd() - J2000_JD) / 365.25;
    let delta_t_days = delta_t::delta_t_seconds(year) / SECONDS_PER_DAY;
    (t.jd() + delta_t_days - J2000_JD) / 36_525.0
}

/// Heliocentric Earth (AU, J2000 ecliptic): the barycenter minus the
/// Moon's share of the Earth–Moon vector.
fn earth_heliocentric(tc: f64) -> [f64; 3] {
    let emb = heliocentric_position(&EARTH_MOON_BARYCENTER, tc);
    let m = lunar_position(tc);
    let lon = (m.lon_deg - general_precession_longitude_deg(tc)).to_radians();
    let lat = m.lat_deg.to_radians();
    let r = m.distance_km / AU_KM / EARTH_MOON_MASS_FACTOR;
    [
        emb[0] - r * lat.cos() * lon.cos(),
        emb[1] - r * lat.cos() * lon.sin(),
        emb[2] - r * lat.sin(),
    ]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
