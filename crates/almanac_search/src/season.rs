//! Equinoxes and solstices.
//!
//! A season boundary is the instant the Sun's apparent ecliptic longitude
//! reaches a multiple of 90°.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use almanac_core::{Body, Ephemeris, Observer};
use almanac_frames::normalize_360;
use almanac_time::Instant;

use crate::error::SearchError;
use crate::kernel::{find_first, find_next};
use crate::kernel_types::{ScanConfig, SearchMode};
use crate::utc_day;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

impl Season {
    pub const ALL: [Self; 4] = [
        Self::MarchEquinox,
        Self::JuneSolstice,
        Self::SeptemberEquinox,
        Self::DecemberSolstice,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::MarchEquinox => "march_equinox",
            Self::JuneSolstice => "june_solstice",
            Self::SeptemberEquinox => "september_equinox",
            Self::DecemberSolstice => "december_solstice",
        }
    }

    /// Solar longitude at which this season begins.
    pub const fn target_deg(self) -> f64 {
        match self {
            Self::MarchEquinox => 0.0,
            Self::JuneSolstice => 90.0,
            Self::SeptemberEquinox => 180.0,
            Self::DecemberSolstice => 270.0,
        }
    }

    pub const fn is_equinox(self) -> bool {
        matches!(self, Self::MarchEquinox | Self::SeptemberEquinox)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonEvent {
    pub season: Season,
    pub instant: Instant,
    pub sun_longitude_deg: f64,
}

/// Nearest season boundary to a solar longitude: 90° buckets centred on
/// 0, 90, 180 and 270.
pub fn classify_season(sun_longitude_deg: f64) -> Season {
    let idx = ((normalize_360(sun_longitude_deg) + 45.0) / 90.0).floor() as usize % 4;
    Season::ALL[idx]
}

fn sun_longitude<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    t: Instant,
) -> Result<f64, SearchError> {
    Ok(eph.position(Body::Sun, observer, t)?.ecliptic_lon_deg)
}

/// Equinox or solstice boundary crossed between two longitude samples.
fn crossed_boundary(prev_deg: f64, curr_deg: f64) -> Option<Season> {
    let prev = normalize_360(prev_deg);
    let curr = normalize_360(curr_deg);
    if curr < prev {
        return Some(Season::MarchEquinox);
    }
    Season::ALL
        .into_iter()
        .skip(1)
        .find(|s| prev < s.target_deg() && s.target_deg() <= curr)
}

/// Equinox or solstice occurring during the UTC day `date`, if any.
pub fn season_on<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    date: NaiveDate,
    scan: &ScanConfig,
) -> Result<Option<SeasonEvent>, SearchError> {
    let (start, end) = utc_day(date);
    let prev = sun_longitude(eph, observer, start)?;
    let curr = sun_longitude(eph, observer, end)?;
    let Some(crossed) = crossed_boundary(prev, curr) else {
        return Ok(None);
    };
    let lon = |t: Instant| sun_longitude(eph, observer, t);
    let mode = SearchMode::AngleCrossing {
        target_deg: crossed.target_deg(),
    };
    let Some(found) = find_first(&lon, start, end, mode, scan)? else {
        return Ok(None);
    };
    let sun_longitude_deg = sun_longitude(eph, observer, found.instant)?;
    let season = classify_season(sun_longitude_deg);
    debug!(%date, season = season.name(), "season boundary");
    Ok(Some(SeasonEvent {
        season,
        instant: found.instant,
        sun_longitude_deg,
    }))
}

/// Next occurrence of `season` after `start`.
pub fn next_season<E: Ephemeris + ?Sized>(
    eph: &E,
    observer: &Observer,
    start: Instant,
    season: Season,
    scan: &ScanConfig,
) -> Result<Option<SeasonEvent>, SearchError> {
    let lon = |t: Instant| sun_longitude(eph, observer, t);
    let mode = SearchMode::AngleCrossing {
        target_deg: season.target_deg(),
    };
    let Some(found) = find_next(&lon, start, mode, scan)? else {
        return Ok(None);
    };
    Ok(Some(SeasonEvent {
        season,
        instant: found.instant,
        sun_longitude_deg: sun_longitude(eph, observer, found.instant)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::{EphemerisError, Position};

    const T0: f64 = 2_457_467.5; // 2016-03-20
    const YEAR: f64 = 365.242_19;

    /// Sun advancing uniformly, crossing 0° at T0 + 0.19 d.
    struct UniformSun;

    impl Ephemeris for UniformSun {
        fn position(
            &self,
            _body: Body,
            _observer: &Observer,
            t: Instant,
        ) -> Result<Position, EphemerisError> {
            let lon = 360.0 * (t.jd() - T0 - 0.19) / YEAR;
            Ok(Position {
                altitude_deg: 0.0,
                azimuth_deg: 0.0,
                ra_deg: 0.0,
                dec_deg: 0.0,
                ecliptic_lon_deg: lon.rem_euclid(360.0),
                ecliptic_lat_deg: 0.0,
                distance_km: 1.496e8,
            })
        }
    }

    fn obs() -> Observer {
        Observer::new(0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn classification_buckets() {
        assert_eq!(classify_season(0.0), Season::MarchEquinox);
        assert_eq!(classify_season(359.0), Season::MarchEquinox);
        assert_eq!(classify_season(44.9), Season::MarchEquinox);
        assert_eq!(classify_season(45.0), Season::JuneSolstice);
        assert_eq!(classify_season(180.0), Season::SeptemberEquinox);
        assert_eq!(classify_season(269.9), Season::DecemberSolstice);
        assert_eq!(classify_season(-1.0), Season::MarchEquinox);
    }

    #[test]
    fn equinox_flags() {
        assert!(Season::MarchEquinox.is_equinox());
        assert!(!Season::JuneSolstice.is_equinox());
        assert_eq!(Season::DecemberSolstice.name(), "december_solstice");
    }

    #[test]
    fn boundary_crossings() {
        assert_eq!(crossed_boundary(359.5, 0.5), Some(Season::MarchEquinox));
        assert_eq!(crossed_boundary(89.5, 90.5), Some(Season::JuneSolstice));
        assert_eq!(crossed_boundary(90.0, 91.0), None);
        assert_eq!(crossed_boundary(100.0, 101.0), None);
    }

    #[test]
    fn march_equinox_day() {
        let scan = ScanConfig::seasonal();
        let day = NaiveDate::from_ymd_opt(2016, 3, 20).unwrap();
        let ev = season_on(&UniformSun, &obs(), day, &scan).unwrap().unwrap();
        assert_eq!(ev.season, Season::MarchEquinox);
        assert!((ev.instant.jd() - (T0 + 0.19)).abs() * 86_400.0 < 2.0);
        let before = NaiveDate::from_ymd_opt(2016, 3, 19).unwrap();
        assert!(season_on(&UniformSun, &obs(), before, &scan).unwrap().is_none());
    }

    #[test]
    fn next_june_solstice() {
        let scan = ScanConfig::seasonal();
        let ev = next_season(&UniformSun, &obs(), Instant::from_jd(T0), Season::JuneSolstice, &scan)
            .unwrap()
            .unwrap();
        let expected = T0 + 0.19 + YEAR / 4.0;
        assert!((ev.instant.jd() - expected).abs() * 86_400.0 < 2.0);
        assert!((ev.sun_longitude_deg - 90.0).abs() < 1e-3);
    }
}
