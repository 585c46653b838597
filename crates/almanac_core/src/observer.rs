//! Geographic observer location.

use serde::{Deserialize, Serialize};

use crate::error::ObserverError;

/// Mean Earth radius in meters (IAU nominal, for geometric dip).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Lowest accepted elevation (Dead Sea shore is about -430 m).
const MIN_ELEVATION_M: f64 = -500.0;
/// Highest accepted elevation; covers aircraft and high-altitude balloons.
const MAX_ELEVATION_M: f64 = 50_000.0;

/// A validated place on Earth's surface.
///
/// Construct with [`Observer::new`]; deserialization goes through the same
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObserver")]
pub struct Observer {
    latitude_deg: f64,
    longitude_deg: f64,
    elevation_m: f64,
}

#[derive(Deserialize)]
struct RawObserver {
    latitude_deg: f64,
    longitude_deg: f64,
    #[serde(default)]
    elevation_m: f64,
}

impl TryFrom<RawObserver> for Observer {
    type Error = ObserverError;

    fn try_from(raw: RawObserver) -> Result<Self, Self::Error> {
        Self::new(raw.latitude_deg, raw.longitude_deg, raw.elevation_m)
    }
}

impl Observer {
    /// Latitude north-positive in [-90, 90], longitude east-positive in
    /// [-180, 180], elevation above sea level in meters.
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
    ) -> Result<Self, ObserverError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ObserverError::InvalidLatitude(latitude_deg));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(ObserverError::InvalidLongitude(longitude_deg));
        }
        if !elevation_m.is_finite() || !(MIN_ELEVATION_M..=MAX_ELEVATION_M).contains(&elevation_m)
        {
            return Err(ObserverError::InvalidElevation(elevation_m));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    /// Geometric dip of the sea horizon for this elevation, in degrees.
    ///
    /// `sqrt(2h/R)` radians; zero at or below sea level.
    pub fn horizon_dip_deg(&self) -> f64 {
        if self.elevation_m > 0.0 {
            (2.0 * self.elevation_m / EARTH_RADIUS_M).sqrt().to_degrees()
        } else {
            0.0
        }
    }

    /// Offset of local mean time from UTC, in days (longitude / 360).
    pub fn local_mean_time_offset_days(&self) -> f64 {
        self.longitude_deg / 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(Observer::new(90.0, 180.0, 0.0).is_ok());
        assert!(Observer::new(-90.0, -180.0, -400.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Observer::new(90.5, 0.0, 0.0),
            Err(ObserverError::InvalidLatitude(90.5))
        );
        assert_eq!(
            Observer::new(0.0, -181.0, 0.0),
            Err(ObserverError::InvalidLongitude(-181.0))
        );
        assert!(Observer::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(Observer::new(0.0, 0.0, 1e6).is_err());
    }

    #[test]
    fn dip_at_1000m() {
        let o = Observer::new(45.0, 0.0, 1000.0).unwrap();
        let dip = o.horizon_dip_deg();
        assert!((dip - 1.015).abs() < 0.01, "dip = {dip}");
        assert_eq!(Observer::new(45.0, 0.0, -20.0).unwrap().horizon_dip_deg(), 0.0);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Observer =
            serde_json::from_str(r#"{"latitude_deg":40.4,"longitude_deg":-3.7}"#).unwrap();
        assert_eq!(ok.elevation_m(), 0.0);
        let bad = serde_json::from_str::<Observer>(r#"{"latitude_deg":140.0,"longitude_deg":0}"#);
        assert!(bad.is_err());
    }
}
