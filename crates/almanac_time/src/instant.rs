//! Continuous UTC time and signed day deltas.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, julian_centuries};
use crate::utc_time::UtcTime;

/// Julian Date of the Unix epoch, 1970-01-01 00:00 UTC.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Signed time span measured in days.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Days(pub f64);

impl Days {
    pub const ZERO: Days = Days(0.0);

    pub fn from_seconds(s: f64) -> Self {
        Self(s / SECONDS_PER_DAY)
    }

    pub fn from_minutes(m: f64) -> Self {
        Self(m / 1440.0)
    }

    pub fn from_hours(h: f64) -> Self {
        Self(h / 24.0)
    }

    pub fn as_days(self) -> f64 {
        self.0
    }

    pub fn as_seconds(self) -> f64 {
        self.0 * SECONDS_PER_DAY
    }

    pub fn as_hours(self) -> f64 {
        self.0 * 24.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Neg for Days {
    type Output = Days;
    fn neg(self) -> Days {
        Days(-self.0)
    }
}

impl Add for Days {
    type Output = Days;
    fn add(self, rhs: Days) -> Days {
        Days(self.0 + rhs.0)
    }
}

impl Sub for Days {
    type Output = Days;
    fn sub(self, rhs: Days) -> Days {
        Days(self.0 - rhs.0)
    }
}

impl Mul<f64> for Days {
    type Output = Days;
    fn mul(self, rhs: f64) -> Days {
        Days(self.0 * rhs)
    }
}

/// A point on the UTC time line, stored as a Julian Date.
///
/// The workspace treats UTC as continuous; leap seconds are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Instant {
    jd: f64,
}

impl Instant {
    pub fn from_jd(jd: f64) -> Self {
        Self { jd }
    }

    pub fn jd(self) -> f64 {
        self.jd
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(self) -> f64 {
        julian_centuries(self.jd)
    }

    /// Validated calendar constructor.
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        Ok(UtcTime::new(year, month, day, hour, minute, second)?.to_instant())
    }

    /// 00:00 UTC of a `chrono` date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_jd(calendar_to_jd(date.year(), date.month(), date.day() as f64))
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let secs = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
        Self::from_jd(UNIX_EPOCH_JD + secs / SECONDS_PER_DAY)
    }

    /// `None` when the instant is outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let secs = (self.jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
    }

    pub fn to_utc(self) -> UtcTime {
        UtcTime::from_instant(self)
    }

    /// Calendar breakdown rounded to whole seconds (never a `60` second).
    pub fn to_utc_rounded(self) -> UtcTime {
        UtcTime::from_instant_rounded(self)
    }

    /// UTC calendar date this instant falls on.
    pub fn date(self) -> Option<NaiveDate> {
        self.to_utc().date()
    }

    /// Preceding 00:00 UTC.
    pub fn start_of_day(self) -> Self {
        Self::from_jd((self.jd - 0.5).floor() + 0.5)
    }

    pub fn min(self, other: Self) -> Self {
        if other.jd < self.jd { other } else { self }
    }

    pub fn max(self, other: Self) -> Self {
        if other.jd > self.jd { other } else { self }
    }
}

impl Add<Days> for Instant {
    type Output = Instant;
    fn add(self, rhs: Days) -> Instant {
        Instant::from_jd(self.jd + rhs.0)
    }
}

impl AddAssign<Days> for Instant {
    fn add_assign(&mut self, rhs: Days) {
        self.jd += rhs.0;
    }
}

impl Sub<Days> for Instant {
    type Output = Instant;
    fn sub(self, rhs: Days) -> Instant {
        Instant::from_jd(self.jd - rhs.0)
    }
}

impl SubAssign<Days> for Instant {
    fn sub_assign(&mut self, rhs: Days) {
        self.jd -= rhs.0;
    }
}

impl Sub for Instant {
    type Output = Days;
    fn sub(self, rhs: Instant) -> Days {
        Days(self.jd - rhs.jd)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_utc_rounded())
    }
}

impl From<NaiveDate> for Instant {
    fn from(d: NaiveDate) -> Self {
        Self::from_date(d)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.to_utc_rounded())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse::<UtcTime>()
            .map(|u| u.to_instant())
            .map_err(serde::de::Error::custom)
    }
}
