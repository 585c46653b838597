//! UTC calendar breakdown of an [`Instant`].
//!
//! `UtcTime` is the human-facing side of an instant: validated calendar
//! fields, text parsing and the `YYYY-MM-DDThh:mm:ssZ` rendering used in
//! digest output.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::TimeError;
use crate::instant::Instant;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    /// Build a validated calendar time.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(TimeError::InvalidDate { year, month, day });
        }
        if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
            return Err(TimeError::InvalidTimeOfDay {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight (00:00:00) of a calendar date.
    pub fn midnight(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Continuous instant for this calendar time.
    pub fn to_instant(&self) -> Instant {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / SECONDS_PER_DAY;
        Instant::from_jd(calendar_to_jd(self.year, self.month, day_frac))
    }

    /// Exact calendar breakdown of an instant (fractional seconds kept).
    pub fn from_instant(t: Instant) -> Self {
        let (day_start, secs) = split_day(t.jd());
        let (year, month, day) = civil_date(day_start);
        let secs = secs.clamp(0.0, SECONDS_PER_DAY - 1e-6);
        let hour = (secs / 3600.0).floor() as u32;
        let minute = ((secs - hour as f64 * 3600.0) / 60.0).floor().min(59.0) as u32;
        let second = (secs - hour as f64 * 3600.0 - minute as f64 * 60.0).clamp(0.0, 59.999_999);
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Calendar breakdown rounded to the nearest whole second.
    ///
    /// Rounding is done on the total seconds of the day, so 59.5 s and
    /// above carry into the minute, hour, day, month and year. The second
    /// field is always in `0..=59`.
    pub fn from_instant_rounded(t: Instant) -> Self {
        let (mut day_start, secs) = split_day(t.jd());
        let mut total = secs.round() as i64;
        if total >= SECONDS_PER_DAY as i64 {
            day_start += 1.0;
            total -= SECONDS_PER_DAY as i64;
        }
        let total = total.max(0);
        let (year, month, day) = civil_date(day_start);
        Self {
            year,
            month,
            day,
            hour: (total / 3600) as u32,
            minute: ((total % 3600) / 60) as u32,
            second: (total % 60) as f64,
        }
    }

    /// The date part as a `chrono` date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// JD of the preceding 00:00 UTC and seconds elapsed since then.
fn split_day(jd: f64) -> (f64, f64) {
    let day_start = (jd - 0.5).floor() + 0.5;
    (day_start, (jd - day_start) * SECONDS_PER_DAY)
}

/// Integer calendar date of a JD that falls on 00:00 UTC.
fn civil_date(day_start_jd: f64) -> (i32, u32, u32) {
    // Half a second of slack keeps float noise from landing on the previous day.
    let (y, m, d) = jd_to_calendar(day_start_jd + 0.5 / SECONDS_PER_DAY);
    (y, m, d.floor() as u32)
}

impl std::fmt::Display for UtcTime {
    /// Digest form `YYYY-MM-DDThh:mm:ssZ`; fractional seconds are rounded
    /// with carry, never printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = if self.second.fract() == 0.0 {
            *self
        } else {
            Self::from_instant_rounded(self.to_instant())
        };
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            r.year, r.month, r.day, r.hour, r.minute, r.second as u32
        )
    }
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Accepts `YYYY-MM-DD` (midnight) or `YYYY-MM-DDThh:mm:ss[.fff][Z]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('T') {
            let body = s.strip_suffix('Z').unwrap_or(s);
            let dt = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f")?;
            let second = dt.second() as f64 + dt.nanosecond() as f64 * 1e-9;
            Self::new(
                dt.year(),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                second,
            )
        } else {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
            Self::midnight(d.year(), d.month(), d.day())
        }
    }
}
