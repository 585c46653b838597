//! Annual meteor showers.
//!
//! Activity windows are fixed month/day ranges repeated every year; the
//! Quadrantids window wraps over the new year.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Year-independent calendar day. Orders by month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.month(), date.day())
    }

    /// This month/day in `year`, if it exists.
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

/// A meteor shower with its activity window and peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeteorShower {
    pub name: &'static str,
    pub start: MonthDay,
    pub peak: MonthDay,
    pub end: MonthDay,
}

impl MeteorShower {
    /// Whether the activity window runs over 31 Dec.
    pub fn wraps_year(&self) -> bool {
        self.start > self.end
    }
}

pub const METEOR_SHOWERS: [MeteorShower; 9] = [
    MeteorShower {
        name: "Quadrantids",
        start: MonthDay::new(12, 28),
        peak: MonthDay::new(1, 3),
        end: MonthDay::new(1, 12),
    },
    MeteorShower {
        name: "Lyrids",
        start: MonthDay::new(4, 14),
        peak: MonthDay::new(4, 22),
        end: MonthDay::new(4, 30),
    },
    MeteorShower {
        name: "Eta Aquariids",
        start: MonthDay::new(4, 19),
        peak: MonthDay::new(5, 6),
        end: MonthDay::new(5, 28),
    },
    MeteorShower {
        name: "Perseids",
        start: MonthDay::new(7, 17),
        peak: MonthDay::new(8, 13),
        end: MonthDay::new(8, 24),
    },
    MeteorShower {
        name: "Draconids",
        start: MonthDay::new(10, 6),
        peak: MonthDay::new(10, 8),
        end: MonthDay::new(10, 10),
    },
    MeteorShower {
        name: "Orionids",
        start: MonthDay::new(10, 2),
        peak: MonthDay::new(10, 21),
        end: MonthDay::new(11, 7),
    },
    MeteorShower {
        name: "Leonids",
        start: MonthDay::new(11, 6),
        peak: MonthDay::new(11, 18),
        end: MonthDay::new(11, 30),
    },
    MeteorShower {
        name: "Geminids",
        start: MonthDay::new(12, 4),
        peak: MonthDay::new(12, 14),
        end: MonthDay::new(12, 20),
    },
    MeteorShower {
        name: "Ursids",
        start: MonthDay::new(12, 17),
        peak: MonthDay::new(12, 22),
        end: MonthDay::new(12, 26),
    },
];

/// Where a date falls relative to the nearest peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "position", rename_all = "snake_case")]
pub enum PeakPosition {
    BeforePeak { days: i64 },
    AtPeak,
    AfterPeak { days: i64 },
}

/// A shower active on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveShower {
    pub shower: MeteorShower,
    pub peak: PeakPosition,
}

/// Whether `date` lies inside the shower's activity window, inclusive.
pub fn is_active(shower: &MeteorShower, date: NaiveDate) -> bool {
    let md = MonthDay::of(date);
    if shower.wraps_year() {
        md >= shower.start || md <= shower.end
    } else {
        shower.start <= md && md <= shower.end
    }
}

/// Position of `date` relative to the nearest peak (previous, same or next
/// year).
pub fn peak_position(shower: &MeteorShower, date: NaiveDate) -> PeakPosition {
    let days = [date.year() - 1, date.year(), date.year() + 1]
        .into_iter()
        .filter_map(|y| shower.peak.in_year(y))
        .map(|peak| (peak - date).num_days())
        .min_by_key(|d| d.abs())
        .unwrap_or(0);
    match days {
        0 => PeakPosition::AtPeak,
        d if d > 0 => PeakPosition::BeforePeak { days: d },
        d => PeakPosition::AfterPeak { days: -d },
    }
}

/// Every shower active on `date`, in table order.
pub fn active_showers(date: NaiveDate) -> Vec<ActiveShower> {
    METEOR_SHOWERS
        .iter()
        .filter(|s| is_active(s, date))
        .map(|s| ActiveShower {
            shower: *s,
            peak: peak_position(s, date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn names(date: NaiveDate) -> Vec<&'static str> {
        active_showers(date).iter().map(|a| a.shower.name).collect()
    }

    #[test]
    fn quadrantids_wrap_the_year() {
        let q = &METEOR_SHOWERS[0];
        assert!(q.wraps_year());
        assert!(is_active(q, d(2017, 12, 28)));
        assert!(is_active(q, d(2018, 1, 12)));
        assert!(is_active(q, d(2017, 12, 31)));
        assert!(!is_active(q, d(2018, 1, 13)));
        assert!(!is_active(q, d(2017, 12, 27)));
    }

    #[test]
    fn window_edges_inclusive() {
        let perseids = METEOR_SHOWERS.iter().find(|s| s.name == "Perseids").unwrap();
        assert!(is_active(perseids, d(2017, 7, 17)));
        assert!(is_active(perseids, d(2017, 8, 24)));
        assert!(!is_active(perseids, d(2017, 8, 25)));
    }

    #[test]
    fn overlapping_showers_are_all_reported() {
        assert_eq!(names(d(2017, 10, 8)), ["Draconids", "Orionids"]);
        assert_eq!(names(d(2017, 12, 18)), ["Geminids", "Ursids"]);
        assert_eq!(names(d(2017, 4, 25)), ["Lyrids", "Eta Aquariids"]);
        assert!(names(d(2017, 6, 15)).is_empty());
    }

    #[test]
    fn peak_positions() {
        let q = &METEOR_SHOWERS[0];
        assert_eq!(peak_position(q, d(2017, 12, 30)), PeakPosition::BeforePeak { days: 4 });
        assert_eq!(peak_position(q, d(2018, 1, 3)), PeakPosition::AtPeak);
        assert_eq!(peak_position(q, d(2018, 1, 10)), PeakPosition::AfterPeak { days: 7 });
    }

    #[test]
    fn peak_positions_within_one_year() {
        let perseids = METEOR_SHOWERS.iter().find(|s| s.name == "Perseids").unwrap();
        assert_eq!(peak_position(perseids, d(2017, 8, 10)), PeakPosition::BeforePeak { days: 3 });
        assert_eq!(peak_position(perseids, d(2017, 8, 20)), PeakPosition::AfterPeak { days: 7 });
        let geminids = METEOR_SHOWERS.iter().find(|s| s.name == "Geminids").unwrap();
        assert_eq!(peak_position(geminids, d(2017, 12, 4)), PeakPosition::BeforePeak { days: 10 });
    }

    #[test]
    fn active_on_peak_day() {
        let all = active_showers(d(2017, 8, 13));
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].peak, PeakPosition::AtPeak);
    }
}
