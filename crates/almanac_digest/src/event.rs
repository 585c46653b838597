//! The digest's output record.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use almanac_core::Body;
use almanac_time::Instant;

/// Event type tag, serialised lowercase as `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Rise,
    Set,
    Transit,
    Twilight,
    Conjunction,
    Opposition,
    Elongation,
    Apogee,
    Perigee,
    Phase,
    Visibility,
    Shower,
    Solstice,
    Equinox,
}

impl EventKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rise => "rise",
            Self::Set => "set",
            Self::Transit => "transit",
            Self::Twilight => "twilight",
            Self::Conjunction => "conjunction",
            Self::Opposition => "opposition",
            Self::Elongation => "elongation",
            Self::Apogee => "apogee",
            Self::Perigee => "perigee",
            Self::Phase => "phase",
            Self::Visibility => "visibility",
            Self::Shower => "shower",
            Self::Solstice => "solstice",
            Self::Equinox => "equinox",
        }
    }
}

/// Value of one entry in an event's `flags` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for FlagValue {
    fn from(v: f64) -> Self {
        Self::Number(round2(v))
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// One digest entry.
///
/// Serialises to `{type, bodies, instants, value?, flags?}`. Numeric values
/// are rounded to two decimals on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    #[serde(rename = "type")]
    kind: EventKind,
    bodies: Vec<Body>,
    instants: Vec<Instant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    flags: BTreeMap<&'static str, FlagValue>,
}

impl Event {
    pub(crate) fn new(kind: EventKind, bodies: &[Body], instants: &[Instant]) -> Self {
        Self {
            kind,
            bodies: bodies.to_vec(),
            instants: instants.to_vec(),
            value: None,
            flags: BTreeMap::new(),
        }
    }

    pub(crate) fn with_value(mut self, value: f64) -> Self {
        self.value = Some(round2(value));
        self
    }

    pub(crate) fn with_flag(mut self, key: &'static str, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(key, value.into());
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn instants(&self) -> &[Instant] {
        &self.instants
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    pub fn flags(&self) -> &BTreeMap<&'static str, FlagValue> {
        &self.flags
    }

    /// Digest order: first instant, then kind, then bodies.
    pub fn digest_order(&self, other: &Self) -> Ordering {
        let first = |e: &Self| e.instants.first().map(|t| t.jd());
        let by_time = match (first(self), first(other)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (a, b) => a.is_some().cmp(&b.is_some()),
        };
        by_time
            .then(self.kind.cmp(&other.kind))
            .then_with(|| self.bodies.cmp(&other.bodies))
    }
}

/// Round to two decimals.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(jd: f64) -> Instant {
        Instant::from_jd(jd)
    }

    #[test]
    fn rounds_value_and_flags() {
        let e = Event::new(EventKind::Conjunction, &[Body::Venus, Body::Mars], &[t(2.0)])
            .with_value(0.20549)
            .with_flag("elongation", 12.3456);
        assert_eq!(e.value(), Some(0.21));
        assert_eq!(e.flag("elongation"), Some(&FlagValue::Number(12.35)));
    }

    #[test]
    fn serialises_flat_record() {
        let e = Event::new(EventKind::Rise, &[Body::Sun], &[t(2_458_031.5)]);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "rise");
        assert_eq!(json["bodies"][0], "sun");
        assert_eq!(json["instants"][0], "2017-10-05T00:00:00Z");
        assert!(json.get("value").is_none());
        assert!(json.get("flags").is_none());

        let shower = Event::new(EventKind::Shower, &[], &[t(2_458_031.5)])
            .with_flag("name", "Orionids")
            .with_flag("at_peak", false);
        let json = serde_json::to_value(&shower).unwrap();
        assert_eq!(json["flags"]["name"], "Orionids");
        assert_eq!(json["flags"]["at_peak"], false);
    }

    #[test]
    fn digest_order_breaks_ties_by_kind_then_bodies() {
        let a = Event::new(EventKind::Rise, &[Body::Moon], &[t(1.0)]);
        let b = Event::new(EventKind::Rise, &[Body::Sun], &[t(1.0)]);
        let c = Event::new(EventKind::Set, &[Body::Sun], &[t(1.0)]);
        let d = Event::new(EventKind::Rise, &[Body::Sun], &[t(0.5)]);
        let mut v = vec![c.clone(), a.clone(), d.clone(), b.clone()];
        v.sort_by(Event::digest_order);
        // Body order: Sun before Moon.
        assert_eq!(v, [d, b, a, c]);
    }

    #[test]
    fn round2_half_away() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-0.125_1), -0.13);
        assert_eq!(round2(4.0), 4.0);
    }
}
