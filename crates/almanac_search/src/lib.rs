//! Astronomical event search: a generic root/extremum kernel and the event
//! finders built on it.
//!
//! This crate provides:
//! - Coarse-scan plus refinement kernel over any sampled function of time
//! - Rise, set, culmination and twilight times
//! - Close approaches between body pairs
//! - Lunar perigee/apogee and principal phases
//! - Greatest elongations, solar conjunctions and oppositions
//! - Twilight visibility, meteor showers, equinoxes and solstices
//!
//! Every finder takes an [`almanac_core::Ephemeris`], so the searches run
//! unchanged against the analytic theory or a test double.

pub mod apsis;
pub mod elongation;
pub mod elongation_types;
pub mod error;
pub mod kernel;
pub mod kernel_types;
pub mod lunar_phase;
pub mod lunar_phase_types;
pub mod meteor_shower;
pub mod season;
pub mod separation;
pub mod transit;
pub mod transit_types;
pub mod visibility;

use chrono::NaiveDate;

use almanac_time::{Days, Instant};

pub use apsis::{ApsisEvent, ApsisKind, apsis_on, next_apogee, next_perigee, search_apsides};
pub use elongation::{
    greatest_elongation_on, is_true_greatest_elongation, opposition_on, search_greatest_elongations,
    search_oppositions, search_solar_conjunctions, signed_elongation, solar_conjunction_on,
};
pub use elongation_types::{
    ConjunctionKind, ElongationConfig, ElongationSide, GreatestElongation, Opposition,
    SolarConjunction,
};
pub use error::SearchError;
pub use kernel::{
    SampledFunction, find_adjacent, find_all, find_first, find_last, find_next, find_previous,
};
pub use kernel_types::{CrossingDirection, Found, ScanConfig, SearchDirection, SearchMode};
pub use lunar_phase::{
    crossed_major_phase, illuminated_fraction, major_phase_on, moon_phase_at, next_major_phase,
    phase_angle_deg,
};
pub use lunar_phase_types::{MajorPhase, MajorPhaseEvent, MoonPhase, PhaseName};
pub use meteor_shower::{
    ActiveShower, METEOR_SHOWERS, MeteorShower, MonthDay, PeakPosition, active_showers, is_active,
    peak_position,
};
pub use season::{Season, SeasonEvent, classify_season, next_season, season_on};
pub use separation::{
    CloseApproach, SeparationConfig, angular_separation, close_approach_on,
    search_close_approaches,
};
pub use transit::{
    MAX_DAY_EVENTS, altitude_fn, approximate_local_noon, next_meridian_transit, next_rise,
    next_set, prev_rise, prev_set, sun_twilight, transits_on,
};
pub use transit_types::{
    DayTransits, HorizonStatus, RiseSetConfig, RiseSetResult, TransitKind, TransitTime,
    TwilightEvent,
};
pub use visibility::{
    MAX_SUN_ALTITUDE_DEG, NightlyVisibility, ViewingWindow, Visibility, VisibilityCriteria,
    evaluate_visibility, nightly_visibility, solar_elongation, twilight_references,
};

/// Half-open UTC day `[00:00, 24:00)` of `date`.
pub fn utc_day(date: NaiveDate) -> (Instant, Instant) {
    let start = Instant::from_date(date);
    (start, start + Days(1.0))
}
