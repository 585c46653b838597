//! Time handling for the almanac engine.
//!
//! - [`Instant`]: continuous UTC time stored as a Julian Date
//! - [`Days`]: signed time deltas
//! - [`UtcTime`]: validated calendar breakdown, parsing and rounding
//! - sidereal time for horizon conversions

pub mod error;
pub mod instant;
pub mod julian;
pub mod sidereal;
pub mod utc_time;

pub use error::TimeError;
pub use instant::{Days, Instant};
pub use julian::{J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};
pub use sidereal::{gmst_deg, hour_angle_deg, local_sidereal_time_deg};
pub use utc_time::UtcTime;
