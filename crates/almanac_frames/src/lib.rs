//! Frame conversion helpers.
//!
//! Coordinate system conversions (Cartesian ↔ spherical), the ecliptic →
//! equatorial → horizontal rotation chain, general precession and the angle
//! arithmetic shared by the search layer.

pub mod angle;
pub mod nutation;
pub mod precession;
pub mod rotation;
pub mod spherical;

pub use angle::{angular_separation_deg, normalize_360, normalize_to_pm180};
pub use nutation::nutation_arcsec;
pub use precession::{
    general_precession_longitude_arcsec, general_precession_longitude_deg, precess_longitude_deg,
};
pub use rotation::{
    Equatorial, Horizontal, ecliptic_to_equatorial, equatorial_to_horizontal, mean_obliquity_deg,
};
pub use spherical::{SphericalCoords, cartesian_to_spherical, spherical_to_cartesian};
