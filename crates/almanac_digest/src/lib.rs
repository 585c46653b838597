//! Daily astronomy digest.
//!
//! [`compute_digest`] runs every finder of `almanac_search` for one UTC day
//! and one observer, and flattens the results into a sorted list of
//! [`Event`] records ready for serialisation.

pub mod aggregator;
pub mod error;
pub mod event;

pub use aggregator::{DailyDigest, DigestRequest, Failure, compute_digest};
pub use error::DigestError;
pub use event::{Event, EventKind, FlagValue, round2};
