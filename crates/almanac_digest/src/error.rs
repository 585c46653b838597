use std::error::Error;
use std::fmt::{Display, Formatter};

use almanac_config::ConfigError;
use almanac_core::ObserverError;
use almanac_search::SearchError;

/// Errors that abort a whole digest.
///
/// Ephemeris failures inside one sub-computation do not end up here; they
/// are recorded in [`DailyDigest::failures`](crate::DailyDigest::failures).
#[derive(Debug)]
#[non_exhaustive]
pub enum DigestError {
    InvalidRequest(ObserverError),
    Config(ConfigError),
    Search(SearchError),
}

impl Display for DigestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(e) => write!(f, "invalid request: {e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Search(e) => write!(f, "search failed: {e}"),
        }
    }
}

impl Error for DigestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRequest(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}

impl From<ObserverError> for DigestError {
    fn from(e: ObserverError) -> Self {
        Self::InvalidRequest(e)
    }
}

impl From<ConfigError> for DigestError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SearchError> for DigestError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}
