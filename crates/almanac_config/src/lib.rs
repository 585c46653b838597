//! Digest configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! standard configuration:
//!
//! ```toml
//! bodies = ["moon", "mercury", "venus", "mars", "jupiter", "saturn", "uranus", "neptune", "pluto"]
//!
//! [horizon]
//! refraction_arcmin = 34.0
//! altitude_correction = true
//!
//! [separation]
//! max_separation_deg = 4.0
//! step_hours = 1.0
//!
//! [visibility]
//! min_altitude_deg = 10.0
//! min_elongation_deg = 15.0
//!
//! [search]
//! rise_set_step_minutes = 5.0
//! apsis_step_days = 0.5
//! elongation_step_days = 0.5
//! max_iterations = 60
//!
//! [elongation]
//! min_magnitude_deg = 5.0
//! ```

pub mod error;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use almanac_core::Body;
use almanac_search::{
    ElongationConfig, RiseSetConfig, ScanConfig, SeparationConfig, VisibilityCriteria,
};
use almanac_time::Days;

pub use error::ConfigError;

/// Top-level digest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigestConfig {
    /// Bodies besides the Sun covered by the digest.
    #[serde(default = "default_bodies")]
    pub bodies: Vec<Body>,
    #[serde(default)]
    pub horizon: HorizonSettings,
    #[serde(default)]
    pub separation: SeparationSettings,
    #[serde(default)]
    pub visibility: VisibilitySettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub elongation: ElongationSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HorizonSettings {
    #[serde(default = "default_refraction_arcmin")]
    pub refraction_arcmin: f64,
    #[serde(default = "default_true")]
    pub altitude_correction: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeparationSettings {
    #[serde(default = "default_max_separation_deg")]
    pub max_separation_deg: f64,
    #[serde(default = "default_separation_step_hours")]
    pub step_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisibilitySettings {
    #[serde(default = "default_min_altitude_deg")]
    pub min_altitude_deg: f64,
    #[serde(default = "default_min_elongation_deg")]
    pub min_elongation_deg: f64,
}

/// Coarse step sizes of the kernel searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSettings {
    #[serde(default = "default_rise_set_step_minutes")]
    pub rise_set_step_minutes: f64,
    #[serde(default = "default_apsis_step_days")]
    pub apsis_step_days: f64,
    #[serde(default = "default_elongation_step_days")]
    pub elongation_step_days: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElongationSettings {
    #[serde(default = "default_min_magnitude_deg")]
    pub min_magnitude_deg: f64,
}

fn default_bodies() -> Vec<Body> {
    let mut bodies = vec![Body::Moon];
    bodies.extend(Body::PLANETS);
    bodies
}

fn default_true() -> bool {
    true
}

fn default_refraction_arcmin() -> f64 {
    34.0
}

fn default_max_separation_deg() -> f64 {
    4.0
}

fn default_separation_step_hours() -> f64 {
    1.0
}

fn default_min_altitude_deg() -> f64 {
    10.0
}

fn default_min_elongation_deg() -> f64 {
    15.0
}

fn default_rise_set_step_minutes() -> f64 {
    5.0
}

fn default_apsis_step_days() -> f64 {
    0.5
}

fn default_elongation_step_days() -> f64 {
    0.5
}

fn default_max_iterations() -> u32 {
    60
}

fn default_min_magnitude_deg() -> f64 {
    5.0
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            bodies: default_bodies(),
            horizon: HorizonSettings::default(),
            separation: SeparationSettings::default(),
            visibility: VisibilitySettings::default(),
            search: SearchSettings::default(),
            elongation: ElongationSettings::default(),
        }
    }
}

impl Default for HorizonSettings {
    fn default() -> Self {
        Self {
            refraction_arcmin: default_refraction_arcmin(),
            altitude_correction: true,
        }
    }
}

impl Default for SeparationSettings {
    fn default() -> Self {
        Self {
            max_separation_deg: default_max_separation_deg(),
            step_hours: default_separation_step_hours(),
        }
    }
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            min_altitude_deg: default_min_altitude_deg(),
            min_elongation_deg: default_min_elongation_deg(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            rise_set_step_minutes: default_rise_set_step_minutes(),
            apsis_step_days: default_apsis_step_days(),
            elongation_step_days: default_elongation_step_days(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Default for ElongationSettings {
    fn default() -> Self {
        Self {
            min_magnitude_deg: default_min_magnitude_deg(),
        }
    }
}

impl DigestConfig {
    /// Read, parse and validate a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), bodies = config.bodies.len(), "config loaded");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.contains(&Body::Sun) {
            return Err(ConfigError::Invalid("bodies must not list the sun"));
        }
        for (i, body) in self.bodies.iter().enumerate() {
            if self.bodies[..i].contains(body) {
                return Err(ConfigError::Invalid("bodies must not repeat"));
            }
        }
        let s = &self.search;
        for step in [s.rise_set_step_minutes, s.apsis_step_days, s.elongation_step_days] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::Invalid("search steps must be positive"));
            }
        }
        if !self.separation.step_hours.is_finite() || self.separation.step_hours <= 0.0 {
            return Err(ConfigError::Invalid("separation.step_hours must be positive"));
        }
        self.rise_set_config().validate().map_err(ConfigError::Invalid)?;
        self.separation_config().validate().map_err(ConfigError::Invalid)?;
        self.visibility_criteria().validate().map_err(ConfigError::Invalid)?;
        self.elongation_config().validate().map_err(ConfigError::Invalid)?;
        self.apsis_scan().validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    pub fn rise_set_config(&self) -> RiseSetConfig {
        RiseSetConfig {
            refraction_arcmin: self.horizon.refraction_arcmin,
            altitude_correction: self.horizon.altitude_correction,
            scan: self.rise_set_scan(),
        }
    }

    /// Scan used for horizon and twilight crossings.
    pub fn rise_set_scan(&self) -> ScanConfig {
        ScanConfig {
            step: Days::from_minutes(self.search.rise_set_step_minutes),
            max_iterations: self.search.max_iterations,
            ..ScanConfig::rise_set()
        }
    }

    pub fn separation_config(&self) -> SeparationConfig {
        SeparationConfig {
            max_separation_deg: self.separation.max_separation_deg,
            scan: ScanConfig {
                step: Days::from_hours(self.separation.step_hours),
                max_iterations: self.search.max_iterations,
                ..ScanConfig::separation()
            },
        }
    }

    pub fn visibility_criteria(&self) -> VisibilityCriteria {
        VisibilityCriteria {
            min_altitude_deg: self.visibility.min_altitude_deg,
            min_elongation_deg: self.visibility.min_elongation_deg,
        }
    }

    pub fn apsis_scan(&self) -> ScanConfig {
        ScanConfig {
            step: Days(self.search.apsis_step_days),
            max_iterations: self.search.max_iterations,
            ..ScanConfig::apsis()
        }
    }

    pub fn elongation_config(&self) -> ElongationConfig {
        ElongationConfig {
            min_magnitude_deg: self.elongation.min_magnitude_deg,
            scan: ScanConfig {
                step: Days(self.search.elongation_step_days),
                max_iterations: self.search.max_iterations,
                ..ScanConfig::elongation()
            },
            ..ElongationConfig::default()
        }
    }

    pub fn lunar_phase_scan(&self) -> ScanConfig {
        ScanConfig {
            max_iterations: self.search.max_iterations,
            ..ScanConfig::lunar_phase()
        }
    }

    pub fn seasonal_scan(&self) -> ScanConfig {
        ScanConfig {
            max_iterations: self.search.max_iterations,
            ..ScanConfig::seasonal()
        }
    }
}
