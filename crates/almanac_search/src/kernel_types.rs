//! Types for the numeric search kernel.

use almanac_time::{Days, Instant};

/// Which sign change of `f − threshold` counts as a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossingDirection {
    /// From below the threshold to at-or-above it.
    Rising,
    /// From at-or-above the threshold to below it.
    Falling,
    Either,
}

/// What the kernel looks for in a sampled function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    /// `f` passes through `threshold`.
    Crossing {
        threshold: f64,
        direction: CrossingDirection,
    },
    /// An angle in degrees passes through `target_deg`. Wrap-aware: a jump
    /// across ±180° of the difference is not a crossing.
    AngleCrossing { target_deg: f64 },
    Minimum,
    Maximum,
}

impl SearchMode {
    /// Rising crossing of a threshold.
    pub fn rising(threshold: f64) -> Self {
        Self::Crossing {
            threshold,
            direction: CrossingDirection::Rising,
        }
    }

    /// Falling crossing of a threshold.
    pub fn falling(threshold: f64) -> Self {
        Self::Crossing {
            threshold,
            direction: CrossingDirection::Falling,
        }
    }

    pub fn is_extremum(self) -> bool {
        matches!(self, Self::Minimum | Self::Maximum)
    }
}

/// Direction of a bounded search from a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// A located crossing or extremum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Found {
    pub instant: Instant,
    /// Value of the sampled function at `instant`.
    pub value: f64,
}

/// Sampling and refinement parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Coarse sampling interval. Must be short enough that no event of
    /// interest hides between two samples.
    pub step: Days,
    /// Upper bound on refinement iterations.
    pub max_iterations: u32,
    /// Refinement stops once the bracket is narrower than this.
    pub convergence: Days,
    /// How far `find_next` / `find_previous` look before giving up.
    pub max_lookahead: Days,
}

impl ScanConfig {
    /// Horizon crossings and culminations: 5-minute samples, 0.1 s precision.
    pub fn rise_set() -> Self {
        Self {
            step: Days::from_minutes(5.0),
            max_iterations: 60,
            convergence: Days::from_seconds(0.1),
            max_lookahead: Days(2.0),
        }
    }

    /// Close approaches between two bodies: hourly samples, 1 s precision.
    pub fn separation() -> Self {
        Self {
            step: Days::from_hours(1.0),
            max_iterations: 60,
            convergence: Days::from_seconds(1.0),
            max_lookahead: Days(30.0),
        }
    }

    /// Lunar perigee/apogee: half-day samples, 30 s precision.
    pub fn apsis() -> Self {
        Self {
            step: Days(0.5),
            max_iterations: 60,
            convergence: Days::from_seconds(30.0),
            max_lookahead: Days(35.0),
        }
    }

    /// Planet–Sun configurations: half-day samples, 1 min precision.
    pub fn elongation() -> Self {
        Self {
            step: Days(0.5),
            max_iterations: 60,
            convergence: Days::from_seconds(60.0),
            max_lookahead: Days(600.0),
        }
    }

    /// Solar longitude crossings: quarter-day samples, 1 s precision.
    pub fn seasonal() -> Self {
        Self {
            step: Days(0.25),
            max_iterations: 60,
            convergence: Days::from_seconds(1.0),
            max_lookahead: Days(100.0),
        }
    }

    /// Moon–Sun elongation crossings: half-day samples, 1 s precision.
    pub fn lunar_phase() -> Self {
        Self {
            step: Days(0.5),
            max_iterations: 60,
            convergence: Days::from_seconds(1.0),
            max_lookahead: Days(35.0),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.step.is_finite() || self.step.as_days() <= 0.0 {
            return Err("step must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence.is_finite() || self.convergence.as_days() <= 0.0 {
            return Err("convergence must be positive");
        }
        if !self.max_lookahead.is_finite() || self.max_lookahead.as_days() <= 0.0 {
            return Err("max_lookahead must be positive");
        }
        Ok(())
    }
}
