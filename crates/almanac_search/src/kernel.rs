//! Numeric search kernel: coarse scan + refinement.
//!
//! Every finder in this crate reduces its question to a scalar function of
//! time and hands it to the kernel. The function is sampled at a fixed step;
//! a sign change of `f − threshold` brackets a crossing, refined by
//! bisection, and a sign change of the first difference brackets an
//! extremum, refined by golden-section search. Refinement stops when the
//! bracket is narrower than `convergence` or after `max_iterations`.
//!
//! Sampled functions are plain closures `Fn(Instant) -> Result<f64, E>`;
//! errors from the function abort the search and propagate unchanged.

use almanac_frames::normalize_to_pm180;
use almanac_time::{Days, Instant};
use tracing::trace;

use crate::error::SearchError;
use crate::kernel_types::{CrossingDirection, Found, ScanConfig, SearchDirection, SearchMode};

/// Golden-ratio conjugate, (√5 − 1) / 2.
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// A pure function of time sampled by the kernel.
pub trait SampledFunction {
    type Error;
    fn sample(&self, t: Instant) -> Result<f64, Self::Error>;
}

impl<F, E> SampledFunction for F
where
    F: Fn(Instant) -> Result<f64, E>,
{
    type Error = E;

    fn sample(&self, t: Instant) -> Result<f64, E> {
        self(t)
    }
}

/// Check if a sign change is a genuine zero crossing vs a wrap-around jump.
///
/// A normalized angle that jumps from ~+180 to ~-180 changes sign without
/// passing through zero.
fn is_genuine_crossing(g_a: f64, g_b: f64) -> bool {
    (g_a - g_b).abs() < 270.0
}

/// Side of zero a transformed sample lies on.
fn below(g: f64) -> bool {
    g < 0.0
}

struct Kernel<'a, F> {
    f: &'a F,
    mode: SearchMode,
    cfg: &'a ScanConfig,
}

impl<F> Kernel<'_, F>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    /// Raw sample.
    fn raw(&self, t: Instant) -> Result<f64, F::Error> {
        self.f.sample(t)
    }

    /// Sample transformed so that crossings are zeros of the result.
    fn shifted(&self, t: Instant) -> Result<f64, F::Error> {
        let v = self.raw(t)?;
        Ok(match self.mode {
            SearchMode::Crossing { threshold, .. } => v - threshold,
            SearchMode::AngleCrossing { target_deg } => normalize_to_pm180(v - target_deg),
            SearchMode::Minimum | SearchMode::Maximum => v,
        })
    }

    /// Whether the chronologically ordered pair `(g_a, g_b)` brackets a crossing.
    fn brackets_crossing(&self, g_a: f64, g_b: f64) -> bool {
        let rising = below(g_a) && !below(g_b);
        let falling = !below(g_a) && below(g_b);
        match self.mode {
            SearchMode::Crossing { direction, .. } => match direction {
                CrossingDirection::Rising => rising,
                CrossingDirection::Falling => falling,
                CrossingDirection::Either => rising || falling,
            },
            SearchMode::AngleCrossing { .. } => (rising || falling) && is_genuine_crossing(g_a, g_b),
            SearchMode::Minimum | SearchMode::Maximum => false,
        }
    }

    /// Whether the chronologically ordered triple has its extremum at the middle.
    fn brackets_extremum(&self, g0: f64, g1: f64, g2: f64) -> bool {
        let (d1, d2) = (g1 - g0, g2 - g1);
        match self.mode {
            SearchMode::Minimum => d1 < 0.0 && d2 >= 0.0,
            SearchMode::Maximum => d1 > 0.0 && d2 <= 0.0,
            _ => false,
        }
    }

    /// Bisection between chronologically ordered `t_a < t_b`.
    fn bisect(&self, mut t_a: Instant, g_a: f64, mut t_b: Instant) -> Result<Found, F::Error> {
        let side_a = below(g_a);
        for _ in 0..self.cfg.max_iterations {
            if t_b - t_a < self.cfg.convergence {
                break;
            }
            let t_mid = t_a + (t_b - t_a) * 0.5;
            if below(self.shifted(t_mid)?) == side_a {
                t_a = t_mid;
            } else {
                t_b = t_mid;
            }
        }
        let instant = t_a + (t_b - t_a) * 0.5;
        Ok(Found {
            instant,
            value: self.raw(instant)?,
        })
    }

    /// Golden-section search for the extremum inside `[a, b]`.
    fn golden(&self, a: Instant, b: Instant) -> Result<Found, F::Error> {
        let sign = if self.mode == SearchMode::Maximum { -1.0 } else { 1.0 };
        let cost = |t: Instant| -> Result<f64, F::Error> { Ok(sign * self.raw(t)?) };

        let (mut a, mut b) = (a, b);
        let mut c = b - (b - a) * INV_PHI;
        let mut d = a + (b - a) * INV_PHI;
        let mut fc = cost(c)?;
        let mut fd = cost(d)?;
        for _ in 0..self.cfg.max_iterations {
            if b - a < self.cfg.convergence {
                break;
            }
            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = b - (b - a) * INV_PHI;
                fc = cost(c)?;
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + (b - a) * INV_PHI;
                fd = cost(d)?;
            }
        }
        let instant = a + (b - a) * 0.5;
        Ok(Found {
            instant,
            value: self.raw(instant)?,
        })
    }

    /// Scan `[start, end]` in `direction`, stopping after `limit` hits.
    fn scan(
        &self,
        start: Instant,
        end: Instant,
        direction: SearchDirection,
        limit: Option<usize>,
    ) -> Result<Vec<Found>, F::Error> {
        let step = self.cfg.step;
        let span = end - start;
        // Tolerance keeps float noise in `span` from adding a near-duplicate
        // final sample.
        let n = (span.as_days() / step.as_days() - 1e-6).ceil().max(1.0) as usize;
        let at = |k: usize| -> Instant {
            let offset = Days((step.as_days() * k as f64).min(span.as_days()));
            match direction {
                SearchDirection::Forward => start + offset,
                SearchDirection::Backward => end - offset,
            }
        };

        let mut found: Vec<Found> = Vec::new();
        // Most recent samples in scan order; index 0 is the newest.
        let mut recent: Vec<(Instant, f64)> = Vec::with_capacity(3);

        for k in 0..=n {
            let t = at(k);
            let g = self.shifted(t)?;
            recent.insert(0, (t, g));
            recent.truncate(3);

            let hit = if self.mode.is_extremum() {
                if recent.len() < 3 {
                    continue;
                }
                let mut triple = [recent[0], recent[1], recent[2]];
                if direction == SearchDirection::Forward {
                    triple.reverse();
                }
                let [(t0, g0), (_, g1), (t2, g2)] = triple;
                if self.brackets_extremum(g0, g1, g2) {
                    Some(self.golden(t0, t2)?)
                } else {
                    None
                }
            } else {
                if recent.len() < 2 {
                    continue;
                }
                let (early, late) = match direction {
                    SearchDirection::Forward => (recent[1], recent[0]),
                    SearchDirection::Backward => (recent[0], recent[1]),
                };
                if self.brackets_crossing(early.1, late.1) {
                    Some(self.bisect(early.0, early.1, late.0)?)
                } else {
                    None
                }
            };

            if let Some(hit) = hit {
                let duplicate = self.mode.is_extremum()
                    && found
                        .last()
                        .is_some_and(|prev| (hit.instant - prev.instant).abs() < step);
                if !duplicate {
                    found.push(hit);
                    if limit.is_some_and(|l| found.len() >= l) {
                        return Ok(found);
                    }
                }
            }
        }

        if found.is_empty() {
            trace!(mode = ?self.mode, %start, %end, "search window exhausted");
        }
        Ok(found)
    }
}

fn kernel<'a, F>(
    f: &'a F,
    start: Instant,
    end: Instant,
    mode: SearchMode,
    cfg: &'a ScanConfig,
) -> Result<Kernel<'a, F>, F::Error>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    cfg.validate().map_err(SearchError::InvalidConfig)?;
    if !(end > start) {
        return Err(SearchError::InvalidConfig("end must be after start").into());
    }
    Ok(Kernel { f, mode, cfg })
}

/// Earliest event in `[start, end]`.
pub fn find_first<F>(
    f: &F,
    start: Instant,
    end: Instant,
    mode: SearchMode,
    cfg: &ScanConfig,
) -> Result<Option<Found>, F::Error>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    let k = kernel(f, start, end, mode, cfg)?;
    Ok(k.scan(start, end, SearchDirection::Forward, Some(1))?.pop())
}

/// Latest event in `[start, end]`.
pub fn find_last<F>(
    f: &F,
    start: Instant,
    end: Instant,
    mode: SearchMode,
    cfg: &ScanConfig,
) -> Result<Option<Found>, F::Error>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    let k = kernel(f, start, end, mode, cfg)?;
    Ok(k.scan(start, end, SearchDirection::Backward, Some(1))?.pop())
}

/// Every event in `[start, end]`, ascending. Extrema closer than one step
/// to the previous one are dropped.
pub fn find_all<F>(
    f: &F,
    start: Instant,
    end: Instant,
    mode: SearchMode,
    cfg: &ScanConfig,
) -> Result<Vec<Found>, F::Error>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    let k = kernel(f, start, end, mode, cfg)?;
    k.scan(start, end, SearchDirection::Forward, None)
}

/// First event after `start`, looking at most `max_lookahead` ahead.
pub fn find_next<F>(
    f: &F,
    start: Instant,
    mode: SearchMode,
    cfg: &ScanConfig,
) -> Result<Option<Found>, F::Error>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    find_first(f, start, start + cfg.max_lookahead, mode, cfg)
}

/// Last event before `before`, looking at most `max_lookahead` back.
pub fn find_previous<F>(
    f: &F,
    before: Instant,
    mode: SearchMode,
    cfg: &ScanConfig,
) -> Result<Option<Found>, F::Error>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    find_last(f, before - cfg.max_lookahead, before, mode, cfg)
}

/// `find_next` or `find_previous` by direction.
pub fn find_adjacent<F>(
    f: &F,
    from: Instant,
    direction: SearchDirection,
    mode: SearchMode,
    cfg: &ScanConfig,
) -> Result<Option<Found>, F::Error>
where
    F: SampledFunction,
    F::Error: From<SearchError>,
{
    match direction {
        SearchDirection::Forward => find_next(f, from, mode, cfg),
        SearchDirection::Backward => find_previous(f, from, mode, cfg),
    }
}
