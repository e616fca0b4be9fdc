//! Three-parameter maximum-likelihood fitting.
//!
//! The location is profiled out: for each candidate location the two
//! remaining parameters have a closed-form or one-dimensional MLE (see
//! `mle`), and Nelder-Mead searches the location through the unconstrained
//! map `loc(t) = min(x) - sd(x) * exp(t)`, which keeps every observation
//! strictly inside the support.

use argmin::core::{CostFunction, Executor, State};
use argmin::solver::neldermead::NelderMead;
use tracing::debug;

use crate::config::{FitConfig, Location};
use crate::error::DistributionError;
use crate::family::Family;
use crate::mle::{self, LocFit};
use crate::params::DistParams;

/// Smallest admissible gap between the location and the sample minimum,
/// relative to the sample standard deviation. Below it the likelihood is
/// dominated by the single smallest observation.
const MIN_RELATIVE_GAP: f64 = 1e-6;

/// Largest admissible gap, relative to the sample standard deviation. Past
/// it the shape degenerates (log-normal tends to a normal with an unbounded
/// location) and the parameters are useless as a stored baseline.
const MAX_RELATIVE_GAP: f64 = 1e3;

/// Fits `family` to `sample` by maximum likelihood.
///
/// Non-finite values (missing observations) and zeros are dropped before
/// fitting; what remains must be strictly positive. With
/// [`Location::Free`] the location is estimated jointly with shape and
/// scale, and the zero-location fit is always kept as a candidate so the
/// result is never worse than the two-parameter fit. With
/// [`Location::Fixed`] only shape and scale are estimated.
///
/// # Errors
///
/// - [`DistributionError::NegativeSupport`] if any finite value is negative.
/// - [`DistributionError::InsufficientData`] if fewer than
///   `config.min_samples()` positive values remain.
/// - [`DistributionError::FitFailed`] if the likelihood has no maximum
///   (e.g. a constant sample).
/// - [`DistributionError::InvalidConfig`] if `config` is invalid.
///
/// # Example
///
/// ```
/// use drought_distribution::{Family, FitConfig, Location, fit};
///
/// let sample = [12.0, 30.5, 7.2, 0.0, 18.9, 25.1, 9.4, 41.0];
/// let config = FitConfig::new().with_location(Location::Fixed(0.0));
/// let params = fit(&sample, Family::Gamma, &config).unwrap();
/// assert_eq!(params.loc, 0.0);
/// ```
#[tracing::instrument(skip(sample, config), fields(n = sample.len()))]
pub fn fit(
    sample: &[f64],
    family: Family,
    config: &FitConfig,
) -> Result<DistParams, DistributionError> {
    config.validate()?;
    let positive = positive_support(sample, config.min_samples())?;

    let best = match config.location() {
        Location::Fixed(loc) => mle::fit_at(family, &positive, loc)?,
        Location::Free => profile_location(family, &positive, config)?,
    };

    debug!(
        shape = best.params.shape,
        loc = best.params.loc,
        scale = best.params.scale,
        log_likelihood = best.log_likelihood,
        n_used = positive.len(),
        "distribution fitted"
    );
    Ok(best.params)
}

/// Drops missing values and zeros; rejects negatives.
fn positive_support(sample: &[f64], min: usize) -> Result<Vec<f64>, DistributionError> {
    if let Some((index, &value)) = sample
        .iter()
        .enumerate()
        .find(|(_, v)| v.is_finite() && **v < 0.0)
    {
        return Err(DistributionError::NegativeSupport { index, value });
    }

    let positive: Vec<f64> = sample
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();

    if positive.len() < min {
        return Err(DistributionError::InsufficientData {
            n: positive.len(),
            min,
        });
    }
    Ok(positive)
}

/// Searches the location by Nelder-Mead over the profile likelihood.
fn profile_location(
    family: Family,
    sample: &[f64],
    config: &FitConfig,
) -> Result<LocFit, DistributionError> {
    let anchored = mle::fit_at(family, sample, 0.0);

    let x_min = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let spread = drought_stats::sd(sample);
    if !(spread.is_finite() && spread > 0.0) {
        return anchored;
    }

    let cost = ProfileCost {
        family,
        sample,
        x_min,
        spread,
    };
    // t0 places the first vertex at loc = 0.
    let t0 = (x_min / spread).ln();
    let free = NelderMead::new(vec![vec![t0], vec![t0 + 0.5]])
        .with_sd_tolerance(config.sd_tolerance())
        .ok()
        .and_then(|solver| {
            Executor::new(cost, solver)
                .configure(|state| state.max_iters(config.max_iters()))
                .run()
                .ok()
        })
        .and_then(|result| {
            let state = result.state();
            debug!(
                iters = state.get_iter(),
                termination = ?state.get_termination_reason(),
                "location search finished"
            );
            state.best_param.as_ref().and_then(|t| cost.candidate(t[0]))
        });

    match (anchored, free) {
        (Ok(a), Some(f)) if f.log_likelihood > a.log_likelihood => Ok(f),
        (Ok(a), _) => Ok(a),
        (Err(_), Some(f)) => Ok(f),
        (Err(e), None) => Err(e),
    }
}

/// Negative profile log-likelihood as a function of the location transform.
#[derive(Clone, Copy)]
struct ProfileCost<'a> {
    family: Family,
    sample: &'a [f64],
    x_min: f64,
    spread: f64,
}

impl ProfileCost<'_> {
    /// Fit at `loc(t)`, or `None` if that location is inadmissible.
    fn candidate(&self, t: f64) -> Option<LocFit> {
        let gap = self.spread * t.exp();
        if !gap.is_finite()
            || gap < MIN_RELATIVE_GAP * self.spread
            || gap > MAX_RELATIVE_GAP * self.spread
        {
            return None;
        }
        let fit = mle::fit_at(self.family, self.sample, self.x_min - gap).ok()?;
        // Shape <= 1 puts an infinite density spike at the support edge.
        if self.family.has_unbounded_edge() && fit.params.shape <= 1.0 {
            return None;
        }
        Some(fit)
    }
}

impl CostFunction for ProfileCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok(self
            .candidate(params[0])
            .map(|f| -f.log_likelihood)
            .unwrap_or(f64::MAX))
    }
}
