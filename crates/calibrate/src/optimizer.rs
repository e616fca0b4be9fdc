//! Nelder-Mead least-squares calibration.
//!
//! Wraps the `argmin` crate to minimize the sum of squared residuals between
//! a model's output and an observed series over a named coefficient set.

use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::neldermead::NelderMead;
use tracing::debug;

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::params::CalibrationParams;
use crate::result::Calibration;

/// Relative perturbation of each coordinate in the initial simplex.
const SIMPLEX_STEP: f64 = 0.05;
/// Absolute perturbation used for coordinates that start at zero.
const SIMPLEX_ZERO_STEP: f64 = 0.00025;

/// Number of time steps in a model input, used to check it against the
/// observed series before the search starts.
///
/// Implemented for slices and vectors; implement it for input structs that
/// bundle several aligned series.
pub trait ModelInput {
    /// Number of time steps.
    fn n_steps(&self) -> usize;
}

impl<T> ModelInput for [T] {
    fn n_steps(&self) -> usize {
        self.len()
    }
}

impl<T> ModelInput for Vec<T> {
    fn n_steps(&self) -> usize {
        self.len()
    }
}

/// Calibrates `initial` so that `model(input, params)` best matches
/// `observed` in the least-squares sense.
///
/// The search runs Nelder-Mead from a simplex around `initial`, then
/// restarts `config.restarts()` times from a fresh simplex around the best
/// vertex. Each run stops when the standard deviation of the simplex costs
/// falls below `config.sd_tolerance()`.
///
/// # Errors
///
/// - [`CalibrationError::InvalidCalibrationInput`] before the search if
///   `observed` is empty or non-finite, `input` and `observed` differ in
///   length, `initial` is empty or non-finite, or the model output at
///   `initial` has the wrong length or non-finite values.
/// - [`CalibrationError::DidNotConverge`] if a run hits
///   `config.max_iters()`.
/// - [`CalibrationError::InvalidConfig`] if `config` is invalid.
///
/// # Example
///
/// ```
/// use drought_calibrate::{CalibrationConfig, CalibrationParams, calibrate};
///
/// let x: Vec<f64> = (0..20).map(f64::from).collect();
/// let observed: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();
/// let line = |x: &Vec<f64>, p: &CalibrationParams| -> Vec<f64> {
///     let (a, b) = (p.get("a").unwrap_or(0.0), p.get("b").unwrap_or(0.0));
///     x.iter().map(|v| a * v + b).collect()
/// };
///
/// let initial = CalibrationParams::new().with("a", 1.0).with("b", 0.0);
/// let fit = calibrate(line, &observed, &x, &initial, &CalibrationConfig::new()).unwrap();
/// assert!((fit.params().get("a").unwrap() - 3.0).abs() < 1e-3);
/// ```
#[tracing::instrument(skip_all, fields(n = observed.len(), n_params = initial.len()))]
pub fn calibrate<I, F>(
    model: F,
    observed: &[f64],
    input: &I,
    initial: &CalibrationParams,
    config: &CalibrationConfig,
) -> Result<Calibration, CalibrationError>
where
    I: ModelInput + ?Sized,
    F: Fn(&I, &CalibrationParams) -> Vec<f64>,
{
    config.validate()?;
    validate_inputs(&model, observed, input, initial)?;

    let cost = SseCost {
        model: &model,
        input,
        observed,
        template: initial,
    };

    let mut best = initial.to_vec();
    let mut iterations = 0;
    for run in 0..=config.restarts() {
        let solver = NelderMead::new(simplex_around(&best))
            .with_sd_tolerance(config.sd_tolerance())
            .map_err(|e| CalibrationError::InvalidConfig {
                reason: e.to_string(),
            })?;
        let result = Executor::new(cost, solver)
            .configure(|state| state.max_iters(config.max_iters()))
            .run()
            .map_err(|e| CalibrationError::OptimizationFailed {
                reason: e.to_string(),
            })?;

        let state = result.state();
        iterations += state.get_iter();
        let params = state
            .best_param
            .as_ref()
            .ok_or_else(|| CalibrationError::OptimizationFailed {
                reason: "no best parameters after search".to_string(),
            })?;
        debug!(
            run,
            iters = state.get_iter(),
            cost = state.get_best_cost(),
            termination = ?state.get_termination_reason(),
            "nelder-mead run finished"
        );
        if matches!(
            state.get_termination_reason(),
            Some(TerminationReason::MaxItersReached)
        ) {
            return Err(CalibrationError::DidNotConverge {
                iters: iterations,
                cost: state.get_best_cost(),
            });
        }
        best.clone_from(params);
    }

    let params = initial.with_coords(&best);
    let reconstructed = model(input, &params);
    let sse = sum_squared_residuals(&reconstructed, observed).ok_or_else(|| {
        CalibrationError::OptimizationFailed {
            reason: "model output at the calibrated parameters is not finite".to_string(),
        }
    })?;
    let correlation = drought_stats::pearson_correlation(&reconstructed, observed);

    debug!(cost = sse, iterations, "calibration finished");
    Ok(Calibration::new(
        params,
        reconstructed,
        sse,
        iterations,
        correlation,
    ))
}

/// Rejects inputs that cannot define a least-squares problem.
fn validate_inputs<I, F>(
    model: &F,
    observed: &[f64],
    input: &I,
    initial: &CalibrationParams,
) -> Result<(), CalibrationError>
where
    I: ModelInput + ?Sized,
    F: Fn(&I, &CalibrationParams) -> Vec<f64>,
{
    let invalid = |reason: String| Err(CalibrationError::InvalidCalibrationInput { reason });

    if observed.is_empty() {
        return invalid("observed series is empty".to_string());
    }
    if let Some(i) = observed.iter().position(|v| !v.is_finite()) {
        return invalid(format!("observed value at index {i} is not finite"));
    }
    if input.n_steps() != observed.len() {
        return invalid(format!(
            "input has {} steps, observed has {}",
            input.n_steps(),
            observed.len()
        ));
    }
    if initial.is_empty() {
        return invalid("initial guess has no coefficients".to_string());
    }
    if let Some((name, value)) = initial.iter().find(|(_, v)| !v.is_finite()) {
        return invalid(format!("initial coefficient {name} is not finite ({value})"));
    }

    let modeled = model(input, initial);
    if modeled.len() != observed.len() {
        return invalid(format!(
            "model returned {} values for {} observations",
            modeled.len(),
            observed.len()
        ));
    }
    if let Some(i) = modeled.iter().position(|v| !v.is_finite()) {
        return invalid(format!(
            "model output at the initial guess is not finite at index {i}"
        ));
    }
    Ok(())
}

/// Initial simplex: `x0` plus one vertex per coordinate, perturbed by 5%
/// (or a small absolute step where the coordinate is zero).
fn simplex_around(x0: &[f64]) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(x0.len() + 1);
    simplex.push(x0.to_vec());
    for i in 0..x0.len() {
        let mut vertex = x0.to_vec();
        vertex[i] = if vertex[i] != 0.0 {
            vertex[i] * (1.0 + SIMPLEX_STEP)
        } else {
            SIMPLEX_ZERO_STEP
        };
        simplex.push(vertex);
    }
    simplex
}

/// `Σ (modeled - observed)²`, or `None` if lengths differ or the result is
/// not finite.
fn sum_squared_residuals(modeled: &[f64], observed: &[f64]) -> Option<f64> {
    if modeled.len() != observed.len() {
        return None;
    }
    let sse: f64 = modeled
        .iter()
        .zip(observed)
        .map(|(m, o)| (m - o) * (m - o))
        .sum();
    sse.is_finite().then_some(sse)
}

/// Cost function for argmin: sum of squared residuals.
struct SseCost<'a, I: ?Sized, F> {
    model: &'a F,
    input: &'a I,
    observed: &'a [f64],
    template: &'a CalibrationParams,
}

// Manual impls: a derive would require `I: Clone` and `F: Clone`.
impl<I: ?Sized, F> Clone for SseCost<'_, I, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized, F> Copy for SseCost<'_, I, F> {}

impl<I, F> CostFunction for SseCost<'_, I, F>
where
    I: ?Sized,
    F: Fn(&I, &CalibrationParams) -> Vec<f64>,
{
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let params = self.template.with_coords(params);
        let modeled = (self.model)(self.input, &params);
        Ok(sum_squared_residuals(&modeled, self.observed).unwrap_or(f64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(x: &[f64], p: &CalibrationParams) -> Vec<f64> {
        let a = p.get("a").unwrap_or(0.0);
        let b = p.get("b").unwrap_or(0.0);
        x.iter().map(|v| a * v + b).collect()
    }

    fn xs() -> Vec<f64> {
        (0..30).map(|i| i as f64 * 0.5).collect()
    }

    #[test]
    fn simplex_perturbs_each_coordinate() {
        let s = simplex_around(&[2.0, 0.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], vec![2.0, 0.0]);
        assert_relative_eq!(s[1][0], 2.1);
        assert_eq!(s[1][1], 0.0);
        assert_eq!(s[2], vec![2.0, 0.00025]);
    }

    #[test]
    fn sse_rejects_bad_output() {
        assert_eq!(sum_squared_residuals(&[1.0, 2.0], &[1.0, 4.0]), Some(4.0));
        assert_eq!(sum_squared_residuals(&[1.0], &[1.0, 4.0]), None);
        assert_eq!(sum_squared_residuals(&[f64::NAN, 1.0], &[1.0, 4.0]), None);
    }

    #[test]
    fn recovers_line() {
        let x = xs();
        let observed: Vec<f64> = x.iter().map(|v| -1.5 * v + 4.0).collect();
        let initial = CalibrationParams::new().with("a", 1.0).with("b", 1.0);
        let fit = calibrate(line, &observed, x.as_slice(), &initial, &CalibrationConfig::new())
            .unwrap();
        assert_relative_eq!(fit.params().get("a").unwrap(), -1.5, epsilon = 1e-3);
        assert_relative_eq!(fit.params().get("b").unwrap(), 4.0, epsilon = 1e-3);
        assert!(fit.cost() < 1e-6);
        assert!(fit.iterations() > 0);
        assert_eq!(fit.reconstructed().len(), observed.len());
    }

    #[test]
    fn empty_observed_rejected() {
        let initial = CalibrationParams::new().with("a", 1.0);
        let err = calibrate(line, &[], &[][..], &initial, &CalibrationConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::InvalidCalibrationInput { .. }
        ));
    }

    #[test]
    fn length_mismatch_rejected() {
        let x = xs();
        let observed = vec![0.0; x.len() - 1];
        let initial = CalibrationParams::new().with("a", 1.0);
        let err = calibrate(line, &observed, x.as_slice(), &initial, &CalibrationConfig::new())
            .unwrap_err();
        assert!(err.to_string().contains("steps"));
    }

    #[test]
    fn empty_initial_rejected() {
        let x = xs();
        let err = calibrate(
            line,
            &x,
            x.as_slice(),
            &CalibrationParams::new(),
            &CalibrationConfig::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no coefficients"));
    }

    #[test]
    fn non_finite_model_output_rejected() {
        let x = vec![0.0; 5];
        let ratio = |x: &[f64], p: &CalibrationParams| -> Vec<f64> {
            let a = p.get("a").unwrap_or(0.0);
            x.iter().map(|d| a / d).collect()
        };
        let initial = CalibrationParams::new().with("a", 1.0);
        let err =
            calibrate(ratio, &[1.0; 5], x.as_slice(), &initial, &CalibrationConfig::new())
                .unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::InvalidCalibrationInput { .. }
        ));
    }

    #[test]
    fn non_finite_observed_rejected() {
        let x = xs();
        let mut observed = x.clone();
        observed[3] = f64::NAN;
        let initial = CalibrationParams::new().with("a", 1.0);
        let err = calibrate(line, &observed, x.as_slice(), &initial, &CalibrationConfig::new())
            .unwrap_err();
        assert!(err.to_string().contains("index 3"));
    }

    #[test]
    fn iteration_cap_reports_did_not_converge() {
        let x = xs();
        let observed: Vec<f64> = x.iter().map(|v| 7.0 * v - 3.0).collect();
        let initial = CalibrationParams::new().with("a", 1.0).with("b", 1.0);
        let config = CalibrationConfig::new().with_max_iters(3);
        let err = calibrate(line, &observed, x.as_slice(), &initial, &config).unwrap_err();
        assert!(matches!(err, CalibrationError::DidNotConverge { .. }));
    }

    #[test]
    fn invalid_config_rejected() {
        let x = xs();
        let initial = CalibrationParams::new().with("a", 1.0);
        let config = CalibrationConfig::new().with_max_iters(0);
        assert!(matches!(
            calibrate(line, &x, x.as_slice(), &initial, &config),
            Err(CalibrationError::InvalidConfig { .. })
        ));
    }
}
