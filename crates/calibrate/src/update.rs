//! Exponential-weighted blending of old and re-estimated parameters.

use tracing::debug;

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::optimizer::{ModelInput, calibrate};
use crate::params::CalibrationParams;

/// Blend weights for [`update`] and [`recalibrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateWeights {
    /// Weight on the old parameters.
    pub old: f64,
    /// Weight on the newly estimated parameters.
    pub new: f64,
}

impl UpdateWeights {
    /// Creates weights without validation.
    pub fn new(old: f64, new: f64) -> Self {
        Self { old, new }
    }

    fn validate(&self) -> Result<(), CalibrationError> {
        let ok = self.old.is_finite()
            && self.new.is_finite()
            && self.old >= 0.0
            && self.new >= 0.0
            && ((self.old + self.new) - 1.0).abs() <= 1e-12;
        if ok {
            Ok(())
        } else {
            Err(CalibrationError::InvalidWeights {
                weight_old: self.old,
                weight_new: self.new,
            })
        }
    }
}

impl Default for UpdateWeights {
    /// 0.7 old, 0.3 new.
    fn default() -> Self {
        Self { old: 0.7, new: 0.3 }
    }
}

/// Blends two parameter sets: `w_old · old + w_new · new` per coefficient.
///
/// The blend is evaluated as `old + w_new · (new - old)`, which equals the
/// weighted sum when the weights sum to one and is exact whenever `old` and
/// `new` agree.
///
/// # Errors
///
/// - [`CalibrationError::ParameterMismatch`] if the name sets differ.
/// - [`CalibrationError::InvalidWeights`] if a weight is negative or
///   non-finite, or the weights do not sum to one.
///
/// # Example
///
/// ```
/// use drought_calibrate::{CalibrationParams, UpdateWeights, update};
///
/// let old = CalibrationParams::new().with("a", 1.0);
/// let new = CalibrationParams::new().with("a", 2.0);
/// let blended = update(&old, &new, UpdateWeights::default()).unwrap();
/// assert_eq!(blended.get("a"), Some(1.3));
/// ```
pub fn update(
    old: &CalibrationParams,
    new: &CalibrationParams,
    weights: UpdateWeights,
) -> Result<CalibrationParams, CalibrationError> {
    weights.validate()?;
    if !old.same_names(new) {
        return Err(CalibrationError::ParameterMismatch {
            expected: old.names().map(str::to_string).collect(),
            got: new.names().map(str::to_string).collect(),
        });
    }

    Ok(old
        .iter()
        .zip(new.iter())
        .map(|((name, o), (_, n))| (name, o + weights.new * (n - o)))
        .collect())
}

/// Re-estimates `old` on new data and blends the result with `old`.
///
/// The search starts from `old`, so a stable system changes little between
/// updates.
///
/// # Errors
///
/// Any error of [`calibrate`] or [`update`].
#[tracing::instrument(skip_all, fields(n = observed.len()))]
pub fn recalibrate<I, F>(
    model: F,
    old: &CalibrationParams,
    observed: &[f64],
    input: &I,
    weights: UpdateWeights,
    config: &CalibrationConfig,
) -> Result<CalibrationParams, CalibrationError>
where
    I: ModelInput + ?Sized,
    F: Fn(&I, &CalibrationParams) -> Vec<f64>,
{
    weights.validate()?;
    let fresh = calibrate(model, observed, input, old, config)?;
    let blended = update(old, fresh.params(), weights)?;
    debug!(cost = fresh.cost(), "parameters re-estimated and blended");
    Ok(blended)
}
