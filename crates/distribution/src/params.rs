//! Distribution parameter triple.

use crate::error::DistributionError;
use crate::family::Family;

/// Parameters of a three-parameter distribution: `(shape, loc, scale)`.
///
/// The meaning of `shape` and `scale` depends on the [`Family`]:
///
/// | Family | shape | loc | scale |
/// |--------|-------|-----|-------|
/// | Gamma | k | lower bound of support | θ |
/// | Weibull | k | lower bound of support | λ |
/// | LogNormal | σ of `ln(x - loc)` | lower bound of support | `exp(μ)` |
///
/// Values are plain data so a baseline fit can be stored by the caller and
/// reused verbatim; use [`DistParams::validate`] (called by every consumer in
/// this crate) to check the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistParams {
    /// Shape parameter.
    pub shape: f64,
    /// Location (support lower bound).
    pub loc: f64,
    /// Scale parameter.
    pub scale: f64,
}

impl DistParams {
    /// Creates a parameter triple without validation.
    pub fn new(shape: f64, loc: f64, scale: f64) -> Self {
        Self { shape, loc, scale }
    }

    /// Returns the same distribution translated by `offset` along the x axis.
    ///
    /// A sample fitted after adding `c` to every value describes the original
    /// data once shifted by `-c`.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            loc: self.loc + offset,
            ..*self
        }
    }

    /// Checks that `shape` and `scale` are finite and positive and `loc` is
    /// finite.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidParameters`].
    pub fn validate(&self, family: Family) -> Result<(), DistributionError> {
        let reason = if !self.shape.is_finite() || self.shape <= 0.0 {
            "shape must be finite and > 0"
        } else if !self.scale.is_finite() || self.scale <= 0.0 {
            "scale must be finite and > 0"
        } else if !self.loc.is_finite() {
            "loc must be finite"
        } else {
            return Ok(());
        };
        Err(DistributionError::InvalidParameters {
            family,
            shape: self.shape,
            loc: self.loc,
            scale: self.scale,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_params() {
        assert!(DistParams::new(2.0, 0.0, 3.0).validate(Family::Gamma).is_ok());
        assert!(
            DistParams::new(0.5, -10.0, 1.0)
                .validate(Family::LogNormal)
                .is_ok()
        );
    }

    #[test]
    fn invalid_shape() {
        let err = DistParams::new(0.0, 0.0, 1.0)
            .validate(Family::Weibull)
            .unwrap_err();
        assert!(err.to_string().contains("shape must be finite and > 0"));
    }

    #[test]
    fn invalid_scale_and_loc() {
        assert!(
            DistParams::new(1.0, 0.0, -1.0)
                .validate(Family::Gamma)
                .is_err()
        );
        assert!(
            DistParams::new(1.0, f64::NAN, 1.0)
                .validate(Family::Gamma)
                .is_err()
        );
        assert!(
            DistParams::new(f64::INFINITY, 0.0, 1.0)
                .validate(Family::Gamma)
                .is_err()
        );
    }

    #[test]
    fn shifted_moves_only_location() {
        let p = DistParams::new(2.0, 1.0, 3.0).shifted(-4.0);
        assert_eq!(p, DistParams::new(2.0, -3.0, 3.0));
    }

    #[test]
    fn params_is_copy_send_sync() {
        fn assert_impl<T: Copy + Clone + Send + Sync>() {}
        assert_impl::<DistParams>();
    }
}
