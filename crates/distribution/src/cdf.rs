//! CDF evaluation through statrs.

use statrs::distribution::{ContinuousCDF, Gamma, LogNormal, Weibull};

use crate::error::DistributionError;
use crate::family::Family;
use crate::params::DistParams;

/// A validated family + parameter pair ready for repeated CDF evaluation.
///
/// Build it once per series and reuse it for every value; construction
/// validates the parameters and instantiates the statrs distribution.
#[derive(Debug, Clone)]
pub struct FittedDistribution {
    family: Family,
    params: DistParams,
    kernel: Kernel,
}

/// The statrs distribution for `x - loc`.
#[derive(Debug, Clone)]
enum Kernel {
    Gamma(Gamma),
    Weibull(Weibull),
    LogNormal(LogNormal),
}

impl FittedDistribution {
    /// Validates `params` for `family` and builds the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidParameters`] if the parameters are
    /// outside their domain or statrs rejects them.
    pub fn new(family: Family, params: DistParams) -> Result<Self, DistributionError> {
        params.validate(family)?;
        let invalid = |message: String| DistributionError::InvalidParameters {
            family,
            shape: params.shape,
            loc: params.loc,
            scale: params.scale,
            reason: message,
        };

        // statrs parameterises Gamma by (shape, rate) and LogNormal by
        // (μ, σ) of the underlying normal.
        let kernel = match family {
            Family::Gamma => Gamma::new(params.shape, 1.0 / params.scale)
                .map(Kernel::Gamma)
                .map_err(|e| invalid(e.to_string()))?,
            Family::Weibull => Weibull::new(params.shape, params.scale)
                .map(Kernel::Weibull)
                .map_err(|e| invalid(e.to_string()))?,
            Family::LogNormal => LogNormal::new(params.scale.ln(), params.shape)
                .map(Kernel::LogNormal)
                .map_err(|e| invalid(e.to_string()))?,
        };

        Ok(Self {
            family,
            params,
            kernel,
        })
    }

    /// The distribution family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// The parameters this distribution was built from.
    pub fn params(&self) -> DistParams {
        self.params
    }

    /// `P(X <= x)`. Values at or below the location map to 0; `NaN` maps to
    /// `NaN`.
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let y = x - self.params.loc;
        if y <= 0.0 {
            return 0.0;
        }
        match &self.kernel {
            Kernel::Gamma(d) => d.cdf(y),
            Kernel::Weibull(d) => d.cdf(y),
            Kernel::LogNormal(d) => d.cdf(y),
        }
    }

    /// Quantile function: the `x` with `cdf(x) = p`, for `p` in `[0, 1]`.
    pub fn inverse_cdf(&self, p: f64) -> f64 {
        let y = match &self.kernel {
            Kernel::Gamma(d) => d.inverse_cdf(p),
            Kernel::Weibull(d) => d.inverse_cdf(p),
            Kernel::LogNormal(d) => d.inverse_cdf(p),
        };
        self.params.loc + y
    }
}
