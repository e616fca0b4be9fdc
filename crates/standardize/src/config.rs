//! Configuration for the standardization pipeline.

use drought_distribution::{Family, FitConfig};

use crate::error::StandardizeError;

/// Configuration for [`standardize`](crate::standardize),
/// [`spi`](crate::spi) and [`spei`](crate::spei).
///
/// # Example
///
/// ```
/// use drought_distribution::{Family, FitConfig, Location};
/// use drought_standardize::StandardizeConfig;
///
/// let config = StandardizeConfig::new()
///     .with_family(Family::Weibull)
///     .with_fit_config(FitConfig::new().with_location(Location::Fixed(0.0)));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct StandardizeConfig {
    family: Family,
    fit: FitConfig,
    support_margin: f64,
}

impl StandardizeConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: gamma family, default [`FitConfig`] (free location),
    /// `support_margin = 0.05`.
    pub fn new() -> Self {
        Self {
            family: Family::Gamma,
            fit: FitConfig::new(),
            support_margin: 0.05,
        }
    }

    // --- Builder methods ---

    /// Sets the distribution family.
    pub fn with_family(mut self, family: Family) -> Self {
        self.family = family;
        self
    }

    /// Sets the fitting configuration.
    pub fn with_fit_config(mut self, fit: FitConfig) -> Self {
        self.fit = fit;
        self
    }

    /// Sets the SPEI support margin, as a fraction of the sample range.
    pub fn with_support_margin(mut self, margin: f64) -> Self {
        self.support_margin = margin;
        self
    }

    // --- Accessors ---

    /// Returns the distribution family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the fitting configuration.
    pub fn fit_config(&self) -> &FitConfig {
        &self.fit
    }

    /// Returns the SPEI support margin.
    pub fn support_margin(&self) -> f64 {
        self.support_margin
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), StandardizeError> {
        self.fit.validate()?;
        if !self.support_margin.is_finite() || self.support_margin <= 0.0 {
            return Err(StandardizeError::InvalidConfig {
                reason: format!(
                    "support_margin must be finite and > 0, got {}",
                    self.support_margin
                ),
            });
        }
        Ok(())
    }
}

impl Default for StandardizeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drought_distribution::DistributionError;

    #[test]
    fn defaults() {
        let c = StandardizeConfig::new();
        assert_eq!(c.family(), Family::Gamma);
        assert_eq!(c.support_margin(), 0.05);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn bad_margin_rejected() {
        for margin in [0.0, -0.1, f64::NAN] {
            let c = StandardizeConfig::new().with_support_margin(margin);
            assert!(matches!(
                c.validate(),
                Err(StandardizeError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn fit_config_errors_propagate() {
        let c = StandardizeConfig::new().with_fit_config(FitConfig::new().with_min_samples(1));
        assert!(matches!(
            c.validate(),
            Err(StandardizeError::Distribution(
                DistributionError::InvalidConfig { .. }
            ))
        ));
    }
}
