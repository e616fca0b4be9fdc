//! Standardized drought indices: SPI and SPEI.
//!
//! A raw series is summed over a rolling window, a distribution is fitted to
//! the aggregated values (or a stored baseline is reused), and each value is
//! mapped through the fitted CDF and the inverse standard-normal CDF into a
//! z-score.
//!
//! # Pipeline Order
//!
//! 1. **Water balance** (SPEI only): `D = precipitation - PET`
//! 2. **Aggregate** over `scale` steps, right-aligned
//! 3. **Fit** the distribution on the non-missing aggregated values, unless
//!    parameters were supplied
//! 4. **Transform**: CDF → clamp to `[ε, 1 - ε]` → inverse normal
//!
//! Missing values propagate: they are never fitted, mapped or counted.

mod config;
mod error;
mod normal;
mod result;

pub use config::StandardizeConfig;
pub use error::StandardizeError;
pub use normal::z_score;
pub use result::StandardizedIndex;

pub use drought_distribution::{DistParams, Family, FitConfig, Location};
pub use drought_series::TimeSeries;

use drought_distribution::{FittedDistribution, fit};
use drought_series::{aggregate, water_balance};
use tracing::{debug, warn};

/// Whether the fitting sample may need translating onto positive support.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Support {
    /// Values are non-negative by nature (precipitation).
    Positive,
    /// Values may be negative (water balance); shift before fitting.
    Shifted,
}

/// Computes a standardized index of `series` at `scale`.
///
/// With `params = None` the distribution is fitted on the non-missing
/// aggregated values; with `Some(params)` fitting is bypassed entirely and
/// the output is a deterministic function of the input.
///
/// # Errors
///
/// - [`StandardizeError::Series`] for an empty series or a scale outside
///   `1..=len`.
/// - [`StandardizeError::Distribution`] if fitting fails (e.g. too few
///   positive aggregated values, a negative value) or supplied parameters are
///   invalid.
/// - [`StandardizeError::InvalidConfig`] if `config` is invalid.
///
/// # Example
///
/// ```
/// use drought_standardize::{StandardizeConfig, TimeSeries, standardize};
///
/// let precip = TimeSeries::from_values(&[
///     31.0, 12.5, 48.2, 5.1, 22.0, 60.3, 18.7, 9.9, 40.1, 27.4, 15.0, 35.6,
/// ]);
/// let index = standardize(&precip, 3, None, &StandardizeConfig::new()).unwrap();
/// assert_eq!(index.values().len(), 12);
/// assert!(index.values()[..2].iter().all(Option::is_none));
/// ```
#[tracing::instrument(skip(series, params, config), fields(n = series.len()))]
pub fn standardize(
    series: &TimeSeries,
    scale: usize,
    params: Option<&DistParams>,
    config: &StandardizeConfig,
) -> Result<StandardizedIndex, StandardizeError> {
    config.validate()?;
    let aggregated = aggregate(series, scale)?;
    index_aggregated(aggregated, scale, params, config, Support::Positive)
}

/// Standardized Precipitation Index. Same as [`standardize`].
pub fn spi(
    precip: &TimeSeries,
    scale: usize,
    params: Option<&DistParams>,
    config: &StandardizeConfig,
) -> Result<StandardizedIndex, StandardizeError> {
    standardize(precip, scale, params, config)
}

/// Standardized Precipitation-Evapotranspiration Index.
///
/// Standardizes the climatic water balance `precip - pet`. Because the
/// aggregated balance is usually negative somewhere, the fitting sample is
/// translated by `c = margin * range - min` onto positive support when its
/// minimum is not positive; the returned parameters have the shift folded
/// back into the location and describe the unshifted balance.
///
/// # Errors
///
/// As [`standardize`], plus [`StandardizeError::Series`] when `precip` and
/// `pet` differ in length or dates.
#[tracing::instrument(skip(precip, pet, params, config), fields(n = precip.len()))]
pub fn spei(
    precip: &TimeSeries,
    pet: &TimeSeries,
    scale: usize,
    params: Option<&DistParams>,
    config: &StandardizeConfig,
) -> Result<StandardizedIndex, StandardizeError> {
    config.validate()?;
    let balance = water_balance(precip, pet)?;
    let aggregated = aggregate(&balance, scale)?;
    index_aggregated(aggregated, scale, params, config, Support::Shifted)
}

/// Steps 3 and 4 of the pipeline on an already aggregated series.
fn index_aggregated(
    aggregated: TimeSeries,
    scale: usize,
    params: Option<&DistParams>,
    config: &StandardizeConfig,
    support: Support,
) -> Result<StandardizedIndex, StandardizeError> {
    let family = config.family();
    let (params, fitted) = match params {
        Some(p) => (*p, false),
        None => (fit_aggregated(&aggregated, config, support)?, true),
    };

    let dist = FittedDistribution::new(family, params)?;
    let z = aggregated.map(|x| z_score(dist.cdf(x)));

    debug!(
        %family,
        scale,
        fitted,
        n_missing = z.n_missing(),
        "index computed"
    );
    Ok(StandardizedIndex::new(z, params, family, scale, fitted))
}

fn fit_aggregated(
    aggregated: &TimeSeries,
    config: &StandardizeConfig,
    support: Support,
) -> Result<DistParams, StandardizeError> {
    let sample = aggregated.observed();
    let family = config.family();

    let shift = match support {
        Support::Positive => None,
        Support::Shifted => support_shift(&sample, config.support_margin()),
    };

    match shift {
        None => Ok(fit(&sample, family, config.fit_config())?),
        Some(c) => {
            warn!(shift = c, "non-positive water balance, shifting sample onto positive support");
            let shifted: Vec<f64> = sample.iter().map(|v| v + c).collect();
            Ok(fit(&shifted, family, config.fit_config())?.shifted(-c))
        }
    }
}

/// The translation that makes every value of `sample` strictly positive,
/// or `None` if it already is.
fn support_shift(sample: &[f64], margin: f64) -> Option<f64> {
    let (min, max) = sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if sample.is_empty() || min > 0.0 {
        return None;
    }
    let range = max - min;
    let span = if range > 0.0 { range } else { 1.0 };
    Some(margin * span - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use drought_distribution::DistributionError;
    use drought_series::SeriesError;

    #[test]
    fn support_shift_only_when_needed() {
        assert_eq!(support_shift(&[1.0, 2.0], 0.05), None);
        assert_eq!(support_shift(&[], 0.05), None);

        let c = support_shift(&[-10.0, 10.0], 0.05).unwrap();
        assert_relative_eq!(c, 11.0);
        assert_relative_eq!(-10.0 + c, 1.0);

        // Zero counts as non-positive.
        let c = support_shift(&[0.0, 4.0], 0.25).unwrap();
        assert_relative_eq!(c, 1.0);
    }

    #[test]
    fn support_shift_zero_range() {
        let c = support_shift(&[-3.0, -3.0], 0.05).unwrap();
        assert_relative_eq!(c, 3.05);
    }

    #[test]
    fn invalid_scale_is_reported() {
        let s = TimeSeries::from_values(&[1.0, 2.0, 3.0]);
        let config = StandardizeConfig::new();
        for scale in [0, 4] {
            let err = standardize(&s, scale, None, &config).unwrap_err();
            assert!(
                matches!(
                    err,
                    StandardizeError::Series(SeriesError::InvalidScale { .. })
                ),
                "scale {scale}: {err:?}"
            );
        }
    }

    #[test]
    fn empty_series_is_reported() {
        let err = standardize(&TimeSeries::default(), 1, None, &StandardizeConfig::new())
            .unwrap_err();
        assert_eq!(err, StandardizeError::Series(SeriesError::EmptySeries));
    }

    #[test]
    fn negative_precipitation_fails_fast() {
        let s = TimeSeries::from_values(&[3.0, 1.0, -2.0, 5.0, 4.0, 6.0]);
        let err = standardize(&s, 1, None, &StandardizeConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            StandardizeError::Distribution(DistributionError::NegativeSupport { .. })
        ));
    }

    #[test]
    fn spei_length_mismatch() {
        let p = TimeSeries::from_values(&[1.0, 2.0, 3.0]);
        let pet = TimeSeries::from_values(&[1.0, 2.0]);
        let err = spei(&p, &pet, 1, None, &StandardizeConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            StandardizeError::Series(SeriesError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn supplied_params_are_validated() {
        let s = TimeSeries::from_values(&[1.0, 2.0, 3.0]);
        let bad = DistParams::new(-1.0, 0.0, 1.0);
        let err = standardize(&s, 1, Some(&bad), &StandardizeConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            StandardizeError::Distribution(DistributionError::InvalidParameters { .. })
        ));
    }
}
