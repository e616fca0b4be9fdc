//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use drought_calibrate::{CalibrationConfig, CalibrationParams};
use drought_distribution::{DistParams, Family, FitConfig, Location};
use drought_standardize::StandardizeConfig;

/// Parses a distribution family name.
pub fn parse_family(s: &str) -> Result<Family> {
    s.parse::<Family>().context("invalid [distribution] family")
}

/// Converts the TOML location into a [`Location`].
pub fn parse_location(loc: &LocationToml) -> Result<Location> {
    match loc {
        LocationToml::Fixed(v) => Ok(Location::Fixed(*v)),
        LocationToml::Keyword(k) if k.eq_ignore_ascii_case("free") => Ok(Location::Free),
        LocationToml::Keyword(other) => {
            bail!("unknown location {other:?}: expected \"free\" or a number")
        }
    }
}

/// Builds a [`FitConfig`] from the TOML distribution configuration.
pub fn build_fit_config(dist: &DistributionToml) -> Result<FitConfig> {
    let cfg = FitConfig::new()
        .with_location(parse_location(&dist.location)?)
        .with_min_samples(dist.min_samples);
    cfg.validate().context("invalid [distribution] section")?;
    Ok(cfg)
}

/// Builds a [`StandardizeConfig`] from the distribution and standardize
/// sections.
pub fn build_standardize_config(cfg: &DroughtConfig) -> Result<StandardizeConfig> {
    let std_cfg = StandardizeConfig::new()
        .with_family(parse_family(&cfg.distribution.family)?)
        .with_fit_config(build_fit_config(&cfg.distribution)?)
        .with_support_margin(cfg.standardize.support_margin);
    std_cfg.validate().context("invalid [standardize] section")?;
    Ok(std_cfg)
}

/// Returns the baseline parameters, if configured.
pub fn build_baseline(standardize: &StandardizeToml) -> Option<DistParams> {
    standardize
        .params
        .as_ref()
        .map(|p| DistParams::new(p.shape, p.loc, p.scale))
}

/// Picks CLI scales over config scales; rejects an empty list and zero.
pub fn resolve_scales(cli: &[usize], config: &[usize]) -> Result<Vec<usize>> {
    let scales = if cli.is_empty() { config } else { cli };
    if scales.is_empty() {
        bail!("no aggregation scales given");
    }
    if scales.contains(&0) {
        bail!("aggregation scale must be >= 1");
    }
    Ok(scales.to_vec())
}

/// Builds a [`CalibrationConfig`] from the TOML calibrate configuration.
pub fn build_calibration_config(cal: &CalibrateToml) -> Result<CalibrationConfig> {
    let cfg = CalibrationConfig::new()
        .with_max_iters(cal.max_iters)
        .with_sd_tolerance(cal.sd_tolerance)
        .with_restarts(cal.restarts);
    cfg.validate().context("invalid [calibrate] section")?;
    Ok(cfg)
}

/// Initial coefficient guess from `[calibrate.initial]`.
pub fn build_initial(cal: &CalibrateToml) -> CalibrationParams {
    cal.initial.iter().map(|(k, &v)| (k.as_str(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_names() {
        assert_eq!(parse_family("Gamma").unwrap(), Family::Gamma);
        assert_eq!(parse_family("lognormal").unwrap(), Family::LogNormal);
        let err = parse_family("foo").unwrap_err();
        assert!(format!("{err:#}").contains("unsupported distribution"));
    }

    #[test]
    fn locations() {
        assert_eq!(
            parse_location(&LocationToml::Keyword("FREE".to_string())).unwrap(),
            Location::Free
        );
        assert_eq!(
            parse_location(&LocationToml::Fixed(0.0)).unwrap(),
            Location::Fixed(0.0)
        );
        assert!(parse_location(&LocationToml::Keyword("fixed".to_string())).is_err());
    }

    #[test]
    fn default_config_converts() {
        let cfg = DroughtConfig::default();
        let std_cfg = build_standardize_config(&cfg).unwrap();
        assert_eq!(std_cfg.family(), Family::Gamma);
        assert_eq!(std_cfg.fit_config().location(), Location::Free);
        assert!(build_baseline(&cfg.standardize).is_none());
        let cal = build_calibration_config(&cfg.calibrate).unwrap();
        assert_eq!(cal.max_iters(), 5000);
        assert!(build_initial(&cfg.calibrate).is_empty());
    }

    #[test]
    fn invalid_min_samples_rejected() {
        let mut cfg = DroughtConfig::default();
        cfg.distribution.min_samples = 1;
        assert!(build_standardize_config(&cfg).is_err());
    }

    #[test]
    fn baseline_params() {
        let std = StandardizeToml {
            params: Some(ParamsToml {
                shape: 2.0,
                loc: -1.0,
                scale: 3.0,
            }),
            ..StandardizeToml::default()
        };
        assert_eq!(
            build_baseline(&std),
            Some(DistParams::new(2.0, -1.0, 3.0))
        );
    }

    #[test]
    fn scales_cli_overrides_config() {
        assert_eq!(resolve_scales(&[], &[1, 3]).unwrap(), vec![1, 3]);
        assert_eq!(resolve_scales(&[6], &[1, 3]).unwrap(), vec![6]);
        assert!(resolve_scales(&[], &[]).is_err());
        assert!(resolve_scales(&[0], &[1]).is_err());
    }
}
