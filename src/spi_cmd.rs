//! SPI and SPEI commands: standardized indices at one or more scales.

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, info_span};

use drought_series::TimeSeries;
use drought_standardize::{DistParams, StandardizeConfig, StandardizedIndex, spei, spi};

use crate::cli::{SpeiArgs, SpiArgs};
use crate::config::DroughtConfig;
use crate::{convert, input, output};

/// Run the SPI pipeline.
pub fn run_spi(args: SpiArgs) -> Result<()> {
    let _cmd = info_span!("spi").entered();
    let cfg = DroughtConfig::load(args.config.as_deref())?;
    let std_cfg = convert::build_standardize_config(&cfg)?;
    let baseline = convert::build_baseline(&cfg.standardize);
    let scales = convert::resolve_scales(&args.scale, &cfg.standardize.scales)?;

    info!(path = %args.input.display(), "reading precipitation");
    let precip = input::read_series(&args.input)?;
    info!(n = precip.len(), missing = precip.n_missing(), "series loaded");

    let indices = compute_scales(&scales, |scale| {
        spi(&precip, scale, baseline.as_ref(), &std_cfg)
            .with_context(|| format!("SPI at scale {scale} failed"))
    })?;
    write_indices("spi", &precip, &std_cfg, &indices)
}

/// Run the SPEI pipeline.
pub fn run_spei(args: SpeiArgs) -> Result<()> {
    let _cmd = info_span!("spei").entered();
    let cfg = DroughtConfig::load(args.config.as_deref())?;
    let std_cfg = convert::build_standardize_config(&cfg)?;
    let baseline = convert::build_baseline(&cfg.standardize);
    let scales = convert::resolve_scales(&args.scale, &cfg.standardize.scales)?;

    info!(precip = %args.precip.display(), pet = %args.pet.display(), "reading inputs");
    let precip = input::read_series(&args.precip)?;
    let pet = input::read_series(&args.pet)?;
    info!(n = precip.len(), "series loaded");

    let indices = compute_scales(&scales, |scale| {
        spei(&precip, &pet, scale, baseline.as_ref(), &std_cfg)
            .with_context(|| format!("SPEI at scale {scale} failed"))
    })?;
    write_indices("spei", &precip, &std_cfg, &indices)
}

/// Computes every scale in parallel, keeping the requested order.
fn compute_scales<F>(scales: &[usize], f: F) -> Result<Vec<StandardizedIndex>>
where
    F: Fn(usize) -> Result<StandardizedIndex> + Sync,
{
    scales.par_iter().map(|&scale| f(scale)).collect()
}

fn write_indices(
    label: &str,
    source: &TimeSeries,
    std_cfg: &StandardizeConfig,
    indices: &[StandardizedIndex],
) -> Result<()> {
    for index in indices {
        log_params(label, index.scale(), index.params(), index.was_fitted());
    }
    info!(family = %std_cfg.family(), n_scales = indices.len(), "indices computed");

    let columns: Vec<(String, Vec<Option<f64>>)> = indices
        .iter()
        .map(|ix| (format!("{label}_{}", ix.scale()), ix.values().to_vec()))
        .collect();
    let stdout = std::io::stdout();
    output::write_columns(stdout.lock(), source.timestamps(), &columns)
        .context("failed to write output")
}

fn log_params(label: &str, scale: usize, p: &DistParams, fitted: bool) {
    info!(
        index = label,
        scale,
        fitted,
        shape = p.shape,
        loc = p.loc,
        scale_param = p.scale,
        "distribution parameters"
    );
}
