//! PDSI command: calibrate the linear water-balance model against a target.

use std::io::Write;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use drought_calibrate::{Calibration, PdsiInputs, self_calibrated_pdsi};

use crate::cli::PdsiArgs;
use crate::config::DroughtConfig;
use crate::{convert, input, output};

const COLUMNS: [&str; 4] = ["precip", "temp", "soil_moisture", "target"];

/// Run the self-calibrated PDSI pipeline.
pub fn run(args: PdsiArgs) -> Result<()> {
    let _cmd = info_span!("pdsi").entered();
    let cfg = DroughtConfig::load(args.config.as_deref())?;
    let cal_cfg = convert::build_calibration_config(&cfg.calibrate)?;
    let initial = convert::build_initial(&cfg.calibrate);

    info!(path = %args.input.display(), "reading drivers and target");
    let table = input::read_table(&args.input, &COLUMNS)?;
    let [precip, temp, soil_moisture, target]: [Vec<f64>; 4] = table
        .try_into()
        .map_err(|_| anyhow!("expected {} columns", COLUMNS.len()))?;
    info!(n = target.len(), "table loaded");

    let inputs = PdsiInputs {
        precip: &precip,
        temp: &temp,
        soil_moisture: &soil_moisture,
    };
    let fit = self_calibrated_pdsi(&inputs, &target, &initial, &cal_cfg)
        .context("PDSI calibration failed")?;
    info!(
        cost = fit.cost(),
        rmse = fit.rmse(),
        iterations = fit.iterations(),
        "calibration finished"
    );

    let stdout = std::io::stdout();
    write_result(stdout.lock(), &target, &fit).context("failed to write output")
}

/// Coefficients as `#` comment lines, then the target and reconstruction.
fn write_result<W: Write>(mut out: W, target: &[f64], fit: &Calibration) -> Result<()> {
    for (name, value) in fit.params().iter() {
        writeln!(out, "# {name} = {value}")?;
    }
    writeln!(out, "# rmse = {}", fit.rmse())?;
    if let Some(r) = fit.correlation() {
        writeln!(out, "# correlation = {r}")?;
    }

    let columns: [(String, Vec<Option<f64>>); 2] = [
        ("target".to_string(), target.iter().copied().map(Some).collect()),
        (
            "pdsi".to_string(),
            fit.reconstructed().iter().copied().map(Some).collect(),
        ),
    ];
    output::write_columns(out, None, &columns)
}
