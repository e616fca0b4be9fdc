use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Standardized drought indices and self-calibrated PDSI.
#[derive(Parser)]
#[command(
    name = "drought",
    version,
    about = "Standardized drought indices (SPI, SPEI) and self-calibrated PDSI"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Standardized Precipitation Index.
    Spi(SpiArgs),
    /// Standardized Precipitation-Evapotranspiration Index.
    Spei(SpeiArgs),
    /// Calibrate the linear water-balance PDSI model against a target.
    Pdsi(PdsiArgs),
}

/// Arguments for the `spi` subcommand.
#[derive(clap::Args)]
pub struct SpiArgs {
    /// Precipitation series (one `value` or `YYYY-MM-DD,value` per line).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Aggregation scale; repeat for several. Overrides the config scales.
    #[arg(short, long)]
    pub scale: Vec<usize>,
}

/// Arguments for the `spei` subcommand.
#[derive(clap::Args)]
pub struct SpeiArgs {
    /// Precipitation series.
    #[arg(long)]
    pub precip: PathBuf,

    /// Potential evapotranspiration series, aligned with `--precip`.
    #[arg(long)]
    pub pet: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Aggregation scale; repeat for several. Overrides the config scales.
    #[arg(short, long)]
    pub scale: Vec<usize>,
}

/// Arguments for the `pdsi` subcommand.
#[derive(clap::Args)]
pub struct PdsiArgs {
    /// CSV with header `precip,temp,soil_moisture,target`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
