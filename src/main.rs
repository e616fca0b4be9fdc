mod cli;
mod config;
mod convert;
mod input;
mod logging;
mod output;
mod pdsi_cmd;
mod spi_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Spi(args) => spi_cmd::run_spi(args),
        Command::Spei(args) => spi_cmd::run_spei(args),
        Command::Pdsi(args) => pdsi_cmd::run(args),
    }
}
