//! # FloatChat command-line entry point
//!
//! Drives the export library from the shell:
//!
//! ```bash
//! floatchat export -i profiles.json -f csv -f netcdf -c depth="Depth (m)"
//! floatchat report -i profiles.json -t "Float 5904471"
//! floatchat init-config
//! ```
//!
//! Set `RUST_LOG=debug` to see per-export details.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    floatchat::logging::init();

    let cli = cli::Cli::parse();
    cli::run_command(cli.command)
}
