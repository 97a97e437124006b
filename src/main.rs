//! VolSleuth — on-demand auditor for multi-tenant volume directories.
//!
//! Thin binary entry point. All logic lives in the `volsleuth-core`
//! and `volsleuth-cli` crates.

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = volsleuth_cli::Args::parse();

    // Structured logging goes to stderr so stdout carries only the report.
    // RUST_LOG, when set, takes precedence over -v.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("VolSleuth starting");

    volsleuth_cli::run(&args)
}
