/// VolSleuth CLI — command-line frontend.
///
/// This crate parses arguments, runs the audit, and renders the result.
/// Business logic lives in `volsleuth-core`.
pub mod args;
pub mod render;

pub use args::{Args, OutputFormat};

use anyhow::Context;
use std::io::{self, Write};
use tracing::debug;
use volsleuth_core::audit_volumes;

/// Run an audit and write the result to stdout in the requested format.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run an audit and write the result to `out`.
///
/// Only an unusable configuration or an unreadable volumes directory is an
/// error; per-tenant failures are part of the rendered output.
pub fn execute(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let config = args.to_config().context("loading configuration")?;
    debug!("Effective configuration: {config:?}");
    let summary = audit_volumes(&config)?;

    match args.format {
        OutputFormat::Text => render::text::write_audit(out, &summary)?,
        OutputFormat::Json => render::export::write_json(out, &summary)?,
        OutputFormat::Csv => render::export::write_csv(out, &summary)?,
    }
    Ok(())
}
