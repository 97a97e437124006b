/// Command-line arguments and their overlay onto [`ScanConfig`].
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use volsleuth_core::{ConfigError, ScanConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable per-volume reports followed by a summary.
    Text,
    /// The full audit summary as pretty-printed JSON.
    Json,
    /// One `volume,path,flag` row per flag.
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "volsleuth", version)]
#[command(about = "Audit tenant volume directories for their language mix and suspicious files", long_about = None)]
pub struct Args {
    /// Directory containing one subdirectory per tenant volume
    #[arg(long)]
    pub volumes_dir: Option<PathBuf>,

    /// JSON configuration file; flags given here override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum nested re-walk depth (tenant root is depth 1)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Largest file, in bytes, whose content is inspected
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Walk volumes concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for --parallel (defaults to one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Defaults, then the config file, then explicit flags.
    pub fn to_config(&self) -> Result<ScanConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)?,
            None => ScanConfig::default(),
        };

        if let Some(dir) = &self.volumes_dir {
            config.volumes_dir = dir.clone();
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(size) = self.max_file_size {
            config.max_file_size = size;
        }
        if self.parallel {
            config.parallel = true;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }

        config.validate()?;
        Ok(config)
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
