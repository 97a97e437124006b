/// Run configuration — every tunable the walker and evaluator consult.
///
/// Built once at startup (defaults, optionally overlaid by a JSON file and
/// then by command-line flags) and passed by reference into every entry
/// point. Nothing mutates it after construction.
use crate::flags::FlagRule;
use crate::scanner::ExclusionRules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default parent directory holding one subdirectory per tenant volume.
pub const DEFAULT_VOLUMES_DIR: &str = "/var/lib/pterodactyl/volumes/";

/// Files larger than this are tallied but never read (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Deepest nested re-walk permitted; depth 1 is the tenant root.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Errors raised while loading or validating a [`ScanConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory whose immediate subdirectories are the tenant roots.
    pub volumes_dir: PathBuf,
    /// Maximum bytes read from a single file for content inspection.
    pub max_file_size: u64,
    /// Recursion guard for the flagged-subdirectory re-walk.
    pub max_depth: u32,
    /// Directory-name predicates that prune whole subtrees.
    pub exclusions: ExclusionRules,
    /// Extensions (dot included) whose content is handed to the evaluator.
    pub inspect_extensions: Vec<String>,
    /// Flag rules in evaluation order.
    pub rules: Vec<FlagRule>,
    /// Walk independent tenants concurrently.
    pub parallel: bool,
    /// Worker count for parallel runs. `None` means one per CPU.
    pub threads: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            volumes_dir: PathBuf::from(DEFAULT_VOLUMES_DIR),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            exclusions: ExclusionRules::default(),
            inspect_extensions: vec![".js".to_string(), ".py".to_string()],
            rules: FlagRule::defaults(),
            parallel: false,
            threads: None,
        }
    }
}

impl ScanConfig {
    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults, so a file may override only what it cares about.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a walk meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.max_file_size == 0 {
            return Err(ConfigError::Invalid(
                "max_file_size must be greater than zero".into(),
            ));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid("threads must be at least 1".into()));
        }
        if self.inspect_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "inspect_extensions must name at least one extension".into(),
            ));
        }
        Ok(())
    }

    /// Whether a file with this extension has its content evaluated.
    pub fn inspects(&self, ext: &str) -> bool {
        self.inspect_extensions.iter().any(|e| e == ext)
    }

    /// Effective worker count for a parallel run.
    pub fn worker_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}
