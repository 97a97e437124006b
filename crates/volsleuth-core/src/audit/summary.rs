/// Per-tenant outcomes and the cross-tenant summary of a run.
use crate::model::SubtreeReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What walking one tenant produced.
///
/// `Clean` and `Failed` are deliberately distinct: a tenant whose walk
/// aborted has not been shown to be clean.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TenantOutcome {
    /// At least one file was flagged.
    Flagged(SubtreeReport),
    /// The walk completed and nothing was flagged. Excluded folders are
    /// kept so the folder list still covers every tenant.
    Clean { folder_flags: BTreeSet<PathBuf> },
    /// The walk aborted; partial results were discarded.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantResult {
    pub root: PathBuf,
    #[serde(flatten)]
    pub outcome: TenantOutcome,
}

impl TenantResult {
    pub fn report(&self) -> Option<&SubtreeReport> {
        match &self.outcome {
            TenantOutcome::Flagged(report) => Some(report),
            _ => None,
        }
    }

    /// Excluded folders found by a completed walk, flagged or clean.
    pub fn folder_flags(&self) -> Option<&BTreeSet<PathBuf>> {
        match &self.outcome {
            TenantOutcome::Flagged(report) => Some(&report.folder_flags),
            TenantOutcome::Clean { folder_flags } => Some(folder_flags),
            TenantOutcome::Failed { .. } => None,
        }
    }
}

/// A complete run over one volumes directory.
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub volumes_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per tenant, in sorted path order.
    pub tenants: Vec<TenantResult>,
}

impl AuditSummary {
    /// Tenants with at least one flagged file, with their reports.
    pub fn flagged(&self) -> impl Iterator<Item = (&Path, &SubtreeReport)> {
        self.tenants
            .iter()
            .filter_map(|t| t.report().map(|r| (t.root.as_path(), r)))
    }

    /// Every flagged file across all tenants, with its flags.
    pub fn flagged_files(&self) -> Vec<(&Path, &[String])> {
        self.flagged()
            .flat_map(|(_, report)| {
                report
                    .file_flags
                    .iter()
                    .map(|(path, flags)| (path.as_path(), flags.as_slice()))
            })
            .collect()
    }

    /// Distinct excluded folders across every tenant whose walk completed.
    pub fn excluded_folders(&self) -> BTreeSet<&Path> {
        self.tenants
            .iter()
            .filter_map(TenantResult::folder_flags)
            .flatten()
            .map(PathBuf::as_path)
            .collect()
    }

    /// Tenants whose walk aborted, with the error message.
    pub fn failed(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.tenants.iter().filter_map(|t| match &t.outcome {
            TenantOutcome::Failed { error } => Some((t.root.as_path(), error.as_str())),
            _ => None,
        })
    }

    pub fn has_flags(&self) -> bool {
        self.flagged().next().is_some()
    }

    pub fn clean_count(&self) -> usize {
        self.tenants
            .iter()
            .filter(|t| matches!(t.outcome, TenantOutcome::Clean { .. }))
            .count()
    }
}
