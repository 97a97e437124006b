/// Audit orchestration — enumerates tenant roots under the volumes
/// directory, walks each one, and collects the outcomes into an
/// [`AuditSummary`].
///
/// Tenants share no state, so a parallel run on a dedicated `rayon` pool
/// yields exactly the same per-tenant results (in the same order) as a
/// sequential one.
pub mod summary;

pub use summary::{AuditSummary, TenantOutcome, TenantResult};

use crate::config::ScanConfig;
use crate::scanner::Walker;
use chrono::Utc;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

/// Run-level failures. Anything scoped to a single tenant is recorded in
/// its [`TenantOutcome`] instead.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("error reading volumes directory {path}: {source}")]
    VolumesUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// List the tenant roots: the immediate subdirectories of `volumes_dir`,
/// sorted by path. Symlinks and plain files are not tenants.
pub fn list_tenants(volumes_dir: &Path) -> Result<Vec<PathBuf>, AuditError> {
    let unreadable = |source| AuditError::VolumesUnreadable {
        path: volumes_dir.to_path_buf(),
        source,
    };

    let mut tenants = Vec::new();
    for entry in fs::read_dir(volumes_dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if entry.file_type().map_err(unreadable)?.is_dir() {
            tenants.push(entry.path());
        }
    }
    tenants.sort();
    Ok(tenants)
}

/// Walk one tenant from depth 1 and classify the result.
pub fn audit_tenant(walker: &Walker<'_>, root: &Path) -> TenantResult {
    let outcome = match walker.walk(root, 1) {
        Ok(report) if report.is_flagged() => TenantOutcome::Flagged(report),
        Ok(report) => TenantOutcome::Clean {
            folder_flags: report.folder_flags,
        },
        Err(err) => {
            warn!("{err}");
            TenantOutcome::Failed {
                error: err.to_string(),
            }
        }
    };
    TenantResult {
        root: root.to_path_buf(),
        outcome,
    }
}

/// Audit every tenant under `config.volumes_dir`.
///
/// Fails only if the volumes directory itself cannot be listed; no tenant
/// is walked in that case.
pub fn audit_volumes(config: &ScanConfig) -> Result<AuditSummary, AuditError> {
    let start = Instant::now();
    let started_at = Utc::now();

    let tenants = list_tenants(&config.volumes_dir).inspect_err(|err| error!("{err}"))?;
    info!(
        "Auditing {} volumes under {}",
        tenants.len(),
        config.volumes_dir.display()
    );

    let walker = Walker::new(config);
    let results: Vec<TenantResult> = if config.parallel {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads())
            .thread_name(|i| format!("volsleuth-walker-{i}"))
            .build()?;
        pool.install(|| {
            tenants
                .par_iter()
                .map(|root| audit_tenant(&walker, root))
                .collect()
        })
    } else {
        tenants
            .iter()
            .map(|root| audit_tenant(&walker, root))
            .collect()
    };

    let summary = AuditSummary {
        volumes_dir: config.volumes_dir.clone(),
        started_at,
        finished_at: Utc::now(),
        tenants: results,
    };

    info!(
        "Audit complete in {:?}: {} flagged, {} clean, {} failed",
        start.elapsed(),
        summary.flagged().count(),
        summary.clean_count(),
        summary.failed().count()
    );

    Ok(summary)
}
