/// Bounded directory walker — tallies extensions, prunes excluded
/// directories, inspects candidate files, and re-walks flagged
/// subdirectories up to the configured depth.
///
/// # Re-walk merge
///
/// After a subtree has been traversed, every flagged file that lives in a
/// strict subdirectory of the walk root triggers a fresh walk of that
/// file's directory at `depth + 1`. The nested result is merged into the
/// parent: percentages add per extension, flags and folders union. This
/// re-reads subtrees that were already visited and produces summed
/// percentages that can exceed 100; the report format depends on it.
///
/// One re-walk happens per flagged file, so two flagged files in the same
/// directory merge that directory's distribution twice.
use super::error::{ReadError, WalkError};
use super::read::read_with_limit;
use crate::config::ScanConfig;
use crate::flags::FlagEvaluator;
use crate::model::{file_extension, ExtensionTally, FileWarning, SubtreeReport, WarningKind};
use jwalk::{Parallelism, WalkDir};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Walks tenant trees according to a [`ScanConfig`].
///
/// Holds no per-walk state, so one walker can serve many roots, including
/// from several threads at once.
pub struct Walker<'a> {
    config: &'a ScanConfig,
    evaluator: FlagEvaluator,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self {
            config,
            evaluator: FlagEvaluator::new(config.rules.clone()),
        }
    }

    /// Walk `root` at the given depth (1 for a tenant root).
    ///
    /// Beyond `max_depth` this returns an empty report rather than an
    /// error. Any traversal error, including one in a nested re-walk,
    /// discards the whole result for this root.
    pub fn walk(&self, root: &Path, depth: u32) -> Result<SubtreeReport, WalkError> {
        if depth > self.config.max_depth {
            trace!(
                "Depth {depth} exceeds limit {} at {}; not descending",
                self.config.max_depth,
                root.display()
            );
            return Ok(SubtreeReport::default());
        }
        if !root.is_dir() {
            return Err(WalkError::NotADirectory(root.to_path_buf()));
        }

        let mut report = self.scan_subtree(root)?;

        // Snapshot the triggers before merging so nested results cannot
        // trigger further re-walks at this level.
        let nested: Vec<PathBuf> = report
            .file_flags
            .keys()
            .filter_map(|path| path.parent())
            .filter(|dir| *dir != root)
            .map(Path::to_path_buf)
            .collect();

        for dir in nested {
            let child = self.walk(&dir, depth + 1)?;
            report.merge(child);
        }

        Ok(report)
    }

    /// Single traversal of `root`: tally, prune, inspect. No re-walks.
    fn scan_subtree(&self, root: &Path) -> Result<SubtreeReport, WalkError> {
        let start = Instant::now();
        let traversal_error = |message: String| WalkError::Traversal {
            root: root.to_path_buf(),
            message,
        };

        let exclusions = self.config.exclusions.clone();
        let walker = WalkDir::new(root)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(Parallelism::Serial)
            .process_read_dir(move |read_dir_depth, _dir, _state, children| {
                // `None` is the synthetic read holding only the root entry.
                if read_dir_depth.is_none() {
                    return;
                }
                // Pruned directories are still yielded (so they can be
                // recorded) but their contents are never read.
                for child in children.iter_mut().flatten() {
                    if child.file_type.is_dir() && exclusions.excludes(&child.file_name) {
                        child.read_children_path = None;
                    }
                }
            });

        let mut tally = ExtensionTally::new();
        let mut report = SubtreeReport::default();

        for entry_result in walker {
            let entry = entry_result.map_err(|err| traversal_error(err.to_string()))?;
            if let Some(err) = &entry.read_children_error {
                return Err(traversal_error(err.to_string()));
            }
            if entry.depth == 0 {
                continue;
            }

            let path = entry.path();

            if entry.file_type.is_dir() {
                if self.config.exclusions.excludes(&entry.file_name) {
                    debug!("Excluded directory {}", path.display());
                    report.folder_flags.insert(path);
                }
                continue;
            }

            let name = entry.file_name.to_string_lossy();
            tally.record(&name);

            if self.config.inspects(file_extension(&name)) {
                self.inspect_file(path, &mut report);
            }
        }

        report.percentages = tally.percentages();

        debug!(
            "Walked {}: {} files, {} flagged, {} excluded dirs in {:?}",
            root.display(),
            tally.total(),
            report.file_flags.len(),
            report.folder_flags.len(),
            start.elapsed()
        );

        Ok(report)
    }

    /// Read a candidate file under the size cap and record its flags.
    ///
    /// Failures are warnings: the file has already been tallied.
    fn inspect_file(&self, path: PathBuf, report: &mut SubtreeReport) {
        match read_with_limit(&path, self.config.max_file_size) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                let flags = self.evaluator.evaluate(&content, &path);
                report.record_flags(path, flags);
            }
            Err(ReadError::TooLarge { size, limit, .. }) => {
                warn!(
                    "Skipping {}: {size} bytes exceeds the {limit} byte read limit",
                    path.display()
                );
                report.record_warning(FileWarning {
                    path,
                    kind: WarningKind::TooLarge { size, limit },
                });
            }
            Err(err) => {
                warn!("{err}");
                report.record_warning(FileWarning {
                    path,
                    kind: WarningKind::Unreadable {
                        message: err.to_string(),
                    },
                });
            }
        }
    }
}
