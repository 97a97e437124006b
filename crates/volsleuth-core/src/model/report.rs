/// The result of one walk invocation and the rules for merging a nested
/// invocation's result into its parent.
///
/// Ordered maps keep reports deterministic regardless of traversal order.
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Why a file was tallied but not inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// Larger than the configured read cap.
    TooLarge { size: u64, limit: u64 },
    /// Could not be opened, stat'ed, or read.
    Unreadable { message: String },
}

/// A recoverable per-file problem surfaced alongside the flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWarning {
    pub path: PathBuf,
    #[serde(flatten)]
    pub kind: WarningKind,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtreeReport {
    /// Extension → percentage. Exact percentages of one subtree until a
    /// child is merged in, after which values are summed, not renormalised.
    pub percentages: BTreeMap<CompactString, f64>,
    /// Flagged file path → flags in rule order.
    pub file_flags: BTreeMap<PathBuf, Vec<String>>,
    /// Directories pruned by an exclusion rule.
    pub folder_flags: BTreeSet<PathBuf>,
    /// Files that were tallied but skipped by content inspection.
    pub warnings: BTreeMap<PathBuf, FileWarning>,
}

impl SubtreeReport {
    pub fn is_flagged(&self) -> bool {
        !self.file_flags.is_empty()
    }

    /// Record flags for a path, replacing any previous list wholesale.
    /// Empty lists are never stored.
    pub fn record_flags(&mut self, path: PathBuf, flags: Vec<String>) {
        if !flags.is_empty() {
            self.file_flags.insert(path, flags);
        }
    }

    pub fn record_warning(&mut self, warning: FileWarning) {
        self.warnings.insert(warning.path.clone(), warning);
    }

    /// Fold a nested invocation's result into this one.
    ///
    /// Percentages add per extension, file flags and warnings are a
    /// key-overwrite union, folder flags a set union.
    pub fn merge(&mut self, child: SubtreeReport) {
        for (ext, pct) in child.percentages {
            *self.percentages.entry(ext).or_insert(0.0) += pct;
        }
        self.file_flags.extend(child.file_flags);
        self.folder_flags.extend(child.folder_flags);
        self.warnings.extend(child.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(pct: &[(&str, f64)], flagged: &[&str]) -> SubtreeReport {
        let mut report = SubtreeReport::default();
        for (ext, p) in pct {
            report.percentages.insert(CompactString::new(ext), *p);
        }
        for path in flagged {
            report.record_flags(PathBuf::from(path), vec!["Nezha was detected".into()]);
        }
        report
    }

    #[test]
    fn empty_flag_list_is_not_recorded() {
        let mut report = SubtreeReport::default();
        report.record_flags(PathBuf::from("/v/a.py"), Vec::new());
        assert!(!report.is_flagged());
        assert!(report.file_flags.is_empty());
    }

    /// Merged percentages are summed, so the result can exceed 100.
    #[test]
    fn merge_adds_percentages_without_renormalising() {
        let mut parent = report_with(&[(".py", 50.0), (".js", 50.0)], &[]);
        let child = report_with(&[(".js", 100.0)], &[]);
        parent.merge(child);

        assert_eq!(parent.percentages.get(".py"), Some(&50.0));
        assert_eq!(parent.percentages.get(".js"), Some(&150.0));
    }

    #[test]
    fn merge_introduces_new_extensions() {
        let mut parent = report_with(&[(".py", 100.0)], &[]);
        parent.merge(report_with(&[(".sh", 100.0)], &[]));
        assert_eq!(parent.percentages.get(".sh"), Some(&100.0));
    }

    #[test]
    fn merge_overwrites_flags_by_key() {
        let mut parent = report_with(&[], &["/v/sub/b.js"]);
        let mut child = SubtreeReport::default();
        child.record_flags(
            PathBuf::from("/v/sub/b.js"),
            vec!["Contains references to 'root'".into()],
        );
        child.record_flags(PathBuf::from("/v/sub/c.js"), vec!["x".into()]);
        parent.merge(child);

        assert_eq!(parent.file_flags.len(), 2);
        assert_eq!(
            parent.file_flags[&PathBuf::from("/v/sub/b.js")],
            vec!["Contains references to 'root'"]
        );
    }

    #[test]
    fn merge_unions_folder_flags() {
        let mut parent = SubtreeReport::default();
        parent.folder_flags.insert(PathBuf::from("/v/node_modules"));
        let mut child = SubtreeReport::default();
        child.folder_flags.insert(PathBuf::from("/v/node_modules"));
        child.folder_flags.insert(PathBuf::from("/v/sub/.git"));
        parent.merge(child);

        assert_eq!(parent.folder_flags.len(), 2);
    }

    #[test]
    fn warnings_serialise_flat_with_kind_tag() {
        let warning = FileWarning {
            path: PathBuf::from("/v/big.js"),
            kind: WarningKind::TooLarge { size: 11, limit: 10 },
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "too_large");
        assert_eq!(json["size"], 11);
        assert_eq!(json["path"], "/v/big.js");
    }
}
