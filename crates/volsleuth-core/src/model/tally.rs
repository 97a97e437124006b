/// Per-subtree extension counting and percentage conversion.
use compact_str::CompactString;
use std::collections::BTreeMap;

/// Extension of a base file name: the suffix starting at the last `.`,
/// dot included. Names without a dot yield `""`.
///
/// A leading-dot name such as `.bashrc` is its own extension, and a
/// trailing dot (`notes.`) yields `"."`.
pub fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) => &name[i..],
        None => "",
    }
}

/// Occurrence counts per extension for one walk invocation.
#[derive(Debug, Default, Clone)]
pub struct ExtensionTally {
    counts: BTreeMap<CompactString, u64>,
    total: u64,
}

impl ExtensionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file by its base name.
    pub fn record(&mut self, file_name: &str) {
        *self
            .counts
            .entry(CompactString::new(file_extension(file_name)))
            .or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of files recorded.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, ext: &str) -> u64 {
        self.counts.get(ext).copied().unwrap_or(0)
    }

    /// Convert counts to percentages of this tally's own total.
    ///
    /// An empty tally yields an empty map rather than dividing by zero.
    pub fn percentages(&self) -> BTreeMap<CompactString, f64> {
        if self.total == 0 {
            return BTreeMap::new();
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|(ext, &count)| (ext.clone(), count as f64 / total * 100.0))
            .collect()
    }
}
