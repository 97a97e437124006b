/// Data model for walk results.
///
/// Re-exports the extension tally and the mergeable per-subtree report.
pub mod report;
pub mod tally;

pub use report::{FileWarning, SubtreeReport, WarningKind};
pub use tally::{file_extension, ExtensionTally};
