/// VolSleuth Core — walking, flagging, and audit orchestration.
///
/// This crate contains all business logic with zero terminal dependencies.
/// Rendering and export live in the frontend crate.
///
/// # Modules
///
/// - [`config`] — Immutable run configuration and its JSON loader.
/// - [`flags`] — Ordered content/path heuristics that flag a file.
/// - [`model`] — Extension tallies and mergeable per-subtree reports.
/// - [`scanner`] — Bounded, depth-limited walker with re-walk merging.
/// - [`audit`] — Tenant enumeration and the cross-tenant summary.
pub mod audit;
pub mod config;
pub mod flags;
pub mod model;
pub mod scanner;

pub use audit::{audit_volumes, AuditError, AuditSummary, TenantOutcome, TenantResult};
pub use config::{ConfigError, ScanConfig};
pub use flags::{FlagEvaluator, FlagRule};
pub use model::SubtreeReport;
pub use scanner::{WalkError, Walker};
