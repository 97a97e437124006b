/// Scanner module — the bounded, depth-limited directory walker.
///
/// A walk is a single serial `jwalk` traversal of one root. Each walk:
/// - prunes directories matched by [`ExclusionRules`] before reading them,
/// - tallies every non-directory entry by extension,
/// - reads candidate files under a size cap and evaluates their flags,
/// - re-walks subdirectories that contained flagged files, merging the
///   nested results into its own.
///
/// Walks never share state, so independent roots may be walked from
/// different threads.
pub mod error;
pub mod exclude;
pub mod read;
pub mod walker;

pub use error::{ReadError, WalkError};
pub use exclude::ExclusionRules;
pub use read::read_with_limit;
pub use walker::Walker;
