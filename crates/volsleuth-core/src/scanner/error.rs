/// Walker and reader error types.
use std::path::PathBuf;
use thiserror::Error;

/// Aborts a whole walk invocation; partial results are discarded.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("walk root {0} is not a readable directory")]
    NotADirectory(PathBuf),
    #[error("error walking directory {root}: {message}")]
    Traversal { root: PathBuf, message: String },
}

/// A per-file failure. The file is still tallied, just not inspected.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{0} is not a regular file")]
    NotRegular(PathBuf),
    #[error("file {path} is too large (size: {size} bytes, limit: {limit} bytes)")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("error reading file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
