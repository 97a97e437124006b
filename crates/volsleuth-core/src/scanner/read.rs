/// Size-capped file reading for content inspection.
use super::error::ReadError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read at most `limit` bytes of a regular file.
///
/// The size is checked before opening so special files (FIFOs, devices)
/// are refused instead of blocking. The read itself is also bounded in
/// case the file grows between the stat and the read.
pub fn read_with_limit(path: &Path, limit: u64) -> Result<Vec<u8>, ReadError> {
    let io_err = |source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(path).map_err(io_err)?;
    if !meta.is_file() {
        return Err(ReadError::NotRegular(path.to_path_buf()));
    }
    if meta.len() > limit {
        return Err(ReadError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit,
        });
    }

    let file = File::open(path).map_err(io_err)?;
    // `meta.len()` is already within `limit`; a file that grows is caught below.
    let mut buf = Vec::with_capacity(usize::try_from(meta.len()).unwrap_or(0));
    file.take(limit.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(io_err)?;
    if buf.len() as u64 > limit {
        return Err(ReadError::TooLarge {
            path: path.to_path_buf(),
            size: buf.len() as u64,
            limit,
        });
    }
    Ok(buf)
}
