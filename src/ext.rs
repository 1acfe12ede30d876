//! # Extension Traits
//!
//! Convenience methods layered on top of the core backend traits.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`is_file`](FsExt::is_file) | Check if path is a regular file |
//! | [`is_dir`](FsExt::is_dir) | Check if path is a directory |

use std::path::Path;

use crate::{FsRead, TmpsError};

/// Extension methods for any backend that can read metadata.
///
/// # Example
///
/// ```rust
/// use tmps::{FsExt, FsRead, TmpsError};
/// use std::path::Path;
///
/// fn placeholder_present<B: FsRead>(backend: &B) -> Result<bool, TmpsError> {
///     backend.is_file(Path::new("/tmp/tmps/dev/Maurice"))
/// }
/// ```
pub trait FsExt: FsRead {
    /// Check if the path points to a regular file.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    /// Returns `Err` only for actual I/O errors (permission denied, etc.).
    fn is_file(&self, path: &Path) -> Result<bool, TmpsError> {
        match self.metadata(path) {
            Ok(m) => Ok(m.is_file()),
            Err(TmpsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_dir(&self, path: &Path) -> Result<bool, TmpsError> {
        match self.metadata(path) {
            Ok(m) => Ok(m.is_dir()),
            Err(TmpsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<B: FsRead + ?Sized> FsExt for B {}
