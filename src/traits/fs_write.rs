//! Write operations for filesystem backends.

use std::path::Path;

use crate::TmpsError;

/// Write operations for a filesystem backend.
///
/// Records never carry content, so the only writes are creating an empty
/// file and removing one.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsWrite`.
pub trait FsWrite: Send + Sync {
    /// Create an empty file, failing if anything already exists at `path`.
    ///
    /// Creation is exclusive (`O_CREAT | O_EXCL` on native backends): of two
    /// concurrent callers, exactly one succeeds.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::AlreadyExists`] if the path already exists
    /// - [`TmpsError::NotFound`] if the parent directory does not exist
    fn create_file(&self, path: &Path) -> Result<(), TmpsError>;

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotFound`] if the file does not exist
    fn remove_file(&self, path: &Path) -> Result<(), TmpsError>;
}
