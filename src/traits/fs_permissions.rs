//! Permission management operations.

use std::path::Path;

use crate::{Mode, TmpsError};

/// Permission management operations.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsPermissions`.
///
/// # Note
///
/// Reading permissions is done via [`FsRead::metadata`](super::FsRead::metadata).
/// This trait only provides the ability to set them.
pub trait FsPermissions: Send + Sync {
    /// Set the permission bits of a file or directory (`chmod`).
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotFound`] if the path does not exist
    /// - [`TmpsError::PermissionDenied`] if the caller may not change the mode
    fn set_permissions(&self, path: &Path, mode: Mode) -> Result<(), TmpsError>;
}
