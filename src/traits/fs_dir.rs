//! Directory operations for filesystem backends.

use std::path::Path;

use crate::{DirEntry, TmpsError};

/// Directory operations for a filesystem backend.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsDir`.
pub trait FsDir: Send + Sync {
    /// List directory contents.
    ///
    /// Returns an iterator over directory entries. The outer `Result` indicates
    /// whether the directory could be opened; each item's `Result` indicates
    /// whether that specific entry could be read.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotFound`] if the path does not exist
    /// - [`TmpsError::NotADirectory`] if the path is not a directory
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, TmpsError>;

    /// Create a directory and all parent directories.
    ///
    /// This is idempotent - succeeds if the directory already exists.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotADirectory`] if a component of the path exists but is not a directory
    fn create_dir_all(&self, path: &Path) -> Result<(), TmpsError>;
}

/// Iterator over directory entries.
///
/// - Outer `Result` (from [`FsDir::read_dir`]) = "can I open this directory?"
/// - Inner `Result` (per item) = "can I read this entry?"
///
/// Entries come in whatever order the backend enumerates them.
pub struct ReadDirIter(Box<dyn Iterator<Item = Result<DirEntry, TmpsError>> + Send + 'static>);

impl ReadDirIter {
    /// Create from any compatible iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<DirEntry, TmpsError>> + Send + 'static,
    {
        Self(Box::new(iter))
    }

    /// Create from a pre-collected vector.
    pub fn from_vec(entries: Vec<Result<DirEntry, TmpsError>>) -> Self {
        Self(Box::new(entries.into_iter()))
    }
}

impl Iterator for ReadDirIter {
    type Item = Result<DirEntry, TmpsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}
