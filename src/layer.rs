//! # Layer Trait
//!
//! Tower-style middleware composition for backends.
//!
//! ```text
//! Backend ──▶ Layer::layer() ──▶ Wrapped Backend
//! ```
//!
//! Each middleware provides a wrapper struct implementing the backend traits
//! and a [`Layer`] that builds it. [`TracingLayer`] is the one shipped here:
//! it emits a `tracing` event for every filesystem primitive.
//!
//! ```rust
//! use tmps::{LayerExt, NativeFs, TracingLayer};
//!
//! let backend = NativeFs::new().layer(TracingLayer::new());
//! # let _ = backend;
//! ```

use std::path::Path;

use crate::{
    Fs, FsDir, FsPermissions, FsRead, FsWrite, Metadata, Mode, ReadDirIter, TmpsError,
};

/// A layer that wraps a backend to add functionality.
///
/// - `layer(self, backend)` consumes both the layer and backend
/// - The resulting `Backend` type should implement the same traits as `B`
pub trait Layer<B> {
    /// The resulting backend type after applying this layer.
    type Backend;

    /// Wrap the given backend with this layer's functionality.
    fn layer(self, backend: B) -> Self::Backend;
}

/// Extension trait for fluent layer composition.
pub trait LayerExt: Fs + Sized {
    /// Apply a layer to this backend.
    fn layer<L: Layer<Self>>(self, layer: L) -> L::Backend {
        layer.layer(self)
    }
}

impl<B: Fs> LayerExt for B {}

/// Layer producing [`Traced`] backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLayer;

impl TracingLayer {
    /// Create a tracing layer.
    pub fn new() -> Self {
        Self
    }
}

impl<B: Fs> Layer<B> for TracingLayer {
    type Backend = Traced<B>;

    fn layer(self, backend: B) -> Self::Backend {
        Traced { inner: backend }
    }
}

/// Backend wrapper that logs each call at `debug` and each failure at
/// `debug` with the error attached.
#[derive(Debug)]
pub struct Traced<B> {
    inner: B,
}

impl<B> Traced<B> {
    /// The wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

fn traced<T>(op: &'static str, path: &Path, result: Result<T, TmpsError>) -> Result<T, TmpsError> {
    match &result {
        Ok(_) => tracing::debug!(op, path = %path.display(), "ok"),
        Err(e) => tracing::debug!(op, path = %path.display(), error = %e, "failed"),
    }
    result
}

impl<B: FsRead> FsRead for Traced<B> {
    fn exists(&self, path: &Path) -> Result<bool, TmpsError> {
        traced("exists", path, self.inner.exists(path))
    }

    fn metadata(&self, path: &Path) -> Result<Metadata, TmpsError> {
        traced("stat", path, self.inner.metadata(path))
    }
}

impl<B: FsWrite> FsWrite for Traced<B> {
    fn create_file(&self, path: &Path) -> Result<(), TmpsError> {
        traced("create", path, self.inner.create_file(path))
    }

    fn remove_file(&self, path: &Path) -> Result<(), TmpsError> {
        traced("unlink", path, self.inner.remove_file(path))
    }
}

impl<B: FsDir> FsDir for Traced<B> {
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, TmpsError> {
        traced("read_dir", path, self.inner.read_dir(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), TmpsError> {
        traced("mkdir", path, self.inner.create_dir_all(path))
    }
}

impl<B: FsPermissions> FsPermissions for Traced<B> {
    fn set_permissions(&self, path: &Path, mode: Mode) -> Result<(), TmpsError> {
        tracing::trace!(%mode, path = %path.display(), "chmod");
        traced("chmod", path, self.inner.set_permissions(path, mode))
    }
}
