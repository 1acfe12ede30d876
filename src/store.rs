//! Record store: one zero-byte file per record under `<root>/<env>/`.
//!
//! The file name is the record name; the file's permission bits are the
//! record mode. Nothing else is stored.
//!
//! # Concurrency
//!
//! Creation is exclusive, so two processes racing to create the same record
//! cannot both succeed. Update and delete check existence first and then act;
//! a record removed by another process in between surfaces as `NotFound` from
//! the second step. No locking spans separate invocations.

use std::path::PathBuf;

use crate::{Config, Environment, Fs, FsExt, Mode, Record, TmpsError, lister, validate};

/// Filesystem-backed record store for a [`Config`].
///
/// # Example
///
/// ```rust,no_run
/// use tmps::{Config, Mode, NativeFs, RecordStore};
///
/// let store = RecordStore::open(NativeFs::new(), Config::default())?;
/// let dev = store.config().environment("dev")?;
/// store.create(&dev, "Maurice", Mode::from_bits(0o644))?;
/// assert_eq!(store.read(&dev, "Maurice")?.mode.to_string(), "0644");
/// # Ok::<(), tmps::TmpsError>(())
/// ```
#[derive(Debug)]
pub struct RecordStore<B> {
    backend: B,
    config: Config,
}

impl<B: Fs> RecordStore<B> {
    /// Open a store, creating the directory of every configured environment.
    ///
    /// Idempotent: existing directories are left alone.
    ///
    /// # Errors
    ///
    /// Any backend failure while creating directories.
    pub fn open(backend: B, config: Config) -> Result<Self, TmpsError> {
        for tag in config.environments() {
            let dir = config.root().join(tag);
            backend.create_dir_all(&dir)?;
            tracing::trace!(dir = %dir.display(), "environment directory ready");
        }
        Ok(Self { backend, config })
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give the backend back, dropping the store.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn record_path(&self, env: &Environment, name: &str) -> Result<PathBuf, TmpsError> {
        validate::check_key(name)?;
        Ok(self.config.env_dir(env).join(name))
    }

    /// Returns `true` if a regular file backs the record.
    pub fn exists(&self, env: &Environment, name: &str) -> Result<bool, TmpsError> {
        let path = self.record_path(env, name)?;
        self.backend.is_file(&path)
    }

    /// Create a record: an empty file with permission bits `mode`.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::AlreadyExists`] if the record exists
    /// - backend failures while creating the file or changing its mode
    pub fn create(&self, env: &Environment, name: &str, mode: Mode) -> Result<Record, TmpsError> {
        let path = self.record_path(env, name)?;
        if self.backend.exists(&path)? {
            return Err(TmpsError::AlreadyExists {
                path,
                operation: "post",
            });
        }
        self.backend.create_file(&path)?;
        self.backend.set_permissions(&path, mode)?;
        tracing::info!(%env, name, %mode, "record created");
        Ok(Record::new(env.as_str(), name, mode))
    }

    /// Change the permission bits of an existing record.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotFound`] if the record does not exist
    pub fn update(&self, env: &Environment, name: &str, mode: Mode) -> Result<Record, TmpsError> {
        let path = self.record_path(env, name)?;
        if !self.backend.is_file(&path)? {
            return Err(TmpsError::NotFound { path });
        }
        self.backend.set_permissions(&path, mode)?;
        tracing::info!(%env, name, %mode, "record updated");
        Ok(Record::new(env.as_str(), name, mode))
    }

    /// Read a record's current permission bits.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotFound`] if the record does not exist
    pub fn read(&self, env: &Environment, name: &str) -> Result<Record, TmpsError> {
        let path = self.record_path(env, name)?;
        let meta = self.backend.metadata(&path)?;
        if !meta.is_file() {
            return Err(TmpsError::NotFound { path });
        }
        Ok(Record::new(env.as_str(), name, meta.mode))
    }

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotFound`] if the record does not exist
    /// - backend failures while unlinking
    pub fn delete(&self, env: &Environment, name: &str) -> Result<(), TmpsError> {
        let path = self.record_path(env, name)?;
        if !self.backend.is_file(&path)? {
            return Err(TmpsError::NotFound { path });
        }
        self.backend.remove_file(&path)?;
        tracing::info!(%env, name, "record deleted");
        Ok(())
    }

    /// List every record of an environment, in enumeration order.
    ///
    /// # Errors
    ///
    /// - [`TmpsError::NotADirectory`] if the environment directory is missing
    pub fn list(&self, env: &Environment) -> Result<Vec<Record>, TmpsError> {
        lister::list(&self.backend, &self.config.env_dir(env), env)
    }
}
