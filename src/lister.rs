//! Directory lister: the records currently present in one environment.

use std::io;
use std::path::Path;

use crate::{Environment, FileType, Fs, Record, TmpsError};

/// Enumerate the regular files of `dir` as records of `env`.
///
/// Modes are read at enumeration time. Order is whatever the backend yields.
/// Entries whose names are not valid UTF-8 are skipped with a warning; they
/// could not be addressed by key anyway.
///
/// # Errors
///
/// [`TmpsError::NotADirectory`] if `dir` is missing or not a directory.
pub fn list<B: Fs + ?Sized>(
    backend: &B,
    dir: &Path,
    env: &Environment,
) -> Result<Vec<Record>, TmpsError> {
    let entries = backend.read_dir(dir).map_err(|e| match e {
        TmpsError::NotFound { path } => TmpsError::NotADirectory { path },
        e => e,
    })?;
    let mut records = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(TmpsError::Io { path, source, .. }) if source.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(path = %path.display(), "skipping entry: {source}");
                continue;
            }
            Err(e) => return Err(e),
        };
        if entry.file_type != FileType::File {
            continue;
        }
        let meta = match backend.metadata(&entry.path) {
            Ok(meta) => meta,
            // Removed between enumeration and stat.
            Err(TmpsError::NotFound { .. }) => continue,
            Err(e) => return Err(e),
        };
        records.push(Record::new(env.as_str(), entry.name, meta.mode));
    }
    tracing::debug!(%env, count = records.len(), "listed records");
    Ok(records)
}
