//! Backend over the host filesystem (`std::fs`).
//!
//! Unix only: permission bits are read and written through
//! [`std::os::unix::fs::PermissionsExt`].

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::{
    DirEntry, FileType, FsDir, FsPermissions, FsRead, FsWrite, Metadata, Mode, ReadDirIter,
    TmpsError,
};

/// Host filesystem backend. Paths are used as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl NativeFs {
    /// Create a native backend.
    pub fn new() -> Self {
        Self
    }
}

fn file_type_of(ft: fs::FileType) -> FileType {
    if ft.is_file() {
        FileType::File
    } else if ft.is_dir() {
        FileType::Directory
    } else {
        FileType::Other
    }
}

impl FsRead for NativeFs {
    fn exists(&self, path: &Path) -> Result<bool, TmpsError> {
        path.try_exists()
            .map_err(|e| TmpsError::from_io("stat", path, e))
    }

    fn metadata(&self, path: &Path) -> Result<Metadata, TmpsError> {
        let meta = fs::metadata(path).map_err(|e| TmpsError::from_io("stat", path, e))?;
        Ok(Metadata {
            file_type: file_type_of(meta.file_type()),
            mode: Mode::from_bits(meta.permissions().mode()),
        })
    }
}

impl FsWrite for NativeFs {
    fn create_file(&self, path: &Path) -> Result<(), TmpsError> {
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(drop)
            .map_err(|e| TmpsError::from_io("create", path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), TmpsError> {
        fs::remove_file(path).map_err(|e| TmpsError::from_io("delete", path, e))
    }
}

impl FsDir for NativeFs {
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, TmpsError> {
        let meta = fs::metadata(path).map_err(|e| TmpsError::from_io("read_dir", path, e))?;
        if !meta.is_dir() {
            return Err(TmpsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        let dir = path.to_path_buf();
        let entries = fs::read_dir(path).map_err(|e| TmpsError::from_io("read_dir", path, e))?;
        Ok(ReadDirIter::new(entries.map(move |entry| {
            let entry = entry.map_err(|e| TmpsError::from_io("read_dir", &dir, e))?;
            let entry_path = entry.path();
            // Follow symlinks, as stat would; dangling links become Other.
            let file_type = match fs::metadata(&entry_path) {
                Ok(meta) => file_type_of(meta.file_type()),
                Err(_) => FileType::Other,
            };
            let name = entry.file_name().into_string().map_err(|raw| TmpsError::Io {
                operation: "read_dir",
                path: entry_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("file name is not valid UTF-8: {raw:?}"),
                ),
            })?;
            Ok(DirEntry {
                name,
                path: entry_path,
                file_type,
            })
        })))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), TmpsError> {
        fs::create_dir_all(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists | std::io::ErrorKind::NotADirectory => {
                TmpsError::NotADirectory {
                    path: path.to_path_buf(),
                }
            }
            _ => TmpsError::from_io("mkdir", path, e),
        })
    }
}

impl FsPermissions for NativeFs {
    fn set_permissions(&self, path: &Path, mode: Mode) -> Result<(), TmpsError> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
            .map_err(|e| TmpsError::from_io("chmod", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsExt;

    #[test]
    fn create_set_and_stat_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("placeholder");
        let fs = NativeFs::new();

        fs.create_file(&path).unwrap();
        fs.set_permissions(&path, Mode::from_bits(0o640)).unwrap();

        let meta = fs.metadata(&path).unwrap();
        assert!(meta.is_file());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(meta.mode, Mode::from_bits(0o640));
    }

    #[test]
    fn create_file_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twice");
        let fs = NativeFs::new();

        fs.create_file(&path).unwrap();
        let err = fs.create_file(&path).unwrap_err();
        assert!(matches!(err, TmpsError::AlreadyExists { .. }));
    }

    #[test]
    fn remove_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = NativeFs.remove_file(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, TmpsError::NotFound { .. }));
    }

    #[test]
    fn read_dir_reports_types() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFs::new();
        fs.create_file(&dir.path().join("file")).unwrap();
        fs.create_dir_all(&dir.path().join("sub")).unwrap();

        let mut entries: Vec<DirEntry> = fs
            .read_dir(dir.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "file");
        assert_eq!(entries[0].file_type, FileType::File);
        assert_eq!(entries[1].name, "sub");
        assert_eq!(entries[1].file_type, FileType::Directory);
    }

    #[test]
    fn read_dir_on_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file");
        NativeFs.create_file(&path).unwrap();
        assert!(matches!(
            NativeFs.read_dir(&path),
            Err(TmpsError::NotADirectory { .. })
        ));
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b");
        NativeFs.create_dir_all(&path).unwrap();
        NativeFs.create_dir_all(&path).unwrap();
        assert!(NativeFs.is_dir(&path).unwrap());
    }
}
