//! Core types for the tmps record store.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::TmpsError;

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Anything else (socket, fifo, device, dangling link).
    Other,
}

/// Metadata for a filesystem entry.
///
/// Symlinks are followed, so a link to a regular file reports
/// [`FileType::File`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Type of the entry.
    pub file_type: FileType,
    /// Permission bits.
    pub mode: Mode,
}

impl Metadata {
    /// Returns `true` if this is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            file_type: FileType::File,
            mode: Mode::default_file(),
        }
    }
}

/// A directory entry returned from `read_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (filename only, not full path).
    pub name: String,
    /// Full path to the entry.
    pub path: PathBuf,
    /// Type of the entry.
    pub file_type: FileType,
}

/// Unix permission bits (`rwxrwxrwx` plus setuid/setgid/sticky).
///
/// Rendered as an octal string with a leading `0`, the way `chmod` accepts
/// it: `0644`, `0755`, `04755`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u32);

impl Mode {
    /// Create a mode from raw bits (e.g., `0o755`). File type bits are dropped.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0o7777)
    }

    /// Get the raw permission bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Default mode for a fresh placeholder (0o644 = rw-r--r--).
    #[inline]
    pub const fn default_file() -> Self {
        Self(0o644)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::default_file()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0{:03o}", self.0)
    }
}

impl FromStr for Mode {
    type Err = TmpsError;

    /// Parse an octal mode string. This only checks that the text is octal;
    /// the record pattern is enforced by [`crate::validate`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 5 || !s.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(TmpsError::InvalidMode(s.to_string()));
        }
        u32::from_str_radix(s, 8)
            .map(Self::from_bits)
            .map_err(|_| TmpsError::InvalidMode(s.to_string()))
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One placeholder file: its environment, name and permission bits.
///
/// Fields are declared in key order so serialization is already sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Environment the record lives in.
    pub env: String,
    /// Permission bits of the file.
    pub mode: Mode,
    /// File name, unique within the environment.
    pub name: String,
}

impl Record {
    /// Create a record descriptor.
    pub fn new(env: impl Into<String>, name: impl Into<String>, mode: Mode) -> Self {
        Self {
            env: env.into(),
            mode,
            name: name.into(),
        }
    }
}
