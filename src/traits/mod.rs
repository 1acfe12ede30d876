//! # Filesystem Traits
//!
//! The handful of filesystem primitives the record store needs, split the
//! way a backend would implement them:
//!
//! | Trait | Operations |
//! |-------|------------|
//! | [`FsRead`] | `exists`, `metadata` (stat) |
//! | [`FsWrite`] | `create_file` (exclusive touch), `remove_file` (unlink) |
//! | [`FsDir`] | `read_dir`, `create_dir_all` (mkdir -p) |
//! | [`FsPermissions`] | `set_permissions` (chmod) |
//!
//! [`Fs`] is the composite of all four and has a blanket implementation:
//! implement the component traits and you get `Fs` for free.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`. Methods take `&self`.
//!
//! ## Object Safety
//!
//! All traits are object-safe:
//!
//! ```rust
//! use tmps::{Fs, FsRead};
//!
//! fn probe(fs: &dyn Fs) -> bool {
//!     fs.exists(std::path::Path::new("/tmp/tmps")).unwrap_or(false)
//! }
//! ```

mod fs_dir;
mod fs_permissions;
mod fs_read;
mod fs_write;

pub use fs_dir::{FsDir, ReadDirIter};
pub use fs_permissions::FsPermissions;
pub use fs_read::FsRead;
pub use fs_write::FsWrite;

/// Everything the record store needs from a backend.
///
/// Blanket-implemented for any type implementing the component traits.
pub trait Fs: FsRead + FsWrite + FsDir + FsPermissions {}

impl<T: FsRead + FsWrite + FsDir + FsPermissions> Fs for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_is_object_safe() {
        fn _check(_: &dyn Fs) {}
    }

    #[test]
    fn fs_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: Fs>() {
            _assert_send_sync::<T>();
        }
    }
}
