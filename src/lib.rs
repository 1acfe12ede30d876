//! # tmps
//!
//! List, create, update and delete **permission-tagged placeholder files**
//! kept in one directory per environment (`/tmp/tmps/<env>/` by default).
//!
//! A record is `{env, mode, name}`: the file `<root>/<env>/<name>` is always
//! empty, and its POSIX permission bits *are* the mode.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tmps::{Action, Config, NativeFs, Request, Session};
//!
//! let session = Session::open(NativeFs::new(), Config::default(), "dev")?;
//! let post = Request::new(
//!     Action::Post,
//!     Some(r#"{"env":"dev","mode":"0644","name":"Maurice"}"#.into()),
//!     None,
//! );
//! let outcome = session.execute(&post)?;
//! println!("{}", outcome.to_json()?.unwrap_or_default());
//! # Ok::<(), tmps::TmpsError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Session`] | One invocation: environment + store, runs a [`Request`] |
//! | [`RecordStore`] | Create/read/update/delete/list records over an [`Fs`] backend |
//! | [`Config`] | Root directory and the closed set of environments |
//! | [`Record`] | `{env, mode, name}` |
//! | [`Mode`] | Permission bits, rendered `0644` |
//! | [`TmpsError`] | Error type with context, classified by [`ErrorKind`] |
//!
//! ---
//!
//! ## Backends
//!
//! The store only needs four traits ([`FsRead`], [`FsWrite`], [`FsDir`],
//! [`FsPermissions`]), composed into [`Fs`]. [`NativeFs`] implements them
//! over `std::fs`; tests can supply an in-memory backend. Wrap any backend
//! with [`TracingLayer`] to log every filesystem call.
//!
//! ---
//!
//! ## Error Handling
//!
//! Every operation returns `Result<T, TmpsError>`. Nothing in the library
//! prints or exits; the `tmps` binary turns an error into
//! `Error in tmps : <message> ; exit 1` and exit status 1.

// Private modules
mod config;
mod error;
mod ext;
mod layer;
mod native;
mod store;
mod traits;
mod types;

// Public modules
pub mod dispatch;
pub mod lister;
pub mod logging;
pub mod validate;

// Public re-exports - error types
pub use error::{ErrorKind, TmpsError};

// Public re-exports - core types
pub use config::{Config, DEFAULT_ENVIRONMENTS, DEFAULT_ROOT, Environment};
pub use types::{DirEntry, FileType, Metadata, Mode, Record};

// Public re-exports - backend traits
pub use traits::{Fs, FsDir, FsPermissions, FsRead, FsWrite, ReadDirIter};

// Public re-exports - backends and infrastructure
pub use ext::FsExt;
pub use layer::{Layer, LayerExt, Traced, TracingLayer};
pub use native::NativeFs;

// Public re-exports - store and dispatcher
pub use dispatch::{Action, Outcome, Request, Session};
pub use store::RecordStore;
