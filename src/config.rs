//! Store configuration: where records live and which environments exist.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::TmpsError;

/// Root directory used when none is configured.
pub const DEFAULT_ROOT: &str = "/tmp/tmps";

/// Environments known out of the box.
pub const DEFAULT_ENVIRONMENTS: [&str; 4] = ["dev", "val", "inf", "fr"];

/// Root directory and the closed set of environments beneath it.
///
/// # Example
///
/// ```rust
/// use tmps::Config;
///
/// let config = Config::new("/srv/tmps").with_environments(["dev", "prod"]);
/// let dev = config.environment("dev").unwrap();
/// assert_eq!(config.env_dir(&dev), std::path::Path::new("/srv/tmps/dev"));
/// assert!(config.environment("val").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: PathBuf,
    environments: Vec<String>,
}

impl Config {
    /// Configuration rooted at `root` with the default environments.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            environments: DEFAULT_ENVIRONMENTS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the environment set.
    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Root directory holding one subdirectory per environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configured environment tags, in configuration order.
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(String::as_str)
    }

    /// Look up an environment tag.
    ///
    /// # Errors
    ///
    /// [`TmpsError::UnknownEnvironment`] if the tag is not configured.
    pub fn environment(&self, tag: &str) -> Result<Environment, TmpsError> {
        if self.environments.iter().any(|e| e == tag) {
            Ok(Environment(tag.to_string()))
        } else {
            Err(TmpsError::UnknownEnvironment(tag.to_string()))
        }
    }

    /// Directory of one environment: `<root>/<env>`.
    pub fn env_dir(&self, env: &Environment) -> PathBuf {
        self.root.join(env.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

/// An environment tag checked against a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment(String);

impl Environment {
    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
