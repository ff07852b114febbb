//! Database location and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SLOTBOOK_DATA_DIR";

/// File name of the calendar database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "slotbook.db";

/// Default wait for a locked database.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Parameters for opening the calendar database.
///
/// # Examples
///
/// ```
/// use slotbook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/slotbook.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert!(config.auto_create);
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait on a locked database before giving up.
    pub busy_timeout: Duration,
    /// Create the file and its parent directory when missing.
    pub auto_create: bool,
    /// Open without write access.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// A configuration for `path` with a 5 second busy timeout,
    /// auto-creation on, read-write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Turns auto-creation on or off.
    #[must_use]
    pub const fn with_auto_create(mut self, auto_create: bool) -> Self {
        self.auto_create = auto_create;
        self
    }

    /// Opens read-only. Implies no auto-creation.
    ///
    /// ```
    /// use slotbook::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/slotbook.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// The default data directory, `~/.slotbook`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".slotbook"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}

/// Resolves the data directory: `$SLOTBOOK_DATA_DIR`, else `~/.slotbook`.
///
/// # Errors
///
/// Returns an error if the variable is unset and the home directory cannot
/// be determined.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the database file path inside [`resolve_data_dir`].
///
/// # Errors
///
/// Same as [`resolve_data_dir`].
///
/// # Examples
///
/// ```no_run
/// use slotbook::database::resolve_database_path;
///
/// println!("{}", resolve_database_path().unwrap().display());
/// ```
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE_NAME))
}
