//! Configuration for zhwotd.
//!
//! Input files live in one directory:
//! 1. `ZHWOTD_INPUT_DIR` environment variable
//! 2. `~/Dropbox/zhwotd` if HOME is set
//! 3. `./data` as fallback
//!
//! The database connection settings are a JSON file in that directory
//! (`ZHWOTD_DB_FILE`, default `zhwotd_db.json`):
//!
//! ```json
//! { "database": "zhwotd.db", "host": "localhost", "user": "kirk", "password": "…" }
//! ```
//!
//! Variables may also come from a `.env` file, loaded in `main`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_INPUT_DIR: &str = "Dropbox/zhwotd";
const DEV_INPUT_DIR: &str = "./data";
const DEFAULT_DB_FILE: &str = "zhwotd_db.json";
const DEFAULT_DICTIONARY_FILE: &str = "zhwotd_input_dictionary.csv";
const DEFAULT_WOTD_FILE: &str = "zhwotd_input_wotd.txt";

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing setting `{0}`")]
    MissingKey(&'static str),
}

/// Get the directory holding input files and connection settings.
///
/// Priority:
/// 1. ZHWOTD_INPUT_DIR env variable if set
/// 2. $HOME/Dropbox/zhwotd if HOME is set
/// 3. ./data as fallback
pub fn get_input_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ZHWOTD_INPUT_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_INPUT_DIR);
    }

    PathBuf::from(DEV_INPUT_DIR)
}

fn input_file(var: &str, default: &str) -> PathBuf {
    let name = std::env::var(var).unwrap_or_else(|_| default.to_string());
    get_input_dir().join(name)
}

/// Get the connection settings file path (`ZHWOTD_DB_FILE` inside the input
/// directory).
pub fn get_db_file() -> PathBuf {
    input_file("ZHWOTD_DB_FILE", DEFAULT_DB_FILE)
}

/// Get the default dictionary CSV path (`ZHWOTD_DICTIONARY_FILE`).
pub fn get_dictionary_path() -> PathBuf {
    input_file("ZHWOTD_DICTIONARY_FILE", DEFAULT_DICTIONARY_FILE)
}

/// Get the default word-of-the-day list path (`ZHWOTD_WOTD_FILE`).
pub fn get_wotd_path() -> PathBuf {
    input_file("ZHWOTD_WOTD_FILE", DEFAULT_WOTD_FILE)
}

/// Database connection settings.
///
/// The store is an SQLite file named by `database`; `host`, `user` and
/// `password` are accepted so settings written for a networked server still
/// load, but they are not used to open the file.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub database: Option<String>,
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("database", &self.database)
            .finish()
    }
}

impl ConnectionSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.database()?;
        Ok(settings)
    }

    fn database(&self) -> Result<&str, ConfigError> {
        self.database
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::MissingKey("database"))
    }

    /// Path of the database file. Relative names resolve against `base`.
    pub fn database_path(&self, base: &Path) -> Result<PathBuf, ConfigError> {
        let database = Path::new(self.database()?);
        if database.is_absolute() {
            Ok(database.to_path_buf())
        } else {
            Ok(base.join(database))
        }
    }
}
