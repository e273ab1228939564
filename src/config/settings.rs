//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and the default cache file.

use crate::error::{ConfigError, ConfigResult};
use crate::storage::DEFAULT_BUSY_TIMEOUT;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/assetcache)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/assetcache)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Discover paths using XDG directories, creating them if missing.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("org", "assetcache", "assetcache")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Self::from_dirs(project.config_dir(), project.data_dir())
    }

    /// Use explicit directories, creating them if missing.
    pub fn from_dirs(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let paths = Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        };

        fs::create_dir_all(&paths.config_dir)?;
        fs::create_dir_all(&paths.data_dir)?;

        Ok(paths)
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path of the cache used when none is configured.
    pub fn default_cache_file(&self) -> PathBuf {
        self.data_dir.join("assets.db")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Cache file to use instead of the one in the data directory.
    pub cache_path: Option<PathBuf>,
    /// Default output format for `list`.
    pub default_output_format: String,
    /// How long to wait on another process's write lock, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            cache_path: None,
            default_output_format: "plain".to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT.as_millis() as u64,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let file = paths.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Save settings to the default location.
    pub fn save(&self, paths: &Paths) -> ConfigResult<()> {
        let file = paths.settings_file();

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&file, content).map_err(|e| ConfigError::WriteFailed {
            path: file,
            reason: e.to_string(),
        })
    }

    /// Busy timeout as a duration.
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Pick the cache file: the explicit override, then these settings.
    ///
    /// `None` means the data directory default applies.
    pub fn resolve_cache_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.cache_path.clone())
    }
}
