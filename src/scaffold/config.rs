//! Scaffold Configuration
//!
//! Optional on-disk configuration for the scaffolding workflow. The file
//! lives at `<config dir>/mkproj/config.json`; a missing or unreadable
//! file falls back to the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the scaffolding workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Base directory new projects are created under. `None` means the
    /// current working directory.
    pub projects_dir: Option<PathBuf>,
    /// ESC lookahead timeout in milliseconds. Raise this on high-latency
    /// terminals where arrow keys get misread as bare ESC.
    pub esc_timeout_ms: u64,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            projects_dir: None,
            esc_timeout_ms: 25,
        }
    }
}

impl ScaffoldConfig {
    /// Load the configuration from the default location, falling back to
    /// defaults if the file is absent or malformed.
    pub fn load() -> Self {
        Self::default_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mkproj").join("config.json"))
    }

    /// The configured ESC lookahead timeout.
    pub fn esc_timeout(&self) -> Duration {
        Duration::from_millis(self.esc_timeout_ms)
    }
}
