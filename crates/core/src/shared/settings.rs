use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::domain::metric_table::HeadWidthFormula;
use crate::shared::constants::{DEFAULT_TICK_MS, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User-level defaults for capture sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Directory holding the per-subject record stores.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub head_width: HeadWidthFormula,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Log capture progress every N committed frames.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(SETTINGS_DIR_NAME).join("subjects"))
        .unwrap_or_else(|| PathBuf::from("subjects"))
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_progress_every() -> usize {
    50
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            head_width: HeadWidthFormula::default(),
            tick_ms: default_tick_ms(),
            progress_every: default_progress_every(),
        }
    }
}

impl CaptureSettings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads from the user config directory, falling back to defaults when
    /// the file is missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Strict variant for an explicitly named file.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}
