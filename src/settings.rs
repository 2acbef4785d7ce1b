//! Runtime settings
//!
//! Stored as JSON in the working directory. Settings tune the driver (seed, frame
//! pacing, demo length); the level layout and gameplay rules are fixed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Default settings file name
pub const SETTINGS_FILE: &str = "coin-arena.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for coin and hazard placement
    pub seed: u64,
    /// Show the debug overlay from the first frame
    pub start_with_debug: bool,
    /// Frame deltas are clamped to this many seconds
    pub max_frame_dt: f32,
    pub target_fps: u32,

    // === Headless driver ===
    /// Frames to simulate before exiting
    pub demo_frames: u32,
    /// Let the autopilot play
    pub idle_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            start_with_debug: false,
            max_frame_dt: MAX_FRAME_DT,
            target_fps: TARGET_FPS,
            demo_frames: 600,
            idle_mode: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to `path` as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load settings, writing the defaults out first if no file exists yet.
    /// A failed write is logged and the defaults are still returned.
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }
        let settings = Self::default();
        if let Err(e) = settings.save_to(path) {
            log::warn!("{}", e);
        }
        Ok(settings)
    }

    /// Fixed frame delta for a driver running at `target_fps`
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}
