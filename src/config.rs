// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! Configuration is an explicit value passed to collaborators at construction
//! time. Changing a setting means tearing the collaborator down and
//! reconstructing it with the new `Config`, never mutating shared state.

use crate::constants::{capture, timing};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Which camera the stream request should prefer
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front-facing (selfie) camera
    User,
    /// Rear-facing camera (default; pets are usually in front of you)
    #[default]
    Environment,
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::User => write!(f, "user"),
            FacingMode::Environment => write!(f, "environment"),
        }
    }
}

impl std::str::FromStr for FacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "front" => Ok(FacingMode::User),
            "environment" | "rear" => Ok(FacingMode::Environment),
            other => Err(format!("unknown facing mode: {}", other)),
        }
    }
}

/// Settings for one capture session
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CaptureConfig {
    /// Preferred camera facing
    pub facing_mode: FacingMode,
    /// Preferred stream width
    pub width: u32,
    /// Preferred stream height
    pub height: u32,
    /// Bound on the wait for the first decodable frame, in milliseconds
    pub frame_ready_timeout_ms: u64,
    /// Delay before acquisition to let the preview target mount, in milliseconds
    pub settle_delay_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::default(),
            width: capture::DEFAULT_WIDTH,
            height: capture::DEFAULT_HEIGHT,
            frame_ready_timeout_ms: timing::FRAME_READY_TIMEOUT.as_millis() as u64,
            settle_delay_ms: timing::SETTLE_DELAY.as_millis() as u64,
        }
    }
}

impl CaptureConfig {
    /// Frame-ready timeout as a `Duration`
    pub fn frame_ready_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_ready_timeout_ms)
    }

    /// Settle delay as a `Duration`
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Application configuration
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Config {
    /// Capture session settings
    pub capture: CaptureConfig,
    /// Directory captured photos are saved to (default: platform pictures dir)
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Path of the config file under the platform config dir
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pet-spotter").join("config.json"))
    }

    /// Load the configuration, falling back to defaults when absent or invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(err) => {
                    debug!(%err, "Invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save the configuration to the platform config dir
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&path, contents)
    }
}
