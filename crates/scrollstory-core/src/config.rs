use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tracker settings that are plain data (callbacks and host handles live in
/// `TrackerOptions`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Log scroll info for every processed frame
    #[serde(default)]
    pub debug: bool,
    /// Frame rate of the frame loop (0 = ~60fps fallback)
    #[serde(default = "default_frame_rate")]
    pub frame_rate_fps: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debug: false,
            frame_rate_fps: default_frame_rate(),
        }
    }
}

fn default_frame_rate() -> u32 {
    60
}

impl TrackerConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Load configuration from file or return defaults
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Time between two scheduled frames
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        if self.frame_rate_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.frame_rate_fps as u64).max(1))
        }
    }
}
