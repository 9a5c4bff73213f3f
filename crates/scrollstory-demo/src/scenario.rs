use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use scrollstory_core::sim::{SceneStack, SimContainer, SimScene, Viewport};
use scrollstory_core::TrackerConfig;

/// A simulated story: container, scenes and a scroll script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub container: ContainerConfig,
    #[serde(default = "default_scenes")]
    pub scenes: Vec<SceneConfig>,
    #[serde(default)]
    pub scroll: ScrollScript,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            container: ContainerConfig::default(),
            scenes: default_scenes(),
            scroll: ScrollScript::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Top edge of the container in viewport coordinates
    #[serde(default)]
    pub top: f64,
    /// Visible height of the container
    #[serde(default = "default_container_height")]
    pub height: f64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            top: 0.0,
            height: default_container_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub label: String,
    pub height: f64,
    /// Empty space above the scene
    #[serde(default)]
    pub gap_before: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollScript {
    /// Initial scroll offset
    #[serde(default)]
    pub start: f64,
    /// Pixels scrolled per step (negative = up)
    #[serde(default = "default_step")]
    pub step: f64,
    /// Number of scroll steps
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Delay between steps when running the frame loop
    #[serde(default = "default_step_interval")]
    pub step_interval_ms: u64,
    /// Reverse direction at either end of the content
    #[serde(default = "default_true")]
    pub bounce: bool,
}

impl Default for ScrollScript {
    fn default() -> Self {
        Self {
            start: 0.0,
            step: default_step(),
            steps: default_steps(),
            step_interval_ms: default_step_interval(),
            bounce: default_true(),
        }
    }
}

fn default_container_height() -> f64 {
    600.0
}

fn default_scenes() -> Vec<SceneConfig> {
    ["Intro", "Rising action", "Climax", "Epilogue"]
        .into_iter()
        .map(|label| SceneConfig {
            label: label.to_string(),
            height: 800.0,
            gap_before: 200.0,
        })
        .collect()
}

fn default_step() -> f64 {
    120.0
}

fn default_steps() -> u32 {
    60
}

fn default_step_interval() -> u64 {
    50
}

fn default_true() -> bool {
    true
}

impl DemoConfig {
    /// Load from `path`, or from the default location if present, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::read(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Replace the `[tracker]` table with a standalone tracker config file.
    /// A missing file resets the tracker settings to defaults.
    pub fn with_tracker_file(mut self, path: &Path) -> Result<Self> {
        self.tracker = TrackerConfig::load(path)
            .with_context(|| format!("Failed to load tracker config {}", path.display()))?;
        Ok(self)
    }

    /// ~/.config/scrollstory/demo.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollstory")
            .join("demo.toml")
    }

    /// Lay out the simulated container and scenes
    pub fn build_story(&self) -> (SimContainer, Vec<SimScene>) {
        let viewport = Viewport::new(self.container.top, self.container.height);
        let stack = self
            .scenes
            .iter()
            .fold(SceneStack::new(&viewport), |stack, scene| {
                stack.gap(scene.gap_before).scene(scene.label.clone(), scene.height)
            });
        // Trailing space so the guideline can leave the last scene
        let scenes = stack.gap(self.container.height).build();
        viewport.scroll_to(self.scroll.start);
        (SimContainer::new(viewport), scenes)
    }
}

/// Applies the scroll script one step at a time
#[derive(Debug)]
pub struct ScrollDriver {
    step: f64,
    bounce: bool,
}

impl ScrollDriver {
    pub fn new(script: &ScrollScript) -> Self {
        Self {
            step: script.step,
            bounce: script.bounce,
        }
    }

    pub fn advance(&mut self, viewport: &Viewport) {
        let before = viewport.scroll_top();
        viewport.scroll_by(self.step);
        if self.bounce && viewport.scroll_top() == before {
            self.step = -self.step;
            viewport.scroll_by(self.step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let config = DemoConfig::default();
        assert_eq!(config.scenes.len(), 4);
        assert_eq!(config.container.height, 600.0);
        assert!(config.scroll.bounce);
    }

    #[test]
    fn test_partial_scenario() {
        let config: DemoConfig = toml::from_str(
            r#"
            [tracker]
            debug = true

            [[scenes]]
            label = "only"
            height = 300
            "#,
        )
        .unwrap();
        assert!(config.tracker.debug);
        assert_eq!(config.tracker.frame_rate_fps, 60);
        assert_eq!(config.scenes.len(), 1);
        assert_eq!(config.scenes[0].gap_before, 0.0);
        assert_eq!(config.scroll.steps, 60);
    }

    #[test]
    fn test_tracker_file_overrides_scenario() {
        let path = std::env::temp_dir()
            .join(format!("scrollstory-tracker-{}.toml", std::process::id()));
        std::fs::write(&path, "debug = true\nframe_rate_fps = 30\n").unwrap();

        let config = DemoConfig::default().with_tracker_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(config.tracker.debug);
        assert_eq!(config.tracker.frame_rate_fps, 30);
        assert_eq!(config.scenes.len(), 4);
    }

    #[test]
    fn test_tracker_file_unreadable() {
        // A directory exists but cannot be read as a file
        let err = DemoConfig::default()
            .with_tracker_file(&std::env::temp_dir())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<scrollstory_core::Error>(),
            Some(scrollstory_core::Error::Io(_))
        ));
    }

    #[test]
    fn test_build_story_adds_trailing_space() {
        let config = DemoConfig {
            container: ContainerConfig { top: 0.0, height: 100.0 },
            scenes: vec![SceneConfig {
                label: "a".to_string(),
                height: 300.0,
                gap_before: 50.0,
            }],
            ..Default::default()
        };
        let (container, scenes) = config.build_story();
        assert_eq!(scenes[0].offset(), 50.0);
        // 50 + 300 + 100 content, 100 visible
        assert_eq!(container.viewport().max_scroll(), 350.0);
    }

    #[test]
    fn test_driver_bounces() {
        let viewport = Viewport::new(0.0, 100.0);
        let _scenes = SceneStack::new(&viewport).scene("a", 250.0).build();
        let mut driver = ScrollDriver::new(&ScrollScript {
            step: 100.0,
            ..Default::default()
        });

        driver.advance(&viewport);
        assert_eq!(viewport.scroll_top(), 100.0);
        driver.advance(&viewport);
        assert_eq!(viewport.scroll_top(), 150.0);
        driver.advance(&viewport);
        assert_eq!(viewport.scroll_top(), 50.0);
    }
}
