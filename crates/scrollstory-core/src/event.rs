use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tracker::ActiveScene;

/// Scroll direction observed on a processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `Down` only when the offset strictly increased
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to the `enter`, `exit` and `progress` callbacks
#[derive(Debug)]
pub struct SceneEvent<'a, E> {
    /// Index of the scene the event is about
    pub scene: usize,
    /// The scene element itself
    pub element: &'a E,
    /// Progress of the currently active scene, `None` when no scene is active.
    /// For `exit` this is the progress of the scene being entered, not of the
    /// one being left.
    pub progress: Option<f64>,
    pub direction: Direction,
}

/// Boxed scene callback
pub type SceneCallback<E> = Box<dyn FnMut(&SceneEvent<'_, E>) + Send>;

/// What a processed frame observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub scroll_top: f64,
    pub guideline: f64,
    pub active: ActiveScene,
    pub progress: Option<f64>,
    pub scene_changed: bool,
    pub progress_changed: bool,
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(0.0, 10.0), Direction::Down);
        assert_eq!(Direction::between(10.0, 0.0), Direction::Up);
        assert_eq!(Direction::between(10.0, 10.0), Direction::Up);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Down.to_string(), "down");
        assert_eq!(Direction::Up.as_str(), "up");
    }
}
