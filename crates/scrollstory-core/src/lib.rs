pub mod config;
pub mod error;
pub mod event;
pub mod frame_loop;
pub mod geometry;
pub mod host;
pub mod sim;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{Error, Result};
pub use event::{Direction, FrameReport, SceneCallback, SceneEvent};
pub use frame_loop::{FrameLoop, FrameLoopHandle, TrackerSnapshot};
pub use geometry::BoundingBox;
pub use host::{SceneElement, ScrollContainer};
pub use tracker::{ActiveScene, FrameOutcome, SceneTracker, TrackerOptions};
