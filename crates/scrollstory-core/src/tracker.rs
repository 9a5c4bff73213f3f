//! Scene tracker: which scene overlaps the guideline, and how far through it
//! the guideline is
//!
//! One call to [`SceneTracker::tick`] is one animation frame. The tracker
//! reads the container's scroll offset, skips the frame if nothing moved,
//! otherwise finds the active scene and fires `exit`, `enter` and `progress`
//! (in that order) for whatever changed since the last processed frame.
//!
//! # Usage
//!
//! ```ignore
//! use scrollstory_core::{SceneTracker, TrackerOptions};
//!
//! let mut tracker = SceneTracker::new(
//!     TrackerOptions::new()
//!         .container(container)
//!         .scenes(scenes)
//!         .on_enter(|e| println!("enter {} going {}", e.scene, e.direction))
//!         .on_exit(|e| println!("exit {}", e.scene)),
//! )?;
//!
//! // Once per frame, or hand the tracker to a `FrameLoop`
//! tracker.tick();
//! ```

use std::fmt;

use tracing::{debug, info, trace};

use crate::config::TrackerConfig;
use crate::error::{Error, Result};
use crate::event::{Direction, FrameReport, SceneCallback, SceneEvent};
use crate::geometry::first_hit;
use crate::host::{SceneElement, ScrollContainer};

/// Which scene the tracker currently considers active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveScene {
    /// No scene overlaps the guideline
    #[default]
    None,
    /// `refresh()` was called; the next processed frame always counts as a
    /// scene change
    PendingRefresh,
    /// Index of the scene overlapping the guideline
    Active(usize),
}

impl ActiveScene {
    pub fn index(&self) -> Option<usize> {
        match self {
            ActiveScene::Active(index) => Some(*index),
            _ => None,
        }
    }
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Scroll offset unchanged since the last processed frame
    Skipped,
    Processed(FrameReport),
}

/// Everything needed to construct a [`SceneTracker`]
pub struct TrackerOptions<C, E> {
    container: Option<C>,
    scenes: Option<Vec<E>>,
    enter: Option<SceneCallback<E>>,
    exit: Option<SceneCallback<E>>,
    progress: Option<SceneCallback<E>>,
    config: TrackerConfig,
}

impl<C, E> Default for TrackerOptions<C, E> {
    fn default() -> Self {
        Self {
            container: None,
            scenes: None,
            enter: None,
            exit: None,
            progress: None,
            config: TrackerConfig::default(),
        }
    }
}

impl<C, E> TrackerOptions<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scrollable container (required)
    pub fn container(mut self, container: C) -> Self {
        self.container = Some(container);
        self
    }

    /// Set the scenes, in scan order (required)
    pub fn scenes(mut self, scenes: impl IntoIterator<Item = E>) -> Self {
        self.scenes = Some(scenes.into_iter().collect());
        self
    }

    /// Called when a scene starts overlapping the guideline
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SceneEvent<'_, E>) + Send + 'static,
    {
        self.enter = Some(Box::new(f));
        self
    }

    /// Called when the previously active scene stops being active
    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SceneEvent<'_, E>) + Send + 'static,
    {
        self.exit = Some(Box::new(f));
        self
    }

    /// Called when the active scene or its progress changes
    pub fn on_progress<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SceneEvent<'_, E>) + Send + 'static,
    {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }
}

/// Tracks the scene overlapping the container's guideline
pub struct SceneTracker<C, E> {
    container: C,
    scenes: Vec<E>,
    enter: Option<SceneCallback<E>>,
    exit: Option<SceneCallback<E>>,
    progress: Option<SceneCallback<E>>,
    config: TrackerConfig,
    active: ActiveScene,
    progress_value: Option<f64>,
    frame_count: u64,
    /// Baseline for direction detection
    prev_scroll_pos: f64,
    /// Last processed offset, `None` until the first frame or after `refresh()`
    scroll_top: Option<f64>,
}

impl<C, E> SceneTracker<C, E>
where
    C: ScrollContainer,
    E: SceneElement,
{
    /// Validate the options and prepare the container for tracking.
    ///
    /// Fails before touching the container if either the container or the
    /// scenes are missing.
    pub fn new(options: TrackerOptions<C, E>) -> Result<Self> {
        let TrackerOptions {
            container,
            scenes,
            enter,
            exit,
            progress,
            config,
        } = options;

        let mut container = container.ok_or(Error::ContainerNotFound)?;
        let scenes = scenes.ok_or(Error::ScenesNotFound)?;

        container.enable_scroll_tracking();
        info!(
            scenes = scenes.len(),
            debug = config.debug,
            "Scene tracker created"
        );

        Ok(Self {
            container,
            scenes,
            enter,
            exit,
            progress,
            config,
            active: ActiveScene::None,
            progress_value: None,
            frame_count: 0,
            prev_scroll_pos: 0.0,
            scroll_top: None,
        })
    }

    /// Evaluate one frame
    pub fn tick(&mut self) -> FrameOutcome {
        let scroll_top = self.container.scroll_top();
        if self.scroll_top == Some(scroll_top) {
            trace!(scroll_top, "No scroll since last frame");
            return FrameOutcome::Skipped;
        }
        self.scroll_top = Some(scroll_top);

        let guideline = self.container.bounding_box().guideline();

        let prev_active = self.active;
        let prev_progress = self.progress_value;
        self.active = ActiveScene::None;
        self.progress_value = None;

        if let Some(hit) = first_hit(self.scenes.iter().map(|s| s.bounding_box()), guideline) {
            self.active = ActiveScene::Active(hit.index);
            self.progress_value = Some(hit.progress);
        }

        let scene_changed = prev_active != self.active;
        let progress_changed = prev_progress != self.progress_value;
        let direction = self.scroll_direction(scroll_top);

        if scene_changed {
            dispatch(
                &mut self.exit,
                &self.scenes,
                prev_active.index(),
                self.progress_value,
                direction,
            );
            dispatch(
                &mut self.enter,
                &self.scenes,
                self.active.index(),
                self.progress_value,
                direction,
            );
        }

        if scene_changed || progress_changed {
            self.frame_count += 1;
            dispatch(
                &mut self.progress,
                &self.scenes,
                self.active.index(),
                self.progress_value,
                direction,
            );
        }

        if self.config.debug {
            debug!(
                scroll_top,
                guideline,
                active = ?self.active,
                progress = ?self.progress_value,
                %direction,
                scene_changed,
                frame_count = self.frame_count,
                "Frame processed"
            );
        }

        FrameOutcome::Processed(FrameReport {
            scroll_top,
            guideline,
            active: self.active,
            progress: self.progress_value,
            scene_changed,
            progress_changed,
            direction,
        })
    }

    /// Compare against the previous direction baseline and move it forward
    fn scroll_direction(&mut self, current: f64) -> Direction {
        let direction = Direction::between(self.prev_scroll_pos, current);
        self.prev_scroll_pos = current;
        direction
    }
}

impl<C, E> SceneTracker<C, E> {
    pub fn active_scene(&self) -> ActiveScene {
        self.active
    }

    /// Index of the scene overlapping the guideline, if any
    pub fn active_scene_index(&self) -> Option<usize> {
        self.active.index()
    }

    /// 0 when the active scene's top touches the guideline, 1 when its bottom
    /// does. `None` when no scene is active.
    pub fn progress_value(&self) -> Option<f64> {
        self.progress_value
    }

    /// Number of processed frames where the scene or its progress changed
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn scenes(&self) -> &[E] {
        &self.scenes
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Force the next frame to be processed and reported as a scene change
    pub fn refresh(&mut self) {
        self.scroll_top = None;
        self.active = ActiveScene::PendingRefresh;
    }
}

impl<C, E> fmt::Debug for SceneTracker<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneTracker")
            .field("scenes", &self.scenes.len())
            .field("active", &self.active)
            .field("progress", &self.progress_value)
            .field("frame_count", &self.frame_count)
            .field("scroll_top", &self.scroll_top)
            .finish_non_exhaustive()
    }
}

/// Invoke `callback` for `scenes[index]` if both exist
fn dispatch<E>(
    callback: &mut Option<SceneCallback<E>>,
    scenes: &[E],
    index: Option<usize>,
    progress: Option<f64>,
    direction: Direction,
) {
    let (Some(callback), Some(index)) = (callback.as_mut(), index) else {
        return;
    };
    if let Some(element) = scenes.get(index) {
        callback(&SceneEvent {
            scene: index,
            element,
            progress,
            direction,
        });
    }
}
