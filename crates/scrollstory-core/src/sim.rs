//! In-memory host: a fixed viewport over a vertical stack of scenes
//!
//! Used to drive a tracker without a real layout engine. Scenes and the
//! container share one [`Viewport`], so scrolling it moves every scene box.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::geometry::BoundingBox;
use crate::host::{SceneElement, ScrollContainer};

#[derive(Debug)]
struct ViewportState {
    top: f64,
    height: f64,
    scroll_top: f64,
    content_height: f64,
}

/// Shared scroll state of a simulated container
#[derive(Debug, Clone)]
pub struct Viewport {
    state: Arc<RwLock<ViewportState>>,
    reads: Arc<AtomicUsize>,
}

impl Viewport {
    /// Viewport whose visible area starts at `top` (viewport coordinates)
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            state: Arc::new(RwLock::new(ViewportState {
                top,
                height,
                scroll_top: 0.0,
                content_height: 0.0,
            })),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&ViewportState) -> T) -> T {
        let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn with_state_mut<T>(&self, f: impl FnOnce(&mut ViewportState) -> T) -> T {
        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn scroll_top(&self) -> f64 {
        self.with_state(|s| s.scroll_top)
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        self.with_state(|s| (s.content_height - s.height).max(0.0))
    }

    /// Scroll to an absolute offset, clamped to the scrollable range
    pub fn scroll_to(&self, offset: f64) {
        let max = self.max_scroll();
        self.with_state_mut(|s| s.scroll_top = offset.clamp(0.0, max));
    }

    /// Scroll by a delta (positive = down)
    pub fn scroll_by(&self, delta: f64) {
        self.scroll_to(self.scroll_top() + delta);
    }

    /// Number of bounding boxes measured through this viewport so far
    pub fn geometry_reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn set_content_height(&self, height: f64) {
        self.with_state_mut(|s| s.content_height = height);
    }

    fn measure(&self, content_offset: f64, height: f64) -> BoundingBox {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.with_state(|s| BoundingBox::new(s.top + content_offset - s.scroll_top, height))
    }

    fn container_box(&self) -> BoundingBox {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.with_state(|s| BoundingBox::new(s.top, s.height))
    }
}

/// Simulated scroll container
#[derive(Debug, Clone)]
pub struct SimContainer {
    viewport: Viewport,
    overflow_y: &'static str,
    position: &'static str,
}

impl SimContainer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            overflow_y: "visible",
            position: "static",
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn overflow_y(&self) -> &'static str {
        self.overflow_y
    }

    pub fn position(&self) -> &'static str {
        self.position
    }
}

impl ScrollContainer for SimContainer {
    fn scroll_top(&self) -> f64 {
        self.viewport.scroll_top()
    }

    fn bounding_box(&self) -> BoundingBox {
        self.viewport.container_box()
    }

    fn enable_scroll_tracking(&mut self) {
        self.overflow_y = "scroll";
        self.position = "relative";
    }
}

/// Simulated scene laid out at a fixed offset inside the container content
#[derive(Debug, Clone)]
pub struct SimScene {
    viewport: Viewport,
    label: String,
    offset: f64,
    height: f64,
}

impl SimScene {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Distance from the top of the container content
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl SceneElement for SimScene {
    fn bounding_box(&self) -> BoundingBox {
        self.viewport.measure(self.offset, self.height)
    }
}

/// Builder stacking scenes top to bottom inside a viewport
#[derive(Debug)]
pub struct SceneStack {
    viewport: Viewport,
    cursor: f64,
    scenes: Vec<SimScene>,
}

impl SceneStack {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            viewport: viewport.clone(),
            cursor: 0.0,
            scenes: Vec::new(),
        }
    }

    /// Leave empty space before the next scene
    pub fn gap(mut self, height: f64) -> Self {
        self.cursor += height.max(0.0);
        self
    }

    pub fn scene(mut self, label: impl Into<String>, height: f64) -> Self {
        self.scenes.push(SimScene {
            viewport: self.viewport.clone(),
            label: label.into(),
            offset: self.cursor,
            height,
        });
        self.cursor += height;
        self
    }

    /// Finish the layout and record the total content height on the viewport
    pub fn build(self) -> Vec<SimScene> {
        self.viewport.set_content_height(self.cursor);
        self.scenes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenes_move_with_scroll() {
        let viewport = Viewport::new(0.0, 200.0);
        let scenes = SceneStack::new(&viewport)
            .scene("a", 300.0)
            .gap(50.0)
            .scene("b", 300.0)
            .build();

        assert_eq!(scenes[1].bounding_box(), BoundingBox::new(350.0, 300.0));
        viewport.scroll_to(100.0);
        assert_eq!(scenes[0].bounding_box(), BoundingBox::new(-100.0, 300.0));
        assert_eq!(scenes[1].bounding_box(), BoundingBox::new(250.0, 300.0));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let viewport = Viewport::new(0.0, 200.0);
        let _scenes = SceneStack::new(&viewport).scene("a", 500.0).build();

        viewport.scroll_to(1000.0);
        assert_eq!(viewport.scroll_top(), 300.0);
        viewport.scroll_by(-1000.0);
        assert_eq!(viewport.scroll_top(), 0.0);
    }

    #[test]
    fn test_enable_scroll_tracking_sets_styles() {
        let mut container = SimContainer::new(Viewport::new(0.0, 100.0));
        assert_eq!(container.overflow_y(), "visible");
        container.enable_scroll_tracking();
        assert_eq!(container.overflow_y(), "scroll");
        assert_eq!(container.position(), "relative");
    }

    #[test]
    fn test_geometry_reads_are_counted() {
        let viewport = Viewport::new(0.0, 100.0);
        let scenes = SceneStack::new(&viewport).scene("a", 100.0).build();
        let container = SimContainer::new(viewport.clone());

        container.bounding_box();
        scenes[0].bounding_box();
        container.scroll_top();
        assert_eq!(viewport.geometry_reads(), 2);
    }
}
