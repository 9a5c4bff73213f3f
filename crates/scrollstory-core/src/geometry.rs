//! Box geometry and guideline hit-testing
//!
//! All coordinates are viewport coordinates, growing downwards.

use serde::{Deserialize, Serialize};

/// Vertical extent of an element's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Build from top and bottom edges
    pub fn from_edges(top: f64, bottom: f64) -> Self {
        Self {
            top,
            height: bottom - top,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical midpoint, used as the guideline of a container
    #[inline]
    pub fn guideline(&self) -> f64 {
        (self.top + self.bottom()) / 2.0
    }

    /// True if the box lies entirely below or entirely above the guideline.
    /// Touching the guideline with either edge counts as overlapping.
    #[inline]
    pub fn is_outside(&self, guideline: f64) -> bool {
        self.top > guideline || self.bottom() < guideline
    }

    /// Position of the guideline relative to the box: 0 at the top edge,
    /// 1 at the bottom edge
    #[inline]
    pub fn progress_at(&self, guideline: f64) -> f64 {
        (guideline - self.top) / self.height
    }
}

/// A scene overlapping the guideline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub index: usize,
    pub progress: f64,
}

/// Find the first box (in iteration order) overlapping the guideline.
///
/// Iteration stops at the first hit, so boxes after it are never produced.
pub fn first_hit<I>(boxes: I, guideline: f64) -> Option<SceneHit>
where
    I: IntoIterator<Item = BoundingBox>,
{
    boxes
        .into_iter()
        .enumerate()
        .find(|(_, bbox)| !bbox.is_outside(guideline))
        .map(|(index, bbox)| SceneHit {
            index,
            progress: bbox.progress_at(guideline),
        })
}
