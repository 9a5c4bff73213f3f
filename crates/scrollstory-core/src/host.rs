//! Host environment seams
//!
//! The tracker never measures layout itself. A host (a browser binding, a
//! terminal UI, or [`crate::sim`]) implements these traits over its own
//! element handles.
//!
//! Hosts whose layout engine reports top and bottom edges (a DOMRect, for
//! instance) build their boxes with [`BoundingBox::from_edges`]; hosts that
//! know an element's height use [`BoundingBox::new`].

use crate::geometry::BoundingBox;

/// The scrollable element containing the scenes
pub trait ScrollContainer {
    /// Current vertical scroll offset
    fn scroll_top(&self) -> f64;

    /// Bounding box in viewport coordinates
    fn bounding_box(&self) -> BoundingBox;

    /// Make the container vertically scrollable and a positioning context for
    /// its scenes. Called once when a tracker is constructed.
    fn enable_scroll_tracking(&mut self);
}

/// One scene of the story
pub trait SceneElement {
    /// Bounding box in viewport coordinates
    fn bounding_box(&self) -> BoundingBox;
}

impl<T: SceneElement + ?Sized> SceneElement for &T {
    fn bounding_box(&self) -> BoundingBox {
        (**self).bounding_box()
    }
}

impl<T: SceneElement + ?Sized> SceneElement for Box<T> {
    fn bounding_box(&self) -> BoundingBox {
        (**self).bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RectScene {
        top: f64,
        bottom: f64,
    }

    impl SceneElement for RectScene {
        fn bounding_box(&self) -> BoundingBox {
            BoundingBox::from_edges(self.top, self.bottom)
        }
    }

    fn measure<E: SceneElement>(element: E) -> BoundingBox {
        element.bounding_box()
    }

    #[test]
    fn test_edge_reporting_scene_through_references() {
        let scene = RectScene {
            top: 20.0,
            bottom: 120.0,
        };
        let boxed: Box<dyn SceneElement> = Box::new(RectScene {
            top: 20.0,
            bottom: 120.0,
        });

        assert_eq!(measure(&scene), BoundingBox::new(20.0, 100.0));
        assert_eq!(measure(boxed), BoundingBox::new(20.0, 100.0));
    }
}
