//! Geometry queries answered by the rendering layer
//!
//! The drag state machine never talks to a display server directly. Whatever
//! draws the windows implements [`DockSurface`] so the engine can ask what is
//! under the pointer.

use crate::model::{Point, Rect, WindowId};

pub trait DockSurface {
    /// Windows containing `point`, topmost first
    fn windows_at(&self, point: Point) -> Vec<WindowId>;

    /// Screen bounds of a window's root docking area
    fn root_bounds(&self, window: WindowId) -> Option<Rect>;

    /// The docked panel under `point` in `window`, with its screen bounds
    ///
    /// For a tab group this is the selected member.
    fn panel_at(&self, window: WindowId, point: Point) -> Option<(String, Rect)>;

    /// Screen bounds of a docked panel, used to size the floating preview
    fn panel_bounds(&self, window: WindowId, panel: &str) -> Option<Rect>;
}
