//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;
use std::time::Instant;

use crate::model::{AutoHideEdge, NodeId, Point, Region, Size, WindowId, WindowState};
use crate::persist::AppLayout;

/// Pointer gesture forwarded by the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum PointerKind {
    /// Drag initiated on a panel's drag handle
    Pressed { panel: String },
    Moved,
    Released,
    /// Gesture aborted (escape key, focus loss)
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Screen coordinates
    pub position: Point,
}

impl PointerEvent {
    pub fn pressed(panel: impl Into<String>, position: Point) -> Self {
        Self {
            kind: PointerKind::Pressed {
                panel: panel.into(),
            },
            position,
        }
    }

    pub fn moved(position: Point) -> Self {
        Self {
            kind: PointerKind::Moved,
            position,
        }
    }

    pub fn released(position: Point) -> Self {
        Self {
            kind: PointerKind::Released,
            position,
        }
    }

    pub fn cancelled(position: Point) -> Self {
        Self {
            kind: PointerKind::Cancelled,
            position,
        }
    }
}

/// Programmatic layout changes requested by the application
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    DockToRoot {
        window: WindowId,
        panel: String,
        region: Region,
        proportion: f64,
    },
    Dock {
        panel: String,
        target: String,
        region: Region,
        proportion: f64,
    },
    Undock(String),
    /// Close button pressed on a panel; refused for panels that are not closable
    Close(String),
    AutoHide {
        panel: String,
        edge: AutoHideEdge,
    },
    RestoreAutoHidden(String),
    Maximize(String),
    RestoreMaximized(WindowId),
    SelectTab(String),
    /// Divider dragged by the user
    SetDivider {
        window: WindowId,
        split: NodeId,
        proportion: f64,
    },
}

/// Window events reported by the windowing layer
#[derive(Debug, Clone, PartialEq)]
pub enum WindowMsg {
    Moved { window: WindowId, position: Point },
    Resized { window: WindowId, size: Size },
    StateChanged { window: WindowId, state: WindowState },
    /// A window was raised above the others
    BroughtToFront(WindowId),
    /// The user closed a window
    Closed(WindowId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersistMsg {
    Pause,
    Resume,
    /// Write the layout immediately, bypassing the debounce timer
    SaveNow,
    /// Load a layout file, falling back to `default` on failure
    Restore {
        path: PathBuf,
        default: Box<AppLayout>,
    },
    /// Background write finished
    WriteCompleted {
        path: PathBuf,
        result: Result<(), String>,
    },
    SaveNamed(String),
    RestoreNamed(String),
    RemoveNamed(String),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Pointer(PointerEvent),
    Layout(LayoutMsg),
    Window(WindowMsg),
    Persist(PersistMsg),
    /// Timer tick driving the persistence debounce
    Tick(Instant),
}

impl Msg {
    pub fn pointer_moved(x: f64, y: f64) -> Self {
        Msg::Pointer(PointerEvent::moved(Point::new(x, y)))
    }

    pub fn pointer_released(x: f64, y: f64) -> Self {
        Msg::Pointer(PointerEvent::released(Point::new(x, y)))
    }
}
