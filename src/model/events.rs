//! Per-panel docking notifications
//!
//! The model queues these as panels move; the application drains the queue
//! after each update to keep panel content in step (start or stop work for
//! panels that become visible or hidden, drop state for closed panels).

use super::window::{AutoHideEdge, WindowId};

#[derive(Debug, Clone, PartialEq)]
pub enum DockingEvent {
    /// Placed into a window's layout tree
    Docked { panel: String, window: WindowId },
    /// Removed from a window's layout tree or auto-hide edge
    Undocked { panel: String, window: WindowId },
    /// Became the selected member of its tab group
    Shown(String),
    /// Another member of its tab group was selected
    Hidden(String),
    AutoHideEnabled {
        panel: String,
        window: WindowId,
        edge: AutoHideEdge,
    },
    AutoHideDisabled { panel: String, window: WindowId },
}

impl DockingEvent {
    pub fn panel(&self) -> &str {
        match self {
            DockingEvent::Docked { panel, .. }
            | DockingEvent::Undocked { panel, .. }
            | DockingEvent::AutoHideEnabled { panel, .. }
            | DockingEvent::AutoHideDisabled { panel, .. } => panel,
            DockingEvent::Shown(panel) | DockingEvent::Hidden(panel) => panel,
        }
    }
}
