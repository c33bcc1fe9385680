//! Drag session state
//!
//! At most one session exists per model. Starting one snapshots the origin
//! tree and undocks the panel; ending one either keeps the committed result
//! or swaps the snapshot back in.

use crate::error::{DockingError, Result};

use super::geometry::{Point, Rect};
use super::layout::LayoutTree;
use super::region::Region;
use super::events::DockingEvent;
use super::window::{AutoHideEdge, Modality, WindowId};
use super::DockingModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Dragging,
    Committed,
    RolledBack,
}

/// What a release at the current pointer position would do
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    /// Outside every window
    Outside,
    /// Over a window the panel is not allowed to move to
    Restricted { window: WindowId },
    /// Over a window but not over any drop zone
    Window { window: WindowId },
    /// Over a root handle (`handle: true`) or inside a root edge band
    Root {
        window: WindowId,
        region: Region,
        handle: bool,
    },
    /// Next to a docked panel
    Panel {
        window: WindowId,
        target: String,
        region: Region,
    },
    /// Over a pin handle
    Pin { window: WindowId, edge: AutoHideEdge },
}

impl DropTarget {
    pub fn window(&self) -> Option<WindowId> {
        match self {
            DropTarget::Outside => None,
            DropTarget::Restricted { window }
            | DropTarget::Window { window }
            | DropTarget::Root { window, .. }
            | DropTarget::Panel { window, .. }
            | DropTarget::Pin { window, .. } => Some(*window),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollbackReason {
    Cancelled,
    /// The panel may not leave its origin window
    LimitedToWindow,
    /// Released outside any drop zone and the panel cannot float
    NotFloatable,
    /// The chosen drop could not be applied
    Failed(String),
}

/// Terminal result of a drag session
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Docked to a window root (`target: None`) or next to a panel
    Docked {
        window: WindowId,
        target: Option<String>,
        region: Region,
    },
    AutoHidden {
        window: WindowId,
        edge: AutoHideEdge,
    },
    /// Promoted into a new top-level window
    Floated { window: WindowId },
    RolledBack(RollbackReason),
}

impl DragOutcome {
    pub fn state(&self) -> DragState {
        match self {
            DragOutcome::RolledBack(_) => DragState::RolledBack,
            _ => DragState::Committed,
        }
    }

    pub fn is_committed(&self) -> bool {
        self.state() == DragState::Committed
    }
}

#[derive(Debug, Clone)]
pub struct DragSession {
    pub panel: String,
    pub origin: WindowId,
    snapshot: LayoutTree,
    /// Screen bounds of the floating preview
    pub preview: Rect,
    grab_offset: (f64, f64),
    /// Window whose overlay is active
    pub current_window: Option<WindowId>,
    pub target: DropTarget,
    front_window: Option<WindowId>,
    suspended: Vec<WindowId>,
    pub state: DragState,
}

impl DragSession {
    fn new(panel: String, origin: WindowId, snapshot: LayoutTree, pointer: Point, bounds: Rect) -> Self {
        let grab_offset = (
            (pointer.x - bounds.x).clamp(0.0, bounds.width.max(0.0)),
            (pointer.y - bounds.y).clamp(0.0, bounds.height.max(0.0)),
        );
        let mut session = Self {
            panel,
            origin,
            snapshot,
            preview: bounds,
            grab_offset,
            current_window: None,
            target: DropTarget::Outside,
            front_window: None,
            suspended: Vec::new(),
            state: DragState::Dragging,
        };
        session.move_preview(pointer);
        session
    }

    /// The origin tree as it was before the panel was undocked
    pub fn snapshot(&self) -> &LayoutTree {
        &self.snapshot
    }

    /// Record a window raised during this session; it wins Z-order ties
    pub fn bring_to_front(&mut self, window: WindowId) {
        self.front_window = Some(window);
    }

    pub fn front_window(&self) -> Option<WindowId> {
        self.front_window
    }

    /// Topmost window from a topmost-first list, honoring the raised window
    pub fn pick_window(&self, candidates: &[WindowId]) -> Option<WindowId> {
        match self.front_window {
            Some(front) if candidates.contains(&front) => Some(front),
            _ => candidates.first().copied(),
        }
    }

    /// Keep the preview under the pointer at the original grab offset
    pub fn move_preview(&mut self, pointer: Point) -> Rect {
        self.preview.x = pointer.x - self.grab_offset.0;
        self.preview.y = pointer.y - self.grab_offset.1;
        self.preview
    }

    pub fn suspended_modality(&self) -> &[WindowId] {
        &self.suspended
    }
}

/// Bookkeeping produced when a session ends
#[derive(Debug, Clone, PartialEq)]
pub struct DragEnd {
    pub panel: String,
    pub outcome: DragOutcome,
    /// Window whose overlay was still active
    pub overlay: Option<WindowId>,
    /// Origin window closed because the drag left it empty
    pub closed_origin: Option<WindowId>,
}

impl DockingModel {
    /// Start dragging a docked panel
    ///
    /// Snapshots the origin tree, undocks the panel, pauses persistence and
    /// suspends modal windows until the session ends.
    pub fn begin_drag(&mut self, panel: &str, pointer: Point, preview: Rect) -> Result<()> {
        if self.drag.is_some() {
            return Err(DockingError::DragInProgress);
        }
        self.registry.get(panel)?;
        if self.is_auto_hidden(panel) {
            return Err(DockingError::DragRejected {
                id: panel.to_string(),
                reason: "panel is auto-hidden; restore it before dragging".to_string(),
            });
        }
        let origin = self
            .docked_window_of(panel)
            .ok_or_else(|| DockingError::not_found(panel))?;

        let before = self.visible_in(origin);
        let window = self.window_mut(origin)?;
        let snapshot = window.tree.clone();
        window.tree.undock(panel);
        self.emit(DockingEvent::Undocked {
            panel: panel.to_string(),
            window: origin,
        });
        self.emit_visibility(origin, &before, Some(panel));

        self.persistence.pause();

        let mut session = DragSession::new(panel.to_string(), origin, snapshot, pointer, preview);
        for window in self.windows.values_mut() {
            if window.modality == Modality::Modal {
                window.modality = Modality::Modeless;
                session.suspended.push(window.id);
            }
        }

        tracing::debug!(
            "Drag started for {} from window {} ({} modal window(s) suspended)",
            panel,
            origin,
            session.suspended.len()
        );
        self.drag = Some(session);
        Ok(())
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn drag_session_mut(&mut self) -> Option<&mut DragSession> {
        self.drag.as_mut()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Leave the dragging state with `outcome`
    ///
    /// A rollback swaps the origin snapshot back in, keeping the window's
    /// current geometry and state. Either way modality is restored,
    /// persistence resumes with a write requested, and an origin window left
    /// empty is closed unless it is the main window.
    pub fn end_drag(&mut self, outcome: DragOutcome) -> Option<DragEnd> {
        let mut session = self.drag.take()?;
        session.state = outcome.state();

        if let DragOutcome::RolledBack(reason) = &outcome {
            tracing::debug!("Rolling back drag of {}: {:?}", session.panel, reason);
            let before = self.visible_in(session.origin);
            match self.windows.get_mut(&session.origin) {
                Some(window) => {
                    window.tree = restore_snapshot(&session.snapshot, &window.tree);
                    self.emit(DockingEvent::Docked {
                        panel: session.panel.clone(),
                        window: session.origin,
                    });
                    self.emit_visibility(session.origin, &before, Some(&session.panel));
                }
                None => tracing::warn!(
                    "Origin window {} vanished during drag of {}",
                    session.origin,
                    session.panel
                ),
            }
        }

        for id in &session.suspended {
            if let Some(window) = self.windows.get_mut(id) {
                window.modality = Modality::Modal;
            }
        }

        self.persistence.resume();
        self.layout_changed();

        let closed_origin = match self.windows.get(&session.origin) {
            Some(window) if window.is_empty() && !window.is_main => {
                self.windows.remove(&session.origin);
                self.persistence.forget(session.origin);
                Some(session.origin)
            }
            _ => None,
        };

        tracing::debug!("Drag of {} finished: {:?}", session.panel, outcome);
        self.last_drag_outcome = Some(outcome.clone());

        Some(DragEnd {
            panel: session.panel,
            outcome,
            overlay: session.current_window,
            closed_origin,
        })
    }
}

/// The snapshot's nodes with the live window's geometry and state
///
/// Moves and resizes that arrived during the drag already happened on
/// screen; only the docking state is rolled back.
fn restore_snapshot(snapshot: &LayoutTree, live: &LayoutTree) -> LayoutTree {
    let mut restored = snapshot.clone();
    restored.window.position = live.window.position;
    restored.window.size = live.window.size;
    restored.window.state = live.window.state;
    restored
}
