//! Command types for the Elm-style architecture
//!
//! Commands are side effects the rendering layer performs after an update.

use std::path::PathBuf;

use crate::model::{DragOutcome, DropTarget, Rect, WindowId};
use crate::persist::AppLayout;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Layout changed; redraw docked windows
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // === Drag feedback ===
    /// Show the transient floating preview for a dragged panel
    ShowFloatingPreview { panel: String, bounds: Rect },
    MoveFloatingPreview { bounds: Rect },
    DestroyFloatingPreview,
    /// Show a window's drop overlay (handles and highlight)
    ActivateOverlay(WindowId),
    DeactivateOverlay(WindowId),
    /// Update the highlighted drop zone within a window's overlay
    Highlight { window: WindowId, target: DropTarget },
    /// Drag session ended
    DragFinished(DragOutcome),

    // === Windows ===
    OpenWindow { window: WindowId, bounds: Rect },
    CloseWindow(WindowId),

    // === Persistence ===
    /// Write a layout document in the background
    /// Sends Msg::Persist(WriteCompleted) when done
    WriteLayout { path: PathBuf, layout: AppLayout },
}

impl Cmd {
    /// Create a batch, collapsing empty and single-command batches
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // The preview and overlays are separate surfaces
            Cmd::ShowFloatingPreview { .. }
            | Cmd::MoveFloatingPreview { .. }
            | Cmd::DestroyFloatingPreview
            | Cmd::ActivateOverlay(_)
            | Cmd::DeactivateOverlay(_)
            | Cmd::Highlight { .. } => false,
            Cmd::DragFinished(outcome) => outcome.is_committed(),
            Cmd::OpenWindow { .. } | Cmd::CloseWindow(_) => true,
            Cmd::WriteLayout { .. } => false,
        }
    }

    /// Iterate this command and the contents of nested batches, depth first
    pub fn flatten(&self) -> Vec<&Cmd> {
        match self {
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::flatten).collect(),
            Cmd::None => Vec::new(),
            other => vec![other],
        }
    }
}
