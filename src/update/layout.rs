//! Programmatic layout message handlers

use crate::commands::Cmd;
use crate::error::{DockingError, Result};
use crate::messages::LayoutMsg;
use crate::model::DockingModel;

/// Handle layout messages
///
/// Rejected while a drag is in progress: the session's snapshot would
/// silently discard the change on rollback.
pub fn update_layout(model: &mut DockingModel, msg: LayoutMsg) -> Result<Option<Cmd>> {
    if model.is_dragging() {
        return Err(DockingError::DragInProgress);
    }

    match msg {
        LayoutMsg::DockToRoot {
            window,
            panel,
            region,
            proportion,
        } => model.dock_to_root(window, &panel, region, proportion)?,
        LayoutMsg::Dock {
            panel,
            target,
            region,
            proportion,
        } => model.dock(&panel, &target, region, proportion)?,
        LayoutMsg::Undock(panel) => model.undock(&panel)?,
        LayoutMsg::Close(panel) => model.close_panel(&panel)?,
        LayoutMsg::AutoHide { panel, edge } => model.auto_hide(&panel, edge)?,
        LayoutMsg::RestoreAutoHidden(panel) => model.restore_auto_hidden(&panel)?,
        LayoutMsg::Maximize(panel) => model.maximize(&panel)?,
        LayoutMsg::RestoreMaximized(window) => {
            if model.restore_maximized(window)?.is_none() {
                return Ok(None);
            }
        }
        LayoutMsg::SelectTab(panel) => model.select_tab(&panel)?,
        LayoutMsg::SetDivider {
            window,
            split,
            proportion,
        } => model.set_divider_proportion(window, split, proportion)?,
    }

    Ok(Some(Cmd::Redraw))
}
