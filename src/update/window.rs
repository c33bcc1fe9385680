//! Window event handlers

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::WindowMsg;
use crate::model::DockingModel;

/// Handle window events reported by the windowing layer
pub fn update_window(model: &mut DockingModel, msg: WindowMsg) -> Result<Option<Cmd>> {
    match msg {
        WindowMsg::Moved { window, position } => {
            let size = model.window(window)?.meta().size;
            model.set_window_bounds(window, position, size)?;
            Ok(None)
        }
        WindowMsg::Resized { window, size } => {
            let position = model.window(window)?.meta().position;
            model.set_window_bounds(window, position, size)?;
            Ok(Some(Cmd::Redraw))
        }
        WindowMsg::StateChanged { window, state } => {
            model.set_window_state(window, state)?;
            Ok(Some(Cmd::Redraw))
        }
        WindowMsg::BroughtToFront(window) => {
            if let Some(session) = model.drag_session_mut() {
                tracing::trace!("Window {} raised during drag", window);
                session.bring_to_front(window);
            }
            Ok(None)
        }
        WindowMsg::Closed(window) => {
            let closed = model.remove_window(window)?;
            tracing::debug!(
                "Window {} closed with {} panel(s)",
                window,
                closed.tree.panel_ids().len()
            );
            Ok(Some(Cmd::batch(vec![Cmd::CloseWindow(window), Cmd::Redraw])))
        }
    }
}
