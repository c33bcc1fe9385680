//! Persistence message handlers

use std::time::Instant;

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::PersistMsg;
use crate::model::{DockingModel, Rect, RestoreReport};
use crate::persist::LayoutEvent;

/// Emit a background write once the debounce timer has expired
pub fn tick(model: &mut DockingModel, now: Instant) -> Option<Cmd> {
    let path = model.persistence.due(now)?;
    tracing::debug!("Layout write due for {}", path.display());
    let layout = model.application_layout();
    Some(Cmd::WriteLayout { path, layout })
}

/// Handle persistence messages
pub fn update_persist(model: &mut DockingModel, msg: PersistMsg) -> Result<Option<Cmd>> {
    match msg {
        PersistMsg::Pause => {
            model.persistence.pause();
            Ok(None)
        }
        PersistMsg::Resume => {
            // The drag session resumes persistence when it ends
            if !model.is_dragging() {
                model.persistence.resume();
            }
            Ok(None)
        }
        PersistMsg::SaveNow => {
            let Some(path) = model.persistence.target.clone() else {
                tracing::warn!("SaveNow requested but no layout file is configured");
                return Ok(None);
            };
            let layout = model.application_layout();
            Ok(Some(Cmd::WriteLayout { path, layout }))
        }
        PersistMsg::Restore { path, default } => {
            let report = model.restore_from(&path, &default)?;
            Ok(Some(restore_cmd(model, report)))
        }
        PersistMsg::WriteCompleted { path, result } => {
            match result {
                Ok(()) => {
                    tracing::info!("Layout written to {}", path.display());
                    model.layouts.push_event(LayoutEvent::Persisted(path));
                }
                Err(e) => tracing::error!("Failed to write layout to {}: {}", path.display(), e),
            }
            Ok(None)
        }
        PersistMsg::SaveNamed(name) => {
            model.save_named(&name);
            Ok(None)
        }
        PersistMsg::RestoreNamed(name) => {
            let report = model.restore_named(&name)?;
            Ok(Some(restore_cmd(model, report)))
        }
        PersistMsg::RemoveNamed(name) => {
            if model.layouts.remove(&name).is_none() {
                tracing::debug!("No layout named {} to remove", name);
            }
            Ok(None)
        }
    }
}

/// Window commands for a restored layout
fn restore_cmd(model: &DockingModel, report: RestoreReport) -> Cmd {
    let mut cmds: Vec<Cmd> = report.closed.into_iter().map(Cmd::CloseWindow).collect();
    for window in report.opened {
        if let Ok(opened) = model.window(window) {
            let meta = opened.meta();
            cmds.push(Cmd::OpenWindow {
                window,
                bounds: Rect::from_origin_size(meta.position, meta.size),
            });
        }
    }
    cmds.push(Cmd::Redraw);
    Cmd::batch(cmds)
}
