//! Drag session transitions driven by pointer events
//!
//! Press starts a session, every move re-resolves the drop target under the
//! pointer, release commits (or rolls back) and cancel always rolls back.

use crate::commands::Cmd;
use crate::detector::{legal_region_for, HandleKind, HandleLayout};
use crate::error::{DockingError, Result};
use crate::messages::{PointerEvent, PointerKind};
use crate::model::{
    DockingModel, DragOutcome, DropTarget, Point, Rect, Region, RollbackReason, Size,
};
use crate::surface::DockSurface;

/// Preview size used when the surface cannot report the panel's bounds
const DEFAULT_PREVIEW_SIZE: Size = Size {
    width: 320.0,
    height: 240.0,
};

/// Handle pointer events
pub fn update_pointer(
    model: &mut DockingModel,
    event: PointerEvent,
    surface: &dyn DockSurface,
) -> Result<Option<Cmd>> {
    match event.kind {
        PointerKind::Pressed { panel } => start_drag(model, &panel, event.position, surface).map(Some),
        PointerKind::Moved => Ok(drag_moved(model, event.position, surface)),
        PointerKind::Released => Ok(drag_released(model, event.position, surface)),
        PointerKind::Cancelled => Ok(model
            .is_dragging()
            .then(|| finish_drag(model, DragOutcome::RolledBack(RollbackReason::Cancelled)))),
    }
}

fn start_drag(
    model: &mut DockingModel,
    panel: &str,
    pointer: Point,
    surface: &dyn DockSurface,
) -> Result<Cmd> {
    let bounds = model
        .docked_window_of(panel)
        .and_then(|window| surface.panel_bounds(window, panel))
        .unwrap_or_else(|| Rect::from_origin_size(pointer, DEFAULT_PREVIEW_SIZE));

    model.begin_drag(panel, pointer, bounds)?;

    let preview = model
        .drag_session()
        .map(|session| session.preview)
        .unwrap_or(bounds);
    let mut cmds = vec![
        Cmd::ShowFloatingPreview {
            panel: panel.to_string(),
            bounds: preview,
        },
        Cmd::Redraw,
    ];
    cmds.extend(track_target(model, pointer, surface));
    Ok(Cmd::batch(cmds))
}

fn drag_moved(model: &mut DockingModel, pointer: Point, surface: &dyn DockSurface) -> Option<Cmd> {
    let bounds = model.drag_session_mut()?.move_preview(pointer);
    let mut cmds = vec![Cmd::MoveFloatingPreview { bounds }];
    cmds.extend(track_target(model, pointer, surface));
    Some(Cmd::batch(cmds))
}

fn drag_released(
    model: &mut DockingModel,
    pointer: Point,
    surface: &dyn DockSurface,
) -> Option<Cmd> {
    let preview = model.drag_session_mut()?.move_preview(pointer);
    let target = resolve_target(model, pointer, surface);
    let outcome = commit(model, target, preview);
    Some(finish_drag(model, outcome))
}

/// Re-resolve the drop target and emit overlay changes
fn track_target(model: &mut DockingModel, pointer: Point, surface: &dyn DockSurface) -> Vec<Cmd> {
    let target = resolve_target(model, pointer, surface);
    let Some(session) = model.drag_session_mut() else {
        return Vec::new();
    };

    let overlay = match target {
        DropTarget::Outside | DropTarget::Restricted { .. } => None,
        _ => target.window(),
    };

    let mut cmds = Vec::new();
    if overlay != session.current_window {
        if let Some(old) = session.current_window {
            cmds.push(Cmd::DeactivateOverlay(old));
        }
        if let Some(new) = overlay {
            cmds.push(Cmd::ActivateOverlay(new));
        }
        session.current_window = overlay;
    }

    if target != session.target {
        if let Some(window) = overlay {
            cmds.push(Cmd::Highlight {
                window,
                target: target.clone(),
            });
        }
        session.target = target;
    }
    cmds
}

/// What a release at `pointer` would do
///
/// Root handles are checked before panel handles; an empty root takes the
/// panel at CENTER wherever the pointer is. A panel limited to its window
/// gets no drop zones on any other window.
pub fn resolve_target(model: &DockingModel, pointer: Point, surface: &dyn DockSurface) -> DropTarget {
    let Some(session) = model.drag_session() else {
        return DropTarget::Outside;
    };
    let Some(window) = session.pick_window(&surface.windows_at(pointer)) else {
        return DropTarget::Outside;
    };
    let (Ok(spec), Ok(dock_window)) = (model.registry.get(&session.panel), model.window(window)) else {
        return DropTarget::Outside;
    };

    if spec.limited_to_window && window != session.origin {
        return DropTarget::Restricted { window };
    }
    let Some(root) = surface.root_bounds(window) else {
        return DropTarget::Window { window };
    };

    let tree = &dock_window.tree;
    let disallowed = spec.disallowed_regions;
    let sensitivity = model.config.region_sensitivity;

    match HandleLayout::for_root(root, tree.is_empty(), spec.pinnable, disallowed).hit(pointer) {
        Some(HandleKind::Region(region)) => {
            return DropTarget::Root {
                window,
                region,
                handle: true,
            }
        }
        Some(HandleKind::Pin(edge)) => return DropTarget::Pin { window, edge },
        None => {}
    }

    if tree.is_empty() {
        return DropTarget::Root {
            window,
            region: Region::Center,
            handle: false,
        };
    }

    if let Some((target, rect)) = surface.panel_at(window, pointer) {
        if tree.contains(&target) {
            let target_disallowed = model
                .registry
                .get(&target)
                .map(|s| s.disallowed_regions)
                .unwrap_or_default();
            let blocked = disallowed.union(target_disallowed);
            let region = match HandleLayout::for_panel(rect, blocked).hit(pointer) {
                Some(HandleKind::Region(region)) => region,
                _ => legal_region_for(pointer, rect, sensitivity, blocked),
            };
            return DropTarget::Panel {
                window,
                target,
                region,
            };
        }
    }

    match legal_region_for(pointer, root, sensitivity, disallowed) {
        Region::Center => DropTarget::Window { window },
        region => DropTarget::Root {
            window,
            region,
            handle: false,
        },
    }
}

/// Apply the release, in priority order:
/// root handle, window restriction, pin handle, panel, root edge band,
/// floating restriction, new floating window
fn commit(model: &mut DockingModel, target: DropTarget, preview: Rect) -> DragOutcome {
    let Some(session) = model.drag_session() else {
        return DragOutcome::RolledBack(RollbackReason::Cancelled);
    };
    let panel = session.panel.clone();
    let origin = session.origin;
    let (limited, floatable) = match model.registry.get(&panel) {
        Ok(spec) => (spec.limited_to_window, spec.floatable),
        Err(e) => return DragOutcome::RolledBack(RollbackReason::Failed(e.to_string())),
    };
    let root_proportion = model.config.root_edge_proportion;
    let panel_proportion = model.config.panel_proportion;

    let committed: Result<DragOutcome> = match target {
        DropTarget::Root {
            window,
            region,
            handle: true,
        } => model
            .dock_to_root(window, &panel, region, root_proportion)
            .map(|()| DragOutcome::Docked {
                window,
                target: None,
                region,
            }),
        ref other if limited && other.window() != Some(origin) => {
            return DragOutcome::RolledBack(RollbackReason::LimitedToWindow);
        }
        DropTarget::Pin { window, edge } => model
            .auto_hide_in(window, &panel, edge)
            .map(|()| DragOutcome::AutoHidden { window, edge }),
        DropTarget::Panel {
            window,
            target,
            region,
        } => model
            .dock(&panel, &target, region, panel_proportion)
            .map(|()| DragOutcome::Docked {
                window,
                target: Some(target),
                region,
            }),
        DropTarget::Root {
            window,
            region,
            handle: false,
        } => model
            .dock_to_root(window, &panel, region, root_proportion)
            .map(|()| DragOutcome::Docked {
                window,
                target: None,
                region,
            }),
        _ if !floatable => return DragOutcome::RolledBack(RollbackReason::NotFloatable),
        _ => model
            .float_panel(&panel, preview)
            .map(|window| DragOutcome::Floated { window }),
    };

    committed.unwrap_or_else(|e: DockingError| {
        tracing::warn!("Drop of {} failed, rolling back: {}", panel, e);
        DragOutcome::RolledBack(RollbackReason::Failed(e.to_string()))
    })
}

fn finish_drag(model: &mut DockingModel, outcome: DragOutcome) -> Cmd {
    let Some(end) = model.end_drag(outcome) else {
        return Cmd::None;
    };

    let mut cmds = Vec::new();
    if let Some(window) = end.overlay {
        cmds.push(Cmd::DeactivateOverlay(window));
    }
    cmds.push(Cmd::DestroyFloatingPreview);

    if let DragOutcome::Floated { window } = &end.outcome {
        if let Ok(floating) = model.window(*window) {
            let meta = floating.meta();
            cmds.push(Cmd::OpenWindow {
                window: *window,
                bounds: Rect::from_origin_size(meta.position, meta.size),
            });
        }
    }
    if let Some(closed) = end.closed_origin {
        cmds.push(Cmd::CloseWindow(closed));
    }

    cmds.push(Cmd::Redraw);
    cmds.push(Cmd::DragFinished(end.outcome));
    Cmd::batch(cmds)
}
