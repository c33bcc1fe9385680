//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod drag;
pub mod layout;
mod persist;
mod window;

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::Msg;
use crate::model::DockingModel;
use crate::surface::DockSurface;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use drag::{resolve_target, update_pointer};
pub use layout::update_layout;
pub use persist::{tick, update_persist};
pub use window::update_window;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation, logs which
/// panels moved, and checks every window's tree after the message is applied.
#[inline]
pub fn update(model: &mut DockingModel, msg: Msg, surface: &dyn DockSurface) -> Result<Option<Cmd>> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg, surface)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg, surface)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut DockingModel, msg: Msg, surface: &dyn DockSurface) -> Result<Option<Cmd>> {
    match msg {
        Msg::Pointer(event) => drag::update_pointer(model, event, surface),
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Window(m) => window::update_window(model, m),
        Msg::Persist(m) => persist::update_persist(model, m),
        Msg::Tick(now) => Ok(persist::tick(model, now)),
    }
}

/// Traced update wrapper (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut DockingModel, msg: Msg, surface: &dyn DockSurface) -> Result<Option<Cmd>> {
    use crate::messages::{PointerEvent, PointerKind};
    use crate::tracing::LayoutSnapshot;

    // Ticks and pointer motion arrive continuously
    let is_noisy = matches!(
        &msg,
        Msg::Tick(_)
            | Msg::Pointer(PointerEvent {
                kind: PointerKind::Moved,
                ..
            })
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };
    let before = LayoutSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg, surface);

    if let Some(diff) = before.diff(&LayoutSnapshot::from_model(model)) {
        debug!(target: "layout", %diff, "placement changed");
    }

    for window in model.windows() {
        if let Err(e) = window.tree.validate() {
            panic!("window {} invalid after {}: {}", window.id, msg_name, e);
        }
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Layout::Undock("files")`
/// - `Persist::SaveNow`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::PersistMsg;

    match msg {
        Msg::Pointer(e) => format!("Pointer::{:?}", e.kind),
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Window(m) => format!("Window::{:?}", m),
        Msg::Persist(PersistMsg::Restore { path, .. }) => {
            format!("Persist::Restore({})", path.display())
        }
        Msg::Persist(m) => format!("Persist::{:?}", m),
        Msg::Tick(_) => "Tick".to_string(),
    }
}
