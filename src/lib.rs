//! Dockyard - docking layout engine
//!
//! Panels live in per-window layout trees of splits and tab groups. Panels
//! are moved between them by drag sessions that either commit or roll back
//! to a snapshot, and the whole arrangement is persisted as a JSON document
//! after a short debounce. State changes follow the Elm Architecture: a
//! [`Msg`] goes into [`update::update`], which mutates the [`DockingModel`]
//! and returns a [`Cmd`] for the rendering layer to perform.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod detector;
pub mod error;
pub mod messages;
pub mod model;
pub mod persist;
pub mod surface;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DockingConfig;
pub use error::{DockingError, Result};
pub use messages::Msg;
pub use model::DockingModel;
pub use surface::DockSurface;
