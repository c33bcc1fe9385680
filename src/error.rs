//! Error types for the docking engine
//!
//! Registration and lookup errors indicate a programming error in the host
//! application and are returned to the caller. Persistence errors are
//! recoverable: callers fall back to a default layout on load failure and
//! keep the in-memory state on save failure.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Region, WindowId};

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, DockingError>;

/// Which half of a persistence round trip failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistPhase {
    Load,
    Save,
}

impl fmt::Display for PersistPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistPhase::Load => f.write_str("load"),
            PersistPhase::Save => f.write_str("save"),
        }
    }
}

/// Underlying cause of a persistence failure
#[derive(Debug, Error)]
pub enum PersistenceFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid layout document: {0}")]
    Invalid(String),
}

/// Errors surfaced by the docking engine
#[derive(Debug, Error)]
pub enum DockingError {
    /// A panel with this persistent ID is already registered (or the ID is empty)
    #[error("failed to register panel `{id}`: persistent ID must be unique and non-empty")]
    Registration { id: String },

    /// Lookup of a panel that is not registered or not docked
    #[error("panel `{id}` not found")]
    NotFound { id: String },

    /// Lookup of a window the model does not know about
    #[error("window {window} not found")]
    WindowNotFound { window: WindowId },

    /// An operation that is not defined for the node it was applied to
    #[error("structural error: {message}")]
    Structural { message: String },

    /// Layout file could not be written or read back
    #[error("failed to {phase} layout at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        phase: PersistPhase,
        #[source]
        source: PersistenceFailure,
    },

    /// A drag session is already active; only one may run at a time
    #[error("a drag session is already in progress")]
    DragInProgress,

    /// The panel cannot be dragged in its current state
    #[error("panel `{id}` cannot be dragged: {reason}")]
    DragRejected { id: String, reason: String },
}

impl DockingError {
    pub fn not_found(id: impl Into<String>) -> Self {
        DockingError::NotFound { id: id.into() }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        DockingError::Structural {
            message: message.into(),
        }
    }

    pub(crate) fn center_on_split() -> Self {
        Self::structural(format!(
            "cannot dock to {} of a split node",
            Region::Center
        ))
    }

    pub(crate) fn persistence(
        path: impl Into<PathBuf>,
        phase: PersistPhase,
        source: impl Into<PersistenceFailure>,
    ) -> Self {
        DockingError::Persistence {
            path: path.into(),
            phase,
            source: source.into(),
        }
    }

    /// Whether this error is a recoverable persistence failure
    pub fn is_persistence(&self) -> bool {
        matches!(self, DockingError::Persistence { .. })
    }
}
