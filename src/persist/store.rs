//! Reading and writing layout documents on disk
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! crash mid-write never leaves a truncated layout behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DockingError, PersistPhase, PersistenceFailure, Result};

use super::document::{AppLayout, WindowLayout};

/// Layout file at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutStore {
    path: PathBuf,
}

impl LayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, layout: &AppLayout) -> Result<()> {
        write_json(&self.path, layout)?;
        tracing::info!(
            "Saved layout with {} window(s) to {}",
            layout.windows.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load and validate the document
    pub fn load(&self) -> Result<AppLayout> {
        let layout: AppLayout = read_json(&self.path)?;
        layout.validate().map_err(|message| {
            DockingError::persistence(
                &self.path,
                PersistPhase::Load,
                PersistenceFailure::Invalid(message),
            )
        })?;
        tracing::info!(
            "Loaded layout with {} window(s) from {}",
            layout.windows.len(),
            self.path.display()
        );
        Ok(layout)
    }
}

/// Save a single window's layout
pub fn save_window(path: &Path, layout: &WindowLayout) -> Result<()> {
    write_json(path, layout)?;
    tracing::info!("Saved window layout to {}", path.display());
    Ok(())
}

/// Load a single window's layout
pub fn load_window(path: &Path) -> Result<WindowLayout> {
    let layout: WindowLayout = read_json(path)?;
    // Reuse the document checks by wrapping the window as a one-window app layout
    let mut probe = layout.clone();
    probe.main = true;
    AppLayout::new(vec![probe]).validate().map_err(|message| {
        DockingError::persistence(path, PersistPhase::Load, PersistenceFailure::Invalid(message))
    })?;
    Ok(layout)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let fail = |source: PersistenceFailure| DockingError::persistence(path, PersistPhase::Save, source);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| fail(e.into()))?;
    }

    let content = serde_json::to_string_pretty(value).map_err(|e| fail(e.into()))?;
    let temp = temp_path(path);
    fs::write(&temp, content).map_err(|e| fail(e.into()))?;
    fs::rename(&temp, path).map_err(|e| {
        let _ = fs::remove_file(&temp);
        fail(e.into())
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let fail = |source: PersistenceFailure| DockingError::persistence(path, PersistPhase::Load, source);
    let content = fs::read_to_string(path).map_err(|e| fail(e.into()))?;
    serde_json::from_str(&content).map_err(|e| fail(e.into()))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "layout".into());
    name.push(".tmp");
    path.with_file_name(name)
}
