//! Docking configuration persistence
//!
//! Stores engine settings in `~/.config/dockyard/config.yaml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::detector::DEFAULT_SENSITIVITY;

/// Engine settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingConfig {
    /// Wrap every docked panel in a tab group, even when it is alone
    #[serde(default)]
    pub always_show_tabs: bool,

    /// Edge band used by region detection, as a fraction of the target size
    #[serde(default = "default_region_sensitivity")]
    pub region_sensitivity: f64,

    /// Debounce delay before a changed layout is written
    #[serde(default = "default_persist_delay_ms")]
    pub persist_delay_ms: u64,

    /// Share given to a panel dropped on a window edge
    #[serde(default = "default_root_edge_proportion")]
    pub root_edge_proportion: f64,

    /// Share given to a panel dropped next to another panel
    #[serde(default = "default_panel_proportion")]
    pub panel_proportion: f64,

    /// Write the layout automatically after changes
    #[serde(default = "default_auto_persist")]
    pub auto_persist: bool,

    /// Layout file; defaults to `layout.json` in the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_file: Option<PathBuf>,
}

fn default_region_sensitivity() -> f64 {
    DEFAULT_SENSITIVITY
}

fn default_persist_delay_ms() -> u64 {
    500
}

fn default_root_edge_proportion() -> f64 {
    0.25
}

fn default_panel_proportion() -> f64 {
    0.5
}

fn default_auto_persist() -> bool {
    true
}

impl Default for DockingConfig {
    fn default() -> Self {
        Self {
            always_show_tabs: false,
            region_sensitivity: default_region_sensitivity(),
            persist_delay_ms: default_persist_delay_ms(),
            root_edge_proportion: default_root_edge_proportion(),
            panel_proportion: default_panel_proportion(),
            auto_persist: default_auto_persist(),
            layout_file: None,
        }
    }
}

impl DockingConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or invalid files give defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn persist_delay(&self) -> Duration {
        Duration::from_millis(self.persist_delay_ms)
    }

    /// Configured layout file, falling back to the config directory
    pub fn layout_path(&self) -> Option<PathBuf> {
        self.layout_file
            .clone()
            .or_else(crate::config_paths::layout_file)
    }

    /// Clamp out-of-range values back into their valid ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.region_sensitivity > 0.0 && self.region_sensitivity < 0.5) {
            tracing::warn!(
                "region_sensitivity {} out of range, using {}",
                self.region_sensitivity,
                defaults.region_sensitivity
            );
            self.region_sensitivity = defaults.region_sensitivity;
        }
        for (value, default) in [
            (&mut self.root_edge_proportion, defaults.root_edge_proportion),
            (&mut self.panel_proportion, defaults.panel_proportion),
        ] {
            if !(0.0..=1.0).contains(value) {
                tracing::warn!("proportion {} out of range, using {}", value, default);
                *value = default;
            }
        }
        self
    }
}
