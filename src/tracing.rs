//! Logging setup and layout diffing for diagnostics
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=dockyard::update::drag=debug` - drag session transitions only
//! - `RUST_LOG=dockyard::model::layout=debug` - structural tree changes
//! - `RUST_LOG=layout=debug` - per-message placement diffs (debug builds)
//!
//! Logs are also written to `<config dir>/dockyard/logs/dockyard.log` with
//! daily rotation. The file always records debug level, so a drag that went
//! wrong can be reconstructed after the fact.

use std::collections::BTreeMap;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{DockingModel, WindowId};

/// Install the console and rolling file subscribers
///
/// Console output respects RUST_LOG (default `warn`) and goes to stderr so
/// `dockyard inspect` output stays clean on stdout.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "dockyard.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Which panels each window shows, for before/after comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSnapshot {
    windows: BTreeMap<WindowId, WindowPanels>,
    dragging: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowPanels {
    docked: Vec<String>,
    auto_hidden: Vec<String>,
}

impl LayoutSnapshot {
    pub fn from_model(model: &DockingModel) -> Self {
        Self {
            windows: model
                .windows()
                .map(|w| {
                    (
                        w.id,
                        WindowPanels {
                            docked: w.tree.panel_ids(),
                            auto_hidden: w.meta().auto_hide.ids().cloned().collect(),
                        },
                    )
                })
                .collect(),
            dragging: model.drag_session().map(|s| s.panel.clone()),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.dragging != other.dragging {
            changes.push(match (&self.dragging, &other.dragging) {
                (None, Some(panel)) => format!("drag of {} started", panel),
                (Some(panel), None) => format!("drag of {} ended", panel),
                (before, after) => format!("drag {:?} → {:?}", before, after),
            });
        }

        for (id, before) in &self.windows {
            match other.windows.get(id) {
                None => changes.push(format!("window {} closed", id)),
                Some(after) if after != before => {
                    if after.docked != before.docked {
                        changes.push(format!(
                            "window {}: [{}] → [{}]",
                            id,
                            before.docked.join(", "),
                            after.docked.join(", ")
                        ));
                    }
                    if after.auto_hidden != before.auto_hidden {
                        changes.push(format!(
                            "window {} auto-hide: [{}] → [{}]",
                            id,
                            before.auto_hidden.join(", "),
                            after.auto_hidden.join(", ")
                        ));
                    }
                }
                Some(_) => {}
            }
        }
        for (id, after) in &other.windows {
            if !self.windows.contains_key(id) {
                changes.push(format!("window {} opened with [{}]", id, after.docked.join(", ")));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
