//! Docking model - the complete state of the docking engine
//!
//! `DockingModel` is the engine object passed into every operation: it owns
//! the panel registry, each window's layout tree, persistence state, named
//! layouts and the active drag session. Nothing here is process-global, so
//! independent models can coexist.

pub mod drag;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod region;
pub mod registry;
pub mod window;

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::time::Instant;

pub use drag::{DragEnd, DragOutcome, DragSession, DragState, DropTarget, RollbackReason};
pub use events::DockingEvent;
pub use geometry::{Point, Rect, Size};
pub use layout::{LayoutNode, LayoutTree, Leaf, NodeId, NodeKind, Split, Tab};
pub use region::{Orientation, Region, RegionSet};
pub use registry::{PanelRegistry, PanelSpec};
pub use window::{AutoHide, AutoHideEdge, DockWindow, Modality, WindowId, WindowMeta, WindowState};

use crate::config::DockingConfig;
use crate::error::{DockingError, Result};
use crate::persist::{
    AppLayout, LayoutEvent, LayoutStore, NamedLayouts, Persistence, UndockedPanel, WindowLayout,
};

/// Windows opened and closed by restoring a layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub opened: Vec<WindowId>,
    pub closed: Vec<WindowId>,
}

/// Where `take_panel` found a panel
enum Placement {
    Docked,
    AutoHidden,
}

/// The complete docking engine state
#[derive(Debug)]
pub struct DockingModel {
    pub config: DockingConfig,
    pub registry: PanelRegistry,
    windows: BTreeMap<WindowId, DockWindow>,
    main_window: Option<WindowId>,
    next_window_id: u64,
    pub persistence: Persistence,
    pub layouts: NamedLayouts,
    pub(crate) drag: Option<DragSession>,
    pub last_drag_outcome: Option<DragOutcome>,
    events: VecDeque<DockingEvent>,
}

impl Default for DockingModel {
    fn default() -> Self {
        Self::new(DockingConfig::default())
    }
}

impl DockingModel {
    pub fn new(config: DockingConfig) -> Self {
        let persistence = Persistence::new(
            config.persist_delay(),
            config.layout_path(),
            config.auto_persist,
        );
        Self {
            config,
            registry: PanelRegistry::new(),
            windows: BTreeMap::new(),
            main_window: None,
            next_window_id: 1,
            persistence,
            layouts: NamedLayouts::new(),
            drag: None,
            last_drag_outcome: None,
            events: VecDeque::new(),
        }
    }

    /// Restart the persistence debounce timer
    pub fn layout_changed(&mut self) {
        self.persistence.request(Instant::now());
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Take every queued docking event, oldest first
    pub fn drain_events(&mut self) -> Vec<DockingEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn emit(&mut self, event: DockingEvent) {
        tracing::trace!("Docking event {:?}", event);
        self.events.push_back(event);
    }

    pub(crate) fn visible_in(&self, window: WindowId) -> Vec<String> {
        self.windows
            .get(&window)
            .map(|w| w.tree.visible_panels())
            .unwrap_or_default()
    }

    /// Queue Shown/Hidden for panels whose visibility in `window` changed
    ///
    /// `subject` is the panel being docked or undocked; its own change is
    /// reported as Docked/Undocked instead.
    pub(crate) fn emit_visibility(&mut self, window: WindowId, before: &[String], subject: Option<&str>) {
        let after = self.visible_in(window);
        let others = |id: &&String| Some(id.as_str()) != subject;
        let hidden: Vec<String> = before
            .iter()
            .filter(others)
            .filter(|id| !after.contains(*id))
            .cloned()
            .collect();
        let shown: Vec<String> = after
            .iter()
            .filter(others)
            .filter(|id| !before.contains(*id))
            .cloned()
            .collect();
        for id in hidden {
            self.emit(DockingEvent::Hidden(id));
        }
        for id in shown {
            self.emit(DockingEvent::Shown(id));
        }
    }

    /// Window of every placed panel
    fn placements(&self) -> BTreeMap<String, WindowId> {
        self.windows
            .values()
            .flat_map(|w| {
                w.tree
                    .panel_ids()
                    .into_iter()
                    .chain(w.meta().auto_hide.ids().cloned())
                    .map(move |id| (id, w.id))
            })
            .collect()
    }

    /// Queue Undocked/Docked for panels a bulk restore moved
    fn emit_placement_changes(&mut self, before: &BTreeMap<String, WindowId>) {
        let after = self.placements();
        for (panel, &window) in before {
            if after.get(panel) != Some(&window) {
                self.emit(DockingEvent::Undocked {
                    panel: panel.clone(),
                    window,
                });
            }
        }
        for (panel, &window) in &after {
            if before.get(panel) != Some(&window) {
                self.emit(DockingEvent::Docked {
                    panel: panel.clone(),
                    window,
                });
            }
        }
    }

    fn record_docked(&mut self, panel: &str, window: WindowId, before: &[String]) {
        self.emit(DockingEvent::Docked {
            panel: panel.to_string(),
            window,
        });
        self.emit_visibility(window, before, Some(panel));
        self.layout_changed();
    }

    // ========================================================================
    // Windows
    // ========================================================================

    /// Add a top-level window; the first window added becomes the main window
    pub fn add_window(&mut self, meta: WindowMeta) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;

        let is_main = self.main_window.is_none();
        if is_main {
            self.main_window = Some(id);
        }

        let tree = LayoutTree::new(meta).with_always_show_tabs(self.config.always_show_tabs);
        self.windows.insert(
            id,
            DockWindow {
                id,
                tree,
                is_main,
                modality: Modality::Modeless,
            },
        );
        tracing::debug!("Added window {} (main: {})", id, is_main);
        id
    }

    /// Close a window, undocking whatever it holds
    ///
    /// The main window cannot be removed, and no window can be removed while
    /// a drag is active.
    pub fn remove_window(&mut self, id: WindowId) -> Result<DockWindow> {
        if self.drag.is_some() {
            return Err(DockingError::DragInProgress);
        }
        if self.main_window == Some(id) {
            return Err(DockingError::structural("the main window cannot be removed"));
        }
        let window = self
            .windows
            .remove(&id)
            .ok_or(DockingError::WindowNotFound { window: id })?;
        self.persistence.forget(id);
        for panel in window
            .tree
            .panel_ids()
            .into_iter()
            .chain(window.meta().auto_hide.ids().cloned())
        {
            self.emit(DockingEvent::Undocked { panel, window: id });
        }
        self.layout_changed();
        tracing::debug!("Removed window {}", id);
        Ok(window)
    }

    pub fn set_main_window(&mut self, id: WindowId) -> Result<()> {
        self.window(id)?;
        for window in self.windows.values_mut() {
            window.is_main = window.id == id;
        }
        self.main_window = Some(id);
        Ok(())
    }

    pub fn main_window(&self) -> Option<WindowId> {
        self.main_window
    }

    pub fn window(&self, id: WindowId) -> Result<&DockWindow> {
        self.windows
            .get(&id)
            .ok_or(DockingError::WindowNotFound { window: id })
    }

    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut DockWindow> {
        self.windows
            .get_mut(&id)
            .ok_or(DockingError::WindowNotFound { window: id })
    }

    pub fn windows(&self) -> impl Iterator<Item = &DockWindow> {
        self.windows.values()
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn set_modality(&mut self, id: WindowId, modality: Modality) -> Result<()> {
        self.window_mut(id)?.modality = modality;
        Ok(())
    }

    pub fn set_window_bounds(&mut self, id: WindowId, position: Point, size: Size) -> Result<()> {
        let meta = self.window_mut(id)?.meta_mut();
        meta.position = position;
        meta.size = size;
        self.layout_changed();
        Ok(())
    }

    pub fn set_window_state(&mut self, id: WindowId, state: WindowState) -> Result<()> {
        self.window_mut(id)?.meta_mut().state = state;
        self.layout_changed();
        Ok(())
    }

    // ========================================================================
    // Panels
    // ========================================================================

    pub fn register_panel(&mut self, spec: PanelSpec) -> Result<()> {
        self.registry.register(spec)
    }

    /// Deregister a panel, undocking it first
    pub fn deregister_panel(&mut self, persistent_id: &str) -> Result<PanelSpec> {
        self.registry.get(persistent_id)?;
        if self.try_undock(persistent_id) {
            tracing::debug!("Undocked {} before deregistering", persistent_id);
        }
        self.registry.deregister(persistent_id)
    }

    /// Window whose tree holds the panel
    pub fn docked_window_of(&self, persistent_id: &str) -> Option<WindowId> {
        self.windows
            .values()
            .find(|w| w.tree.contains(persistent_id))
            .map(|w| w.id)
    }

    /// Window holding the panel in its tree or on an auto-hide edge
    pub fn window_of(&self, persistent_id: &str) -> Option<WindowId> {
        self.windows
            .values()
            .find(|w| {
                w.tree.contains(persistent_id) || w.meta().auto_hide.find(persistent_id).is_some()
            })
            .map(|w| w.id)
    }

    pub fn is_docked(&self, persistent_id: &str) -> bool {
        self.docked_window_of(persistent_id).is_some()
    }

    pub fn is_auto_hidden(&self, persistent_id: &str) -> bool {
        self.windows
            .values()
            .any(|w| w.meta().auto_hide.find(persistent_id).is_some())
    }

    /// Leaf for a registered panel that is not placed anywhere yet
    fn dockable_leaf(&self, persistent_id: &str) -> Result<Leaf> {
        let spec = self.registry.get(persistent_id)?;
        if let Some(window) = self.window_of(persistent_id) {
            return Err(DockingError::structural(format!(
                "panel `{}` is already placed in window {}",
                persistent_id, window
            )));
        }
        Ok(spec.leaf())
    }

    /// Dock a panel onto a window's root
    pub fn dock_to_root(
        &mut self,
        window: WindowId,
        persistent_id: &str,
        region: Region,
        proportion: f64,
    ) -> Result<()> {
        let leaf = self.dockable_leaf(persistent_id)?;
        let before = self.visible_in(window);
        self.window_mut(window)?
            .tree
            .dock_to_root(leaf, region, proportion)?;
        self.record_docked(persistent_id, window, &before);
        Ok(())
    }

    /// Dock a panel next to an already docked panel, in whichever window holds it
    pub fn dock(
        &mut self,
        persistent_id: &str,
        target: &str,
        region: Region,
        proportion: f64,
    ) -> Result<()> {
        let leaf = self.dockable_leaf(persistent_id)?;
        let window = self
            .docked_window_of(target)
            .ok_or_else(|| DockingError::not_found(target))?;
        let before = self.visible_in(window);
        self.window_mut(window)?
            .tree
            .dock(leaf, target, region, proportion)?;
        self.record_docked(persistent_id, window, &before);
        Ok(())
    }

    /// Undock a panel the caller expects to be placed
    pub fn undock(&mut self, persistent_id: &str) -> Result<()> {
        if self.try_undock(persistent_id) {
            Ok(())
        } else {
            Err(DockingError::not_found(persistent_id))
        }
    }

    /// Remove a panel from its tree or auto-hide edge; false if it was not placed
    ///
    /// The leaf's properties are copied back to the registration so a later
    /// dock restores them.
    pub fn try_undock(&mut self, persistent_id: &str) -> bool {
        let Some(window) = self.window_of(persistent_id) else {
            return false;
        };
        let before = self.visible_in(window);
        let panel = persistent_id.to_string();
        match self.take_panel(window, persistent_id) {
            Some(Placement::Docked) => {
                self.emit(DockingEvent::Undocked { panel, window });
                self.emit_visibility(window, &before, Some(persistent_id));
            }
            Some(Placement::AutoHidden) => {
                self.emit(DockingEvent::AutoHideDisabled {
                    panel: panel.clone(),
                    window,
                });
                self.emit(DockingEvent::Undocked { panel, window });
            }
            None => return false,
        }
        self.layout_changed();
        true
    }

    /// Remove a panel from one window without queueing events
    fn take_panel(&mut self, window: WindowId, persistent_id: &str) -> Option<Placement> {
        let window = self.windows.get_mut(&window)?;
        if let Some(leaf) = window.tree.find(persistent_id).and_then(|n| n.as_leaf()) {
            if let Ok(spec) = self.registry.get_mut(persistent_id) {
                spec.properties = leaf.properties.clone();
            }
        }
        if window.tree.undock(persistent_id) {
            Some(Placement::Docked)
        } else if window.meta_mut().auto_hide.remove(persistent_id) {
            Some(Placement::AutoHidden)
        } else {
            None
        }
    }

    /// Undock a panel at the user's request; panels registered as not
    /// closable refuse
    pub fn close_panel(&mut self, persistent_id: &str) -> Result<()> {
        if !self.registry.get(persistent_id)?.closable {
            return Err(DockingError::structural(format!(
                "panel `{}` is not closable",
                persistent_id
            )));
        }
        self.undock(persistent_id)
    }

    /// Move a docked panel onto one of its window's auto-hide edges
    pub fn auto_hide(&mut self, persistent_id: &str, edge: AutoHideEdge) -> Result<()> {
        let window = self
            .docked_window_of(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))?;
        self.auto_hide_in(window, persistent_id, edge)
    }

    /// Auto-hide a pinnable panel on `window`, taking it from wherever it is placed
    pub fn auto_hide_in(
        &mut self,
        window: WindowId,
        persistent_id: &str,
        edge: AutoHideEdge,
    ) -> Result<()> {
        if !self.registry.get(persistent_id)?.pinnable {
            return Err(DockingError::structural(format!(
                "panel `{}` is not pinnable",
                persistent_id
            )));
        }
        self.window(window)?;

        if let Some(source) = self.window_of(persistent_id) {
            let before = self.visible_in(source);
            match self.take_panel(source, persistent_id) {
                Some(Placement::Docked) => {
                    self.emit_visibility(source, &before, Some(persistent_id))
                }
                Some(Placement::AutoHidden) if source != window => {
                    self.emit(DockingEvent::AutoHideDisabled {
                        panel: persistent_id.to_string(),
                        window: source,
                    })
                }
                _ => {}
            }
        }

        self.window_mut(window)?
            .meta_mut()
            .auto_hide
            .insert(edge, persistent_id);
        self.emit(DockingEvent::AutoHideEnabled {
            panel: persistent_id.to_string(),
            window,
            edge,
        });
        self.layout_changed();
        Ok(())
    }

    /// Dock an auto-hidden panel back onto its window's matching root edge
    pub fn restore_auto_hidden(&mut self, persistent_id: &str) -> Result<()> {
        let leaf = self.registry.get(persistent_id)?.leaf();
        let (window_id, edge) = self
            .windows
            .values()
            .find_map(|w| w.meta().auto_hide.find(persistent_id).map(|edge| (w.id, edge)))
            .ok_or_else(|| DockingError::not_found(persistent_id))?;
        let proportion = self.config.root_edge_proportion;
        let before = self.visible_in(window_id);

        let window = self.window_mut(window_id)?;
        window.meta_mut().auto_hide.remove(persistent_id);
        if let Err(e) = window.tree.dock_to_root(leaf, edge.region(), proportion) {
            window.meta_mut().auto_hide.insert(edge, persistent_id);
            return Err(e);
        }
        self.emit(DockingEvent::AutoHideDisabled {
            panel: persistent_id.to_string(),
            window: window_id,
        });
        self.emit_visibility(window_id, &before, Some(persistent_id));
        self.layout_changed();
        Ok(())
    }

    /// Record a docked panel as its window's maximized panel
    pub fn maximize(&mut self, persistent_id: &str) -> Result<()> {
        let window = self
            .docked_window_of(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))?;
        self.window_mut(window)?.meta_mut().maximized_panel = Some(persistent_id.to_string());
        self.layout_changed();
        Ok(())
    }

    /// Clear a window's maximized panel, returning it
    pub fn restore_maximized(&mut self, window: WindowId) -> Result<Option<String>> {
        let previous = self.window_mut(window)?.meta_mut().maximized_panel.take();
        if previous.is_some() {
            self.layout_changed();
        }
        Ok(previous)
    }

    pub fn select_tab(&mut self, persistent_id: &str) -> Result<()> {
        let window = self
            .docked_window_of(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))?;
        let before = self.visible_in(window);
        self.window_mut(window)?.tree.select_tab(persistent_id)?;
        self.emit_visibility(window, &before, None);
        self.layout_changed();
        Ok(())
    }

    pub fn set_divider_proportion(
        &mut self,
        window: WindowId,
        split: NodeId,
        proportion: f64,
    ) -> Result<()> {
        self.window_mut(window)?
            .tree
            .set_divider_proportion(split, proportion)?;
        self.layout_changed();
        Ok(())
    }

    /// Promote a panel into a new top-level window at `bounds`
    pub fn float_panel(&mut self, persistent_id: &str, bounds: Rect) -> Result<WindowId> {
        let leaf = self.dockable_leaf(persistent_id)?;
        let window = self.add_window(WindowMeta::new(bounds.origin(), bounds.size()));
        if let Err(e) = self
            .window_mut(window)
            .and_then(|w| w.tree.dock_to_root(leaf, Region::Center, 1.0))
        {
            self.windows.remove(&window);
            return Err(e);
        }
        self.record_docked(persistent_id, window, &[]);
        Ok(window)
    }

    // ========================================================================
    // Layout documents
    // ========================================================================

    /// Capture every window as a layout document
    ///
    /// Windows that are not in normal state report the geometry they had
    /// when last captured in normal state.
    pub fn application_layout(&mut self) -> AppLayout {
        let mut windows = Vec::with_capacity(self.windows.len());
        for window in self.windows.values() {
            let mut layout = WindowLayout::from_tree(&window.tree, window.is_main);
            let (position, size) = self.persistence.geometry_for(window.id, window.meta());
            layout.position = position;
            layout.size = size;
            windows.push(layout);
        }

        let mut layout = AppLayout::new(windows);
        layout.undocked = self
            .registry
            .iter()
            .filter(|spec| self.window_of(&spec.persistent_id).is_none())
            .map(|spec| {
                (
                    spec.persistent_id.clone(),
                    UndockedPanel {
                        class_name: spec.class_name.clone(),
                        properties: spec.properties.clone(),
                    },
                )
            })
            .collect();
        layout
    }

    /// Capture a single window
    pub fn window_layout(&self, window: WindowId) -> Result<WindowLayout> {
        let window = self.window(window)?;
        Ok(WindowLayout::from_tree(&window.tree, window.is_main))
    }

    fn ensure_registered<'a>(&self, ids: impl IntoIterator<Item = &'a String>) -> Result<()> {
        for id in ids {
            self.registry.get(id)?;
        }
        Ok(())
    }

    /// Replace one window's tree with a saved window layout
    ///
    /// Panels the layout places that currently live in other windows are
    /// undocked from there first.
    pub fn restore_window_layout(&mut self, window: WindowId, layout: &WindowLayout) -> Result<()> {
        if self.drag.is_some() {
            return Err(DockingError::DragInProgress);
        }
        self.window(window)?;
        let ids = layout.panel_ids();
        self.ensure_registered(&ids)?;
        let tree = layout.to_tree(self.config.always_show_tabs)?;

        for id in &ids {
            if self.window_of(id).is_some_and(|w| w != window) {
                self.try_undock(id);
            }
        }

        let before = self.placements();
        self.window_mut(window)?.tree = tree;
        self.emit_placement_changes(&before);
        self.layout_changed();
        tracing::info!("Restored layout of window {} ({} panel(s))", window, ids.len());
        Ok(())
    }

    /// Replace every window with the windows of a saved layout
    ///
    /// The document's main window is applied to the current main window;
    /// other current windows are closed and the remaining entries open new
    /// windows. Nothing changes if the document is invalid or refers to an
    /// unregistered panel.
    pub fn restore_application_layout(&mut self, layout: &AppLayout) -> Result<RestoreReport> {
        if self.drag.is_some() {
            return Err(DockingError::DragInProgress);
        }
        layout.validate().map_err(DockingError::structural)?;
        self.ensure_registered(&layout.panel_ids())?;

        let always_show_tabs = self.config.always_show_tabs;
        let mut main_tree = None;
        let mut other_trees = Vec::new();
        for entry in &layout.windows {
            let tree = entry.to_tree(always_show_tabs)?;
            if entry.main {
                main_tree = Some(tree);
            } else {
                other_trees.push(tree);
            }
        }

        let before = self.placements();
        let mut report = RestoreReport::default();
        for id in self.window_ids() {
            if Some(id) != self.main_window {
                self.windows.remove(&id);
                self.persistence.forget(id);
                report.closed.push(id);
            }
        }

        let main_id = match self.main_window {
            Some(id) => id,
            None => {
                let id = self.add_window(WindowMeta::default());
                report.opened.push(id);
                id
            }
        };
        if let (Some(tree), Some(main)) = (main_tree, self.windows.get_mut(&main_id)) {
            main.tree = tree;
        }

        for tree in other_trees {
            let id = self.add_window(WindowMeta::default());
            if let Some(window) = self.windows.get_mut(&id) {
                window.tree = tree;
            }
            report.opened.push(id);
        }

        for (id, panel) in &layout.undocked {
            if let Ok(spec) = self.registry.get_mut(id) {
                spec.properties = panel.properties.clone();
            }
        }
        self.emit_placement_changes(&before);

        tracing::info!(
            "Restored application layout: {} window(s), {} opened, {} closed",
            layout.windows.len(),
            report.opened.len(),
            report.closed.len()
        );
        Ok(report)
    }

    /// Load and apply the layout at `path`, falling back to `default`
    ///
    /// Load and apply failures are logged; only a failure to apply the
    /// default itself is returned.
    pub fn restore_from(&mut self, path: &Path, default: &AppLayout) -> Result<RestoreReport> {
        let loaded = LayoutStore::new(path)
            .load()
            .and_then(|layout| self.restore_application_layout(&layout));
        match loaded {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::warn!(
                    "Could not restore layout from {}: {}; using default layout",
                    path.display(),
                    e
                );
                self.restore_application_layout(default)
            }
        }
    }

    /// Write the application layout now
    pub fn save_layout(&mut self, path: &Path) -> Result<()> {
        let layout = self.application_layout();
        LayoutStore::new(path).save(&layout)?;
        self.layouts
            .push_event(LayoutEvent::Persisted(path.to_path_buf()));
        Ok(())
    }

    /// Store the current layout under `name`
    pub fn save_named(&mut self, name: &str) {
        let layout = self.application_layout();
        self.layouts.add(name, layout);
    }

    /// Apply a named layout
    pub fn restore_named(&mut self, name: &str) -> Result<RestoreReport> {
        let layout = self
            .layouts
            .get(name)
            .cloned()
            .ok_or_else(|| DockingError::structural(format!("no layout named `{}`", name)))?;
        let report = self.restore_application_layout(&layout)?;
        self.layouts.push_event(LayoutEvent::Restored(name.to_string()));
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(ids: &[&str]) -> (DockingModel, WindowId) {
        let mut model = DockingModel::default();
        for id in ids {
            model
                .register_panel(PanelSpec::new(*id, "test::Panel").pinnable(true))
                .unwrap();
        }
        let main = model.add_window(WindowMeta::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0)));
        (model, main)
    }

    #[test]
    fn test_first_window_is_main() {
        let (mut model, main) = model_with(&[]);
        let other = model.add_window(WindowMeta::default());
        assert_eq!(model.main_window(), Some(main));
        assert!(model.window(main).unwrap().is_main);
        assert!(!model.window(other).unwrap().is_main);
        assert!(model.remove_window(main).is_err());
        assert!(model.remove_window(other).is_ok());
    }

    #[test]
    fn test_dock_requires_registration() {
        let (mut model, main) = model_with(&[]);
        let err = model
            .dock_to_root(main, "ghost", Region::Center, 0.5)
            .unwrap_err();
        assert!(matches!(err, DockingError::NotFound { .. }));
    }

    #[test]
    fn test_dock_twice_is_rejected() {
        let (mut model, main) = model_with(&["a", "b"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        model.dock("b", "a", Region::East, 0.5).unwrap();
        assert!(model.dock("b", "a", Region::West, 0.5).is_err());
    }

    #[test]
    fn test_undock_unplaced_panel_is_error() {
        let (mut model, _) = model_with(&["a"]);
        assert!(matches!(
            model.undock("a"),
            Err(DockingError::NotFound { .. })
        ));
        assert!(!model.try_undock("a"));
    }

    #[test]
    fn test_deregister_undocks_first() {
        let (mut model, main) = model_with(&["a", "b"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        model.dock("b", "a", Region::South, 0.5).unwrap();
        model.deregister_panel("b").unwrap();
        assert!(!model.is_docked("b"));
        assert_eq!(model.window(main).unwrap().tree.panel_ids(), vec!["a"]);
        assert!(model.deregister_panel("b").is_err());
    }

    #[test]
    fn test_auto_hide_and_restore() {
        let (mut model, main) = model_with(&["a", "b"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        model.dock("b", "a", Region::East, 0.5).unwrap();

        model.auto_hide("b", AutoHideEdge::East).unwrap();
        assert!(model.is_auto_hidden("b"));
        assert!(!model.is_docked("b"));
        assert_eq!(model.window_of("b"), Some(main));

        model.restore_auto_hidden("b").unwrap();
        assert!(!model.is_auto_hidden("b"));
        let tree = &model.window(main).unwrap().tree;
        let split = tree.node(tree.child().unwrap()).unwrap().as_split().unwrap();
        assert_eq!(tree.node(split.second).unwrap().persistent_id(), Some("b"));
        assert_eq!(split.proportion, 0.75);
    }

    #[test]
    fn test_auto_hide_requires_pinnable() {
        let (mut model, main) = model_with(&[]);
        model
            .register_panel(PanelSpec::new("fixed", "test::Panel"))
            .unwrap();
        model.dock_to_root(main, "fixed", Region::Center, 0.5).unwrap();
        assert!(model.auto_hide("fixed", AutoHideEdge::West).is_err());
        assert!(model.is_docked("fixed"));
    }

    #[test]
    fn test_maximize_and_restore() {
        let (mut model, main) = model_with(&["a"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        model.maximize("a").unwrap();
        assert_eq!(
            model.window(main).unwrap().meta().maximized_panel.as_deref(),
            Some("a")
        );
        assert_eq!(model.restore_maximized(main).unwrap(), Some("a".to_string()));
        assert_eq!(model.restore_maximized(main).unwrap(), None);
    }

    #[test]
    fn test_undock_keeps_properties_in_registry() {
        let (mut model, main) = model_with(&["a"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        if let Some(window) = model.windows.get_mut(&main) {
            let mut leaf = window.tree.find("a").unwrap().as_leaf().unwrap().clone();
            leaf.properties.insert("scroll".to_string(), "42".to_string());
            window.tree.undock("a");
            window.tree.dock_to_root(leaf, Region::Center, 0.5).unwrap();
        }
        model.undock("a").unwrap();
        let spec = model.registry.get("a").unwrap();
        assert_eq!(spec.properties.get("scroll").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_application_layout_reuses_normal_geometry() {
        let (mut model, main) = model_with(&["a"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        let normal = model.application_layout();

        model
            .set_window_bounds(main, Point::new(0.0, 0.0), Size::new(1920.0, 1080.0))
            .unwrap();
        model.set_window_state(main, WindowState::Maximized).unwrap();
        let maximized = model.application_layout();

        assert_eq!(maximized.windows[0].size, normal.windows[0].size);
        assert_eq!(maximized.windows[0].state, WindowState::Maximized);
    }

    #[test]
    fn test_application_layout_lists_undocked_panels() {
        let (mut model, main) = model_with(&["a", "b"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        let layout = model.application_layout();
        assert_eq!(layout.undocked.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_restore_rejects_unregistered_panels() {
        let (mut model, main) = model_with(&["a"]);
        model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
        let mut layout = model.application_layout();
        if let Some(crate::persist::NodeLayout::Simple(leaf)) = &mut layout.windows[0].root {
            leaf.persistent_id = "ghost".to_string();
        }
        layout.undocked.clear();
        assert!(model.restore_application_layout(&layout).is_err());
        assert!(model.is_docked("a"));
    }
}
