//! Layout documents built without a live model
//!
//! Applications describe their default layout with these builders and hand
//! it to `DockingModel::restore_from`, which applies it whenever no saved
//! layout can be loaded.
//!
//! ```ignore
//! let default = WindowLayoutBuilder::new(Leaf::new("explorer", "app::Explorer"))
//!     .dock(Leaf::new("editor", "app::Editor"), "explorer", Region::East, 0.75)?
//!     .dock_to_root(Leaf::new("console", "app::Console"), Region::South, 0.25)?
//!     .property("console", "scrollback", "5000")?
//!     .build_application_layout();
//! ```

use crate::error::{DockingError, Result};
use crate::model::{LayoutTree, Leaf, NodeKind, Point, Region, Size, WindowState};

use super::document::{AppLayout, WindowLayout};

/// Default proportion for panels docked to the root
const ROOT_PROPORTION: f64 = 0.25;

/// Builds one window's layout, starting from a single panel
#[derive(Debug, Clone)]
pub struct WindowLayoutBuilder {
    tree: LayoutTree,
    main: bool,
}

impl WindowLayoutBuilder {
    pub fn new(first: impl Into<Leaf>) -> Self {
        let mut tree = LayoutTree::default();
        let child = tree.alloc(NodeKind::Leaf(first.into()));
        tree.set_root_child(Some(child));
        Self { tree, main: true }
    }

    /// Dock a panel next to one already in the layout
    pub fn dock(
        mut self,
        panel: impl Into<Leaf>,
        target: &str,
        region: Region,
        proportion: f64,
    ) -> Result<Self> {
        let leaf = self.unused(panel.into())?;
        self.tree.dock(leaf, target, region, proportion)?;
        Ok(self)
    }

    /// Dock a panel next to one already in the layout, as a new tab
    pub fn tab(self, panel: impl Into<Leaf>, target: &str) -> Result<Self> {
        self.dock(panel, target, Region::Center, 0.5)
    }

    pub fn dock_to_root(mut self, panel: impl Into<Leaf>, region: Region, proportion: f64) -> Result<Self> {
        let leaf = self.unused(panel.into())?;
        self.tree.dock_to_root(leaf, region, proportion)?;
        Ok(self)
    }

    /// Dock a panel to a root edge at the usual 25% share
    pub fn dock_to_edge(self, panel: impl Into<Leaf>, region: Region) -> Result<Self> {
        self.dock_to_root(panel, region, ROOT_PROPORTION)
    }

    /// Select a panel within its tab group
    pub fn display(mut self, persistent_id: &str) -> Result<Self> {
        self.tree.select_tab(persistent_id)?;
        Ok(self)
    }

    pub fn property(
        mut self,
        persistent_id: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let leaf = self
            .tree
            .leaf_mut(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))?;
        leaf.properties.insert(key.into(), value.into());
        Ok(self)
    }

    pub fn bounds(mut self, position: Point, size: Size) -> Self {
        self.tree.window.position = position;
        self.tree.window.size = size;
        self
    }

    pub fn state(mut self, state: WindowState) -> Self {
        self.tree.window.state = state;
        self
    }

    /// Build a secondary window rather than the main one
    pub fn secondary(mut self) -> Self {
        self.main = false;
        self
    }

    pub fn build(self) -> WindowLayout {
        WindowLayout::from_tree(&self.tree, self.main)
    }

    /// An application layout holding just this window
    pub fn build_application_layout(self) -> AppLayout {
        AppLayout::new(vec![self.as_main().build()])
    }

    fn as_main(mut self) -> Self {
        self.main = true;
        self
    }

    fn unused(&self, leaf: Leaf) -> Result<Leaf> {
        if self.tree.contains(&leaf.persistent_id) {
            return Err(DockingError::structural(format!(
                "panel `{}` is already in the layout",
                leaf.persistent_id
            )));
        }
        Ok(leaf)
    }
}
