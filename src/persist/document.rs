//! Saved layout document
//!
//! ```text
//! app-layout    := version, window-layout+ (exactly one main), undocked
//! window-layout := position, size, state, maximized?, auto_hide, root?
//! node          := simple | split | tabbed
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    AutoHide, Leaf, LayoutTree, NodeId, NodeKind, Orientation, Point, Size, Split, Tab,
    WindowMeta, WindowState,
};

/// Current document version written by this crate
pub const LAYOUT_VERSION: u32 = 1;

/// Every top-level window plus properties of registered-but-undocked panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppLayout {
    #[serde(default)]
    pub version: u32,
    pub windows: Vec<WindowLayout>,
    /// Panels known to the application but not placed in any window
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub undocked: BTreeMap<String, UndockedPanel>,
}

impl Default for AppLayout {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndockedPanel {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

/// One window: geometry, state, auto-hide lists and the layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowLayout {
    #[serde(default)]
    pub main: bool,
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub state: WindowState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximized: Option<String>,
    #[serde(default, skip_serializing_if = "AutoHide::is_empty")]
    pub auto_hide: AutoHide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeLayout {
    Simple(LeafLayout),
    Split {
        orientation: Orientation,
        proportion: f64,
        left: Box<NodeLayout>,
        right: Box<NodeLayout>,
    },
    Tabbed {
        selected: String,
        tabs: Vec<LeafLayout>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafLayout {
    pub persistent_id: String,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl From<&Leaf> for LeafLayout {
    fn from(leaf: &Leaf) -> Self {
        Self {
            persistent_id: leaf.persistent_id.clone(),
            class_name: leaf.class_name.clone(),
            properties: leaf.properties.clone(),
        }
    }
}

impl From<&LeafLayout> for Leaf {
    fn from(layout: &LeafLayout) -> Self {
        Self {
            persistent_id: layout.persistent_id.clone(),
            class_name: layout.class_name.clone(),
            properties: layout.properties.clone(),
        }
    }
}

// ============================================================================
// AppLayout
// ============================================================================

impl AppLayout {
    pub fn new(windows: Vec<WindowLayout>) -> Self {
        Self {
            version: LAYOUT_VERSION,
            windows,
            undocked: BTreeMap::new(),
        }
    }

    pub fn main_window(&self) -> Option<&WindowLayout> {
        self.windows.iter().find(|w| w.main)
    }

    /// Docked and auto-hidden panel IDs across all windows
    pub fn panel_ids(&self) -> Vec<String> {
        self.windows.iter().flat_map(WindowLayout::panel_ids).collect()
    }

    /// Structural checks applied to every loaded document
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.version > LAYOUT_VERSION {
            return Err(format!(
                "unsupported layout version {} (newest known is {})",
                self.version, LAYOUT_VERSION
            ));
        }

        let mains = self.windows.iter().filter(|w| w.main).count();
        if mains != 1 {
            return Err(format!("expected exactly one main window, found {}", mains));
        }

        let mut seen = HashSet::new();
        for window in &self.windows {
            window.validate(&mut seen)?;
        }

        if let Some(id) = self.undocked.keys().find(|id| seen.contains(*id)) {
            return Err(format!("panel `{}` is listed as undocked but is docked", id));
        }
        Ok(())
    }
}

// ============================================================================
// WindowLayout
// ============================================================================

impl WindowLayout {
    /// Capture a tree and its window metadata
    pub fn from_tree(tree: &LayoutTree, main: bool) -> Self {
        let meta = &tree.window;
        Self {
            main,
            position: meta.position,
            size: meta.size,
            state: meta.state,
            maximized: meta.maximized_panel.clone(),
            auto_hide: meta.auto_hide.clone(),
            root: tree.child().and_then(|id| NodeLayout::from_node(tree, id)),
        }
    }

    /// Rebuild a layout tree from this entry
    pub fn to_tree(&self, always_show_tabs: bool) -> Result<LayoutTree> {
        let meta = WindowMeta {
            position: self.position,
            size: self.size,
            state: self.state,
            maximized_panel: self.maximized.clone(),
            auto_hide: self.auto_hide.clone(),
        };
        let mut tree = LayoutTree::new(meta).with_always_show_tabs(always_show_tabs);
        if let Some(root) = &self.root {
            let child = root.build(&mut tree);
            tree.set_root_child(Some(child));
        }
        tree.validate()?;
        Ok(tree)
    }

    pub fn panel_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        if let Some(root) = &self.root {
            root.collect_ids(&mut ids);
        }
        ids.extend(self.auto_hide.ids().cloned());
        ids
    }

    fn validate(&self, seen: &mut HashSet<String>) -> std::result::Result<(), String> {
        if let Some(root) = &self.root {
            root.validate()?;
        }
        let docked = self.root.as_ref().map(|r| {
            let mut ids = Vec::new();
            r.collect_ids(&mut ids);
            ids
        });

        for id in self.panel_ids() {
            if id.is_empty() {
                return Err("panel with empty persistent ID".to_string());
            }
            if !seen.insert(id.clone()) {
                return Err(format!("panel `{}` appears more than once", id));
            }
        }

        if let Some(maximized) = &self.maximized {
            if !docked.iter().flatten().any(|id| id == maximized) {
                return Err(format!("maximized panel `{}` is not docked in its window", maximized));
            }
        }
        Ok(())
    }
}

// ============================================================================
// NodeLayout
// ============================================================================

impl NodeLayout {
    fn from_node(tree: &LayoutTree, id: NodeId) -> Option<Self> {
        let node = tree.node(id)?;
        let layout = match &node.kind {
            NodeKind::Leaf(leaf) => NodeLayout::Simple(leaf.into()),
            NodeKind::Split(split) => NodeLayout::Split {
                orientation: split.orientation,
                proportion: split.proportion,
                left: Box::new(Self::from_node(tree, split.first)?),
                right: Box::new(Self::from_node(tree, split.second)?),
            },
            NodeKind::Tab(tab) => NodeLayout::Tabbed {
                selected: tab.selected.clone(),
                tabs: tab
                    .tabs
                    .iter()
                    .filter_map(|&member| tree.node(member)?.as_leaf().map(LeafLayout::from))
                    .collect(),
            },
        };
        Some(layout)
    }

    fn build(&self, tree: &mut LayoutTree) -> NodeId {
        match self {
            NodeLayout::Simple(leaf) => tree.alloc(NodeKind::Leaf(leaf.into())),
            NodeLayout::Split {
                orientation,
                proportion,
                left,
                right,
            } => {
                let first = left.build(tree);
                let second = right.build(tree);
                let split = tree.alloc(NodeKind::Split(Split {
                    orientation: *orientation,
                    first,
                    second,
                    proportion: *proportion,
                }));
                tree.set_parent(first, Some(split));
                tree.set_parent(second, Some(split));
                split
            }
            NodeLayout::Tabbed { selected, tabs } => {
                let members: Vec<NodeId> = tabs
                    .iter()
                    .map(|leaf| tree.alloc(NodeKind::Leaf(leaf.into())))
                    .collect();
                let tab = tree.alloc(NodeKind::Tab(Tab {
                    tabs: members.clone(),
                    selected: selected.clone(),
                }));
                for member in members {
                    tree.set_parent(member, Some(tab));
                }
                tab
            }
        }
    }

    fn collect_ids(&self, out: &mut Vec<String>) {
        match self {
            NodeLayout::Simple(leaf) => out.push(leaf.persistent_id.clone()),
            NodeLayout::Split { left, right, .. } => {
                left.collect_ids(out);
                right.collect_ids(out);
            }
            NodeLayout::Tabbed { tabs, .. } => {
                out.extend(tabs.iter().map(|t| t.persistent_id.clone()));
            }
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            NodeLayout::Simple(_) => Ok(()),
            NodeLayout::Split {
                proportion,
                left,
                right,
                ..
            } => {
                if !(0.0..=1.0).contains(proportion) {
                    return Err(format!("split proportion {} is outside [0, 1]", proportion));
                }
                left.validate()?;
                right.validate()
            }
            NodeLayout::Tabbed { selected, tabs } => {
                if tabs.is_empty() {
                    return Err("tab group has no tabs".to_string());
                }
                if !tabs.iter().any(|t| &t.persistent_id == selected) {
                    return Err(format!("selected tab `{}` is not in its group", selected));
                }
                Ok(())
            }
        }
    }
}
