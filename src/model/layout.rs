//! Layout tree - how panels are split, tabbed, or nested inside one window
//!
//! Nodes live in an arena owned by the tree and refer to each other through
//! `NodeId` handles. Ownership runs root -> children only; each node records
//! its parent handle for upward traversal (`None` means the node hangs
//! directly off the root).
//!
//! Every structural change goes through [`LayoutTree::replace_child`], which
//! splices a node out of its parent and re-parents the replacement.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

use crate::error::{DockingError, Result};

use super::region::{Orientation, Region};
use super::window::WindowMeta;

// ============================================================================
// Nodes
// ============================================================================

/// Arena handle for a node within one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// A node wrapping exactly one panel
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub persistent_id: String,
    /// Content-class tag used when the panel is rebuilt from a saved layout
    pub class_name: String,
    pub properties: BTreeMap<String, String>,
}

impl Leaf {
    pub fn new(persistent_id: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            persistent_id: persistent_id.into(),
            class_name: class_name.into(),
            properties: BTreeMap::new(),
        }
    }
}

/// Two children sharing space along one axis
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub orientation: Orientation,
    pub first: NodeId,
    pub second: NodeId,
    /// Fraction of space given to `first`
    pub proportion: f64,
}

/// Leaves grouped behind a single-selection tab strip
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    /// Leaf node handles, in tab order
    pub tabs: Vec<NodeId>,
    /// Persistent ID of the selected member
    pub selected: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf(Leaf),
    Split(Split),
    Tab(Tab),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Leaf(_) => "leaf",
            NodeKind::Split(_) => "split",
            NodeKind::Tab(_) => "tab",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl LayoutNode {
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_split(&self) -> Option<&Split> {
        match &self.kind {
            NodeKind::Split(split) => Some(split),
            _ => None,
        }
    }

    pub fn as_tab(&self) -> Option<&Tab> {
        match &self.kind {
            NodeKind::Tab(tab) => Some(tab),
            _ => None,
        }
    }

    /// Persistent ID when this node is a leaf
    pub fn persistent_id(&self) -> Option<&str> {
        self.as_leaf().map(|leaf| leaf.persistent_id.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Leaf,
    Split,
    Tab,
}

// ============================================================================
// Tree
// ============================================================================

/// Root of one window's layout: a single optional child plus window metadata
#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: HashMap<NodeId, LayoutNode>,
    child: Option<NodeId>,
    pub window: WindowMeta,
    /// Keep single panels wrapped in a one-element tab group
    always_show_tabs: bool,
    next_node_id: u64,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new(WindowMeta::default())
    }
}

impl LayoutTree {
    pub fn new(window: WindowMeta) -> Self {
        Self {
            nodes: HashMap::new(),
            child: None,
            window,
            always_show_tabs: false,
            next_node_id: 1,
        }
    }

    pub fn with_always_show_tabs(mut self, always_show_tabs: bool) -> Self {
        self.always_show_tabs = always_show_tabs;
        self
    }

    pub fn set_always_show_tabs(&mut self, always_show_tabs: bool) {
        self.always_show_tabs = always_show_tabs;
    }

    pub fn always_show_tabs(&self) -> bool {
        self.always_show_tabs
    }

    /// The root's only child, if anything is docked
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.child.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first search for the leaf holding a panel
    pub fn find(&self, persistent_id: &str) -> Option<&LayoutNode> {
        self.find_from(self.child?, persistent_id)
    }

    fn find_from(&self, id: NodeId, persistent_id: &str) -> Option<&LayoutNode> {
        let node = self.nodes.get(&id)?;
        match &node.kind {
            NodeKind::Leaf(leaf) => (leaf.persistent_id == persistent_id).then_some(node),
            NodeKind::Split(split) => self
                .find_from(split.first, persistent_id)
                .or_else(|| self.find_from(split.second, persistent_id)),
            NodeKind::Tab(tab) => tab
                .tabs
                .iter()
                .find_map(|&member| self.find_from(member, persistent_id)),
        }
    }

    pub fn contains(&self, persistent_id: &str) -> bool {
        self.find(persistent_id).is_some()
    }

    /// All docked panel IDs in depth-first order (first before second, tabs in order)
    pub fn panel_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        if let Some(child) = self.child {
            self.collect_ids(child, &mut ids);
        }
        ids
    }

    fn collect_ids(&self, id: NodeId, out: &mut Vec<String>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        match &node.kind {
            NodeKind::Leaf(leaf) => out.push(leaf.persistent_id.clone()),
            NodeKind::Split(split) => {
                self.collect_ids(split.first, out);
                self.collect_ids(split.second, out);
            }
            NodeKind::Tab(tab) => {
                for &member in &tab.tabs {
                    self.collect_ids(member, out);
                }
            }
        }
    }

    /// Docked panels not covered by another member of their tab group
    pub fn visible_panels(&self) -> Vec<String> {
        let mut ids = Vec::new();
        if let Some(child) = self.child {
            self.collect_visible(child, &mut ids);
        }
        ids
    }

    fn collect_visible(&self, id: NodeId, out: &mut Vec<String>) {
        match self.nodes.get(&id).map(|n| &n.kind) {
            Some(NodeKind::Leaf(leaf)) => out.push(leaf.persistent_id.clone()),
            Some(NodeKind::Split(split)) => {
                self.collect_visible(split.first, out);
                self.collect_visible(split.second, out);
            }
            Some(NodeKind::Tab(tab)) => out.push(tab.selected.clone()),
            None => {}
        }
    }

    pub(crate) fn leaf_mut(&mut self, persistent_id: &str) -> Option<&mut Leaf> {
        let id = self.find(persistent_id)?.id;
        match self.nodes.get_mut(&id).map(|n| &mut n.kind) {
            Some(NodeKind::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    /// Handles from a node's parent up to the root's child
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.nodes.get(&parent).and_then(|n| n.parent);
        }
        chain
    }

    fn shape(&self, id: NodeId) -> Option<Shape> {
        self.nodes.get(&id).map(|node| match node.kind {
            NodeKind::Leaf(_) => Shape::Leaf,
            NodeKind::Split(_) => Shape::Split,
            NodeKind::Tab(_) => Shape::Tab,
        })
    }

    // ------------------------------------------------------------------------
    // Arena primitives
    // ------------------------------------------------------------------------

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(
            id,
            LayoutNode {
                id,
                parent: None,
                kind,
            },
        );
        id
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }

    pub(crate) fn set_root_child(&mut self, child: Option<NodeId>) {
        if let Some(id) = child {
            self.set_parent(id, None);
        }
        self.child = child;
    }

    /// Create the node that holds a newly docked panel
    fn insert_panel(&mut self, leaf: Leaf) -> NodeId {
        if self.always_show_tabs {
            let selected = leaf.persistent_id.clone();
            let leaf_id = self.alloc(NodeKind::Leaf(leaf));
            let tab_id = self.alloc(NodeKind::Tab(Tab {
                tabs: vec![leaf_id],
                selected,
            }));
            self.set_parent(leaf_id, Some(tab_id));
            tab_id
        } else {
            self.alloc(NodeKind::Leaf(leaf))
        }
    }

    /// Swap `old` for `new` in old's parent and re-parent `new`
    ///
    /// `old` keeps its own parent handle; callers either re-attach it under
    /// `new` or drop it from the arena.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        let parent = self
            .nodes
            .get(&old)
            .ok_or_else(|| DockingError::structural(format!("unknown node {:?}", old)))?
            .parent;
        let new_shape = self
            .shape(new)
            .ok_or_else(|| DockingError::structural(format!("unknown node {:?}", new)))?;

        match parent {
            None => {
                if self.child != Some(old) {
                    return Err(DockingError::structural(format!(
                        "node {:?} is not attached to the root",
                        old
                    )));
                }
                self.child = Some(new);
            }
            Some(parent_id) => {
                let parent_node = self.nodes.get_mut(&parent_id).ok_or_else(|| {
                    DockingError::structural(format!("dangling parent {:?}", parent_id))
                })?;
                match &mut parent_node.kind {
                    NodeKind::Split(split) => {
                        if split.first == old {
                            split.first = new;
                        } else if split.second == old {
                            split.second = new;
                        } else {
                            return Err(DockingError::structural(format!(
                                "node {:?} is not a child of split {:?}",
                                old, parent_id
                            )));
                        }
                    }
                    NodeKind::Tab(tab) => {
                        if new_shape != Shape::Leaf {
                            return Err(DockingError::structural(
                                "only leaves can be placed inside a tab group",
                            ));
                        }
                        let Some(slot) = tab.tabs.iter_mut().find(|member| **member == old) else {
                            return Err(DockingError::structural(format!(
                                "node {:?} is not a member of tab {:?}",
                                old, parent_id
                            )));
                        };
                        *slot = new;
                    }
                    NodeKind::Leaf(_) => {
                        return Err(DockingError::structural("a leaf has no children"));
                    }
                }
            }
        }

        self.set_parent(new, parent);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Dock
    // ------------------------------------------------------------------------

    /// Dock a panel relative to an already docked panel
    ///
    /// `proportion` is the share of space for the newly inserted panel.
    pub fn dock(&mut self, leaf: Leaf, target: &str, region: Region, proportion: f64) -> Result<()> {
        let receiver = self
            .find(target)
            .map(|node| node.id)
            .ok_or_else(|| DockingError::not_found(target))?;
        self.dock_at(receiver, leaf, region, proportion)
    }

    /// Dock a panel onto the root: an empty root takes the panel as its only
    /// child (region ignored), otherwise the whole current layout is wrapped
    pub fn dock_to_root(&mut self, leaf: Leaf, region: Region, proportion: f64) -> Result<()> {
        self.ensure_not_docked(&leaf)?;
        match self.child {
            None => {
                tracing::debug!("Docking {} into empty root", leaf.persistent_id);
                let id = self.insert_panel(leaf);
                self.set_root_child(Some(id));
                Ok(())
            }
            Some(_) if region == Region::Center => Err(DockingError::structural(format!(
                "cannot dock {} to {} of a non-empty root",
                leaf.persistent_id, region
            ))),
            Some(child) => self.wrap(child, leaf, region, proportion),
        }
    }

    /// Dock a panel onto a specific node, dispatching on its kind
    pub fn dock_at(
        &mut self,
        receiver: NodeId,
        leaf: Leaf,
        region: Region,
        proportion: f64,
    ) -> Result<()> {
        // A leaf inside a tab group hands docking to the group
        let receiver = match self.nodes.get(&receiver).and_then(|n| n.parent) {
            Some(parent) if self.shape(receiver) == Some(Shape::Leaf)
                && self.shape(parent) == Some(Shape::Tab) =>
            {
                parent
            }
            _ => receiver,
        };
        let shape = self
            .shape(receiver)
            .ok_or_else(|| DockingError::structural(format!("unknown node {:?}", receiver)))?;

        if shape == Shape::Tab && region == Region::Center && self.tab_has_member(receiver, &leaf.persistent_id) {
            return Ok(());
        }
        self.ensure_not_docked(&leaf)?;

        tracing::debug!(
            "Docking {} at {} of {:?} node {:?}",
            leaf.persistent_id,
            region,
            shape,
            receiver
        );

        match (shape, region) {
            (Shape::Leaf, Region::Center) => self.make_tab(receiver, leaf),
            (Shape::Tab, Region::Center) => {
                self.add_tab(receiver, leaf);
                Ok(())
            }
            (Shape::Split, Region::Center) => Err(DockingError::center_on_split()),
            (_, region) => self.wrap(receiver, leaf, region, proportion),
        }
    }

    fn ensure_not_docked(&self, leaf: &Leaf) -> Result<()> {
        if self.contains(&leaf.persistent_id) {
            return Err(DockingError::structural(format!(
                "panel `{}` is already docked in this layout",
                leaf.persistent_id
            )));
        }
        Ok(())
    }

    fn tab_has_member(&self, tab_id: NodeId, persistent_id: &str) -> bool {
        match self.nodes.get(&tab_id).map(|n| &n.kind) {
            Some(NodeKind::Tab(tab)) => tab.tabs.iter().any(|member| {
                self.nodes.get(member).and_then(|n| n.persistent_id()) == Some(persistent_id)
            }),
            _ => false,
        }
    }

    /// Replace a bare leaf with a tab group holding [existing, new]
    fn make_tab(&mut self, existing: NodeId, leaf: Leaf) -> Result<()> {
        let selected = leaf.persistent_id.clone();
        let inserted = self.alloc(NodeKind::Leaf(leaf));
        let tab = self.alloc(NodeKind::Tab(Tab {
            tabs: vec![existing, inserted],
            selected,
        }));
        self.replace_child(existing, tab)?;
        self.set_parent(existing, Some(tab));
        self.set_parent(inserted, Some(tab));
        Ok(())
    }

    fn add_tab(&mut self, tab_id: NodeId, leaf: Leaf) {
        let selected = leaf.persistent_id.clone();
        let inserted = self.alloc(NodeKind::Leaf(leaf));
        self.set_parent(inserted, Some(tab_id));
        if let Some(NodeKind::Tab(tab)) = self.nodes.get_mut(&tab_id).map(|n| &mut n.kind) {
            tab.tabs.push(inserted);
            tab.selected = selected;
        }
    }

    /// Wrap `receiver` as a unit inside a new split with the panel on `region`'s side
    fn wrap(&mut self, receiver: NodeId, leaf: Leaf, region: Region, proportion: f64) -> Result<()> {
        let orientation = region.orientation().ok_or_else(|| {
            DockingError::structural(format!("{} does not create a split", region))
        })?;
        let proportion = if proportion.is_nan() {
            0.5
        } else {
            proportion.clamp(0.0, 1.0)
        };

        let inserted = self.insert_panel(leaf);
        let (first, second, stored) = if region.inserts_first() {
            (inserted, receiver, proportion)
        } else {
            (receiver, inserted, 1.0 - proportion)
        };
        let split = self.alloc(NodeKind::Split(Split {
            orientation,
            first,
            second,
            proportion: stored,
        }));

        self.replace_child(receiver, split)?;
        self.set_parent(receiver, Some(split));
        self.set_parent(inserted, Some(split));
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Undock
    // ------------------------------------------------------------------------

    /// Remove a panel's leaf, collapsing its parent where needed
    ///
    /// Returns false when the panel is not in this tree.
    pub fn undock(&mut self, persistent_id: &str) -> bool {
        let Some(leaf_id) = self.find(persistent_id).map(|node| node.id) else {
            return false;
        };
        self.detach(leaf_id);

        if self.window.maximized_panel.as_deref() == Some(persistent_id) {
            self.window.maximized_panel = None;
        }
        tracing::debug!("Undocked {}", persistent_id);
        true
    }

    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        let Some(parent_id) = node.parent else {
            if self.child == Some(id) {
                self.child = None;
            }
            return;
        };

        enum Collapse {
            Into(NodeId),
            RemoveParent,
            Reselect(usize),
            Keep,
        }

        let always_show_tabs = self.always_show_tabs;
        let removed_id = node.persistent_id().map(str::to_owned);

        let collapse = match self.nodes.get_mut(&parent_id).map(|n| &mut n.kind) {
            Some(NodeKind::Split(split)) => {
                Collapse::Into(if split.first == id { split.second } else { split.first })
            }
            Some(NodeKind::Tab(tab)) => {
                let index = tab.tabs.iter().position(|&member| member == id).unwrap_or(0);
                tab.tabs.retain(|&member| member != id);
                if tab.tabs.is_empty() {
                    Collapse::RemoveParent
                } else if tab.tabs.len() == 1 && !always_show_tabs {
                    Collapse::Into(tab.tabs[0])
                } else if removed_id.as_deref() == Some(tab.selected.as_str()) {
                    Collapse::Reselect(index.min(tab.tabs.len() - 1))
                } else {
                    Collapse::Keep
                }
            }
            _ => Collapse::Keep,
        };

        match collapse {
            Collapse::Into(remaining) => {
                if let Err(e) = self.replace_child(parent_id, remaining) {
                    tracing::warn!("Failed to collapse node {:?}: {}", parent_id, e);
                    return;
                }
                self.nodes.remove(&parent_id);
            }
            Collapse::RemoveParent => self.detach(parent_id),
            Collapse::Reselect(index) => self.reselect(parent_id, index),
            Collapse::Keep => {}
        }
    }

    fn reselect(&mut self, tab_id: NodeId, index: usize) {
        let member = match self.nodes.get(&tab_id).map(|n| &n.kind) {
            Some(NodeKind::Tab(tab)) => tab.tabs.get(index).copied(),
            _ => None,
        };
        let selected = member
            .and_then(|m| self.nodes.get(&m))
            .and_then(|n| n.persistent_id())
            .map(str::to_owned);
        if let (Some(selected), Some(NodeKind::Tab(tab))) =
            (selected, self.nodes.get_mut(&tab_id).map(|n| &mut n.kind))
        {
            tab.selected = selected;
        }
    }

    // ------------------------------------------------------------------------
    // Other mutations
    // ------------------------------------------------------------------------

    /// Make a panel the selected member of its tab group
    pub fn select_tab(&mut self, persistent_id: &str) -> Result<()> {
        let parent = self
            .find(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))?
            .parent;
        if let Some(NodeKind::Tab(tab)) = parent
            .and_then(|p| self.nodes.get_mut(&p))
            .map(|n| &mut n.kind)
        {
            tab.selected = persistent_id.to_string();
        }
        Ok(())
    }

    /// Move a split's divider; the value is clamped to [0, 1]
    pub fn set_divider_proportion(&mut self, split_id: NodeId, proportion: f64) -> Result<()> {
        match self.nodes.get_mut(&split_id).map(|n| &mut n.kind) {
            Some(NodeKind::Split(split)) if !proportion.is_nan() => {
                split.proportion = proportion.clamp(0.0, 1.0);
                Ok(())
            }
            Some(NodeKind::Split(_)) => Err(DockingError::structural("divider proportion is NaN")),
            Some(kind) => Err(DockingError::structural(format!(
                "node {:?} is a {}, not a split",
                split_id,
                kind.name()
            ))),
            None => Err(DockingError::structural(format!("unknown node {:?}", split_id))),
        }
    }

    /// Drop every node, leaving the root empty
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.child = None;
    }

    // ------------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------------

    /// Check parent handles, split/tab shape rules and ID uniqueness
    pub fn validate(&self) -> Result<()> {
        let mut seen_nodes = HashSet::new();
        let mut seen_ids = HashSet::new();
        if let Some(child) = self.child {
            self.validate_node(child, None, &mut seen_nodes, &mut seen_ids)?;
        }
        if seen_nodes.len() != self.nodes.len() {
            return Err(DockingError::structural(format!(
                "{} node(s) are not reachable from the root",
                self.nodes.len() - seen_nodes.len()
            )));
        }
        Ok(())
    }

    fn validate_node(
        &self,
        id: NodeId,
        expected_parent: Option<NodeId>,
        seen_nodes: &mut HashSet<NodeId>,
        seen_ids: &mut HashSet<String>,
    ) -> Result<()> {
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| DockingError::structural(format!("dangling handle {:?}", id)))?;
        if !seen_nodes.insert(id) {
            return Err(DockingError::structural(format!("node {:?} appears twice", id)));
        }
        if node.parent != expected_parent {
            return Err(DockingError::structural(format!(
                "node {:?} has parent {:?}, expected {:?}",
                id, node.parent, expected_parent
            )));
        }

        match &node.kind {
            NodeKind::Leaf(leaf) => {
                if !seen_ids.insert(leaf.persistent_id.clone()) {
                    return Err(DockingError::structural(format!(
                        "panel `{}` is docked twice",
                        leaf.persistent_id
                    )));
                }
            }
            NodeKind::Split(split) => {
                if !(0.0..=1.0).contains(&split.proportion) {
                    return Err(DockingError::structural(format!(
                        "split {:?} has proportion {} outside [0, 1]",
                        id, split.proportion
                    )));
                }
                if split.first == split.second {
                    return Err(DockingError::structural(format!(
                        "split {:?} needs two distinct children",
                        id
                    )));
                }
                self.validate_node(split.first, Some(id), seen_nodes, seen_ids)?;
                self.validate_node(split.second, Some(id), seen_nodes, seen_ids)?;
            }
            NodeKind::Tab(tab) => {
                if tab.tabs.is_empty() {
                    return Err(DockingError::structural(format!("tab {:?} is empty", id)));
                }
                for &member in &tab.tabs {
                    if self.shape(member) != Some(Shape::Leaf) {
                        return Err(DockingError::structural(format!(
                            "tab {:?} contains a non-leaf member",
                            id
                        )));
                    }
                    self.validate_node(member, Some(id), seen_nodes, seen_ids)?;
                }
                if !self.tab_has_member(id, &tab.selected) {
                    return Err(DockingError::structural(format!(
                        "tab {:?} selects `{}` which is not a member",
                        id, tab.selected
                    )));
                }
            }
        }
        Ok(())
    }

    /// Indented, human-readable outline of the tree
    pub fn outline(&self) -> String {
        let mut out = String::new();
        match self.child {
            Some(child) => self.write_outline(child, 0, &mut out),
            None => out.push_str("(empty)\n"),
        }
        out
    }

    fn write_outline(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        match &node.kind {
            NodeKind::Leaf(leaf) => {
                let _ = writeln!(out, "{}{} ({})", indent, leaf.persistent_id, leaf.class_name);
            }
            NodeKind::Split(split) => {
                let _ = writeln!(
                    out,
                    "{}split {:?} {:.3}",
                    indent, split.orientation, split.proportion
                );
                self.write_outline(split.first, depth + 1, out);
                self.write_outline(split.second, depth + 1, out);
            }
            NodeKind::Tab(tab) => {
                let _ = writeln!(out, "{}tabs [selected: {}]", indent, tab.selected);
                for &member in &tab.tabs {
                    self.write_outline(member, depth + 1, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> Leaf {
        Leaf::new(id, format!("test::{}", id))
    }

    fn single(id: &str) -> LayoutTree {
        let mut tree = LayoutTree::default();
        tree.dock_to_root(leaf(id), Region::Center, 0.5).unwrap();
        tree
    }

    fn root_split(tree: &LayoutTree) -> &Split {
        tree.node(tree.child().unwrap()).unwrap().as_split().unwrap()
    }

    #[test]
    fn test_empty_root_ignores_region() {
        let mut tree = LayoutTree::default();
        tree.dock_to_root(leaf("A"), Region::East, 0.25).unwrap();
        let root = tree.node(tree.child().unwrap()).unwrap();
        assert_eq!(root.persistent_id(), Some("A"));
        assert_eq!(root.parent, None);
    }

    #[test]
    fn test_empty_root_with_always_show_tabs_makes_single_tab() {
        let mut tree = LayoutTree::default().with_always_show_tabs(true);
        tree.dock_to_root(leaf("A"), Region::Center, 0.5).unwrap();
        let tab = tree.node(tree.child().unwrap()).unwrap().as_tab().unwrap();
        assert_eq!(tab.tabs.len(), 1);
        assert_eq!(tab.selected, "A");
        tree.validate().unwrap();
    }

    #[test]
    fn test_proportion_inversion_east() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.25).unwrap();
        let split = root_split(&tree);
        assert_eq!(split.orientation, Orientation::Horizontal);
        assert_eq!(split.proportion, 0.75);
        assert_eq!(tree.node(split.first).unwrap().persistent_id(), Some("A"));
        assert_eq!(tree.node(split.second).unwrap().persistent_id(), Some("B"));
    }

    #[test]
    fn test_proportion_west_kept() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::West, 0.25).unwrap();
        let split = root_split(&tree);
        assert_eq!(split.proportion, 0.25);
        assert_eq!(tree.node(split.first).unwrap().persistent_id(), Some("B"));
    }

    #[test]
    fn test_north_south_are_vertical() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::North, 0.4).unwrap();
        let split = root_split(&tree);
        assert_eq!(split.orientation, Orientation::Vertical);
        assert_eq!(tree.node(split.first).unwrap().persistent_id(), Some("B"));
        assert_eq!(split.proportion, 0.4);

        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::South, 0.4).unwrap();
        let split = root_split(&tree);
        assert_eq!(split.orientation, Orientation::Vertical);
        assert!((split.proportion - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_center_on_leaf_makes_tab_in_order() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::Center, 0.5).unwrap();
        let tab = tree.node(tree.child().unwrap()).unwrap().as_tab().unwrap();
        let members: Vec<_> = tab
            .tabs
            .iter()
            .map(|&m| tree.node(m).unwrap().persistent_id().unwrap())
            .collect();
        assert_eq!(members, vec!["A", "B"]);
        assert_eq!(tab.selected, "B");
        tree.validate().unwrap();
    }

    #[test]
    fn test_center_on_tab_member_appends_to_group() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::Center, 0.5).unwrap();
        tree.dock(leaf("C"), "A", Region::Center, 0.5).unwrap();
        assert_eq!(tree.panel_ids(), vec!["A", "B", "C"]);
        assert!(tree.node(tree.child().unwrap()).unwrap().as_tab().is_some());
        tree.validate().unwrap();
    }

    #[test]
    fn test_center_on_tab_with_existing_member_is_noop() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::Center, 0.5).unwrap();
        let before = tree.node_count();
        tree.dock(leaf("A"), "B", Region::Center, 0.5).unwrap();
        assert_eq!(tree.node_count(), before);
        assert_eq!(tree.panel_ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_edge_on_tab_member_wraps_whole_tab() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::Center, 0.5).unwrap();
        tree.dock(leaf("C"), "B", Region::South, 0.3).unwrap();
        let split = root_split(&tree);
        assert!(tree.node(split.first).unwrap().as_tab().is_some());
        assert_eq!(tree.node(split.second).unwrap().persistent_id(), Some("C"));
        tree.validate().unwrap();
    }

    #[test]
    fn test_center_on_split_is_structural_error() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        let split_id = tree.child().unwrap();
        let before = tree.outline();

        let err = tree
            .dock_at(split_id, leaf("C"), Region::Center, 0.5)
            .unwrap_err();
        assert!(matches!(err, DockingError::Structural { .. }));
        assert_eq!(tree.outline(), before);
        tree.validate().unwrap();
    }

    #[test]
    fn test_edge_on_split_wraps_split() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        let inner = tree.child().unwrap();
        tree.dock_at(inner, leaf("C"), Region::North, 0.2).unwrap();
        let outer = root_split(&tree);
        assert_eq!(outer.second, inner);
        assert_eq!(tree.node(inner).unwrap().parent, Some(tree.child().unwrap()));
        tree.validate().unwrap();
    }

    #[test]
    fn test_dock_unknown_target_is_not_found() {
        let mut tree = single("A");
        let err = tree.dock(leaf("B"), "missing", Region::East, 0.5).unwrap_err();
        assert!(matches!(err, DockingError::NotFound { id } if id == "missing"));
    }

    #[test]
    fn test_dock_already_docked_panel_fails() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        assert!(tree.dock(leaf("B"), "A", Region::West, 0.5).is_err());
        assert_eq!(tree.panel_ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_collapse_round_trip() {
        let original = single("A");
        let mut tree = original.clone();
        tree.dock(leaf("B"), "A", Region::East, 0.3).unwrap();
        assert!(tree.undock("B"));
        assert_eq!(tree.outline(), original.outline());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.node(tree.child().unwrap()).unwrap().parent, None);
        tree.validate().unwrap();
    }

    #[test]
    fn test_undock_collapses_one_level_up() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        tree.dock(leaf("C"), "B", Region::South, 0.5).unwrap();
        assert!(tree.undock("C"));
        let split = root_split(&tree);
        assert_eq!(tree.node(split.second).unwrap().persistent_id(), Some("B"));
        assert_eq!(
            tree.node(split.second).unwrap().parent,
            Some(tree.child().unwrap())
        );
        tree.validate().unwrap();
    }

    #[test]
    fn test_tab_collapses_to_leaf() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::Center, 0.5).unwrap();
        assert!(tree.undock("B"));
        let root = tree.node(tree.child().unwrap()).unwrap();
        assert_eq!(root.persistent_id(), Some("A"));
        tree.validate().unwrap();
    }

    #[test]
    fn test_tab_kept_with_always_show_tabs() {
        let mut tree = single("A").with_always_show_tabs(true);
        tree.dock(leaf("B"), "A", Region::Center, 0.5).unwrap();
        assert!(tree.undock("B"));
        let tab = tree.node(tree.child().unwrap()).unwrap().as_tab().unwrap();
        assert_eq!(tab.tabs.len(), 1);
        assert_eq!(tab.selected, "A");
        tree.validate().unwrap();
    }

    #[test]
    fn test_undock_selected_tab_selects_neighbour() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::Center, 0.5).unwrap();
        tree.dock(leaf("C"), "A", Region::Center, 0.5).unwrap();
        tree.select_tab("B").unwrap();
        assert!(tree.undock("B"));
        let tab = tree.node(tree.child().unwrap()).unwrap().as_tab().unwrap();
        assert_eq!(tab.selected, "C");
        tree.validate().unwrap();
    }

    #[test]
    fn test_undock_last_leaf_empties_root() {
        let mut tree = single("A");
        assert!(tree.undock("A"));
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert!(!tree.undock("A"));
    }

    #[test]
    fn test_undock_last_panel_of_single_tab_removes_group() {
        let mut tree = LayoutTree::default().with_always_show_tabs(true);
        tree.dock_to_root(leaf("A"), Region::Center, 0.5).unwrap();
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        assert!(tree.undock("B"));
        let tab = tree.node(tree.child().unwrap()).unwrap().as_tab().unwrap();
        assert_eq!(tab.tabs.len(), 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_undock_clears_maximized_panel() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        tree.window.maximized_panel = Some("B".to_string());
        tree.undock("B");
        assert_eq!(tree.window.maximized_panel, None);
    }

    #[test]
    fn test_find_returns_node_before_undock_only() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::West, 0.5).unwrap();
        let before = tree.find("B").cloned();
        assert_eq!(before.and_then(|n| n.as_leaf().cloned()), Some(leaf("B")));
        tree.undock("B");
        assert!(tree.find("B").is_none());
    }

    #[test]
    fn test_replace_child_reparents() {
        let mut tree = single("A");
        let a = tree.child().unwrap();
        let b = tree.alloc(NodeKind::Leaf(leaf("B")));
        tree.replace_child(a, b).unwrap();
        assert_eq!(tree.child(), Some(b));
        assert_eq!(tree.node(b).unwrap().parent, None);
    }

    #[test]
    fn test_set_divider_proportion_clamps() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        let split = tree.child().unwrap();
        tree.set_divider_proportion(split, 1.7).unwrap();
        assert_eq!(root_split(&tree).proportion, 1.0);

        let leaf_id = tree.find("A").unwrap().id;
        assert!(tree.set_divider_proportion(leaf_id, 0.5).is_err());
    }

    #[test]
    fn test_ancestors() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        tree.dock(leaf("C"), "B", Region::Center, 0.5).unwrap();
        let c = tree.find("C").unwrap().id;
        let chain = tree.ancestors(c);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.last().copied(), tree.child());
    }

    #[test]
    fn test_visible_panels_skip_unselected_tabs() {
        let mut tree = single("A");
        tree.dock(leaf("B"), "A", Region::East, 0.5).unwrap();
        tree.dock(leaf("C"), "B", Region::Center, 0.5).unwrap();
        assert_eq!(tree.visible_panels(), vec!["A", "C"]);

        tree.select_tab("B").unwrap();
        assert_eq!(tree.visible_panels(), vec!["A", "B"]);
    }

    #[test]
    fn test_leaf_mut_edits_properties() {
        let mut tree = single("A");
        tree.leaf_mut("A")
            .unwrap()
            .properties
            .insert("scroll".to_string(), "12".to_string());
        let leaf = tree.find("A").unwrap().as_leaf().unwrap();
        assert_eq!(leaf.properties.get("scroll").map(String::as_str), Some("12"));
        assert!(tree.leaf_mut("missing").is_none());
    }
}
