//! Top-level windows and the metadata stored on each layout root

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Size};
use super::layout::LayoutTree;
use super::region::Region;

/// Unique identifier for a top-level docking window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Window state as reported by the windowing layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// Whether a window blocks input to the windows behind it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Modality {
    #[default]
    Modeless,
    Modal,
}

/// Window edge holding auto-hidden ("unpinned") panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoHideEdge {
    West,
    East,
    South,
}

impl AutoHideEdge {
    pub const ALL: [AutoHideEdge; 3] = [AutoHideEdge::West, AutoHideEdge::East, AutoHideEdge::South];

    /// Root edge a panel is docked back to when it is pinned again
    pub fn region(self) -> Region {
        match self {
            AutoHideEdge::West => Region::West,
            AutoHideEdge::East => Region::East,
            AutoHideEdge::South => Region::South,
        }
    }
}

/// Ordered panel IDs assigned to each auto-hide edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoHide {
    #[serde(default)]
    pub west: Vec<String>,
    #[serde(default)]
    pub east: Vec<String>,
    #[serde(default)]
    pub south: Vec<String>,
}

impl AutoHide {
    pub fn edge(&self, edge: AutoHideEdge) -> &Vec<String> {
        match edge {
            AutoHideEdge::West => &self.west,
            AutoHideEdge::East => &self.east,
            AutoHideEdge::South => &self.south,
        }
    }

    pub fn edge_mut(&mut self, edge: AutoHideEdge) -> &mut Vec<String> {
        match edge {
            AutoHideEdge::West => &mut self.west,
            AutoHideEdge::East => &mut self.east,
            AutoHideEdge::South => &mut self.south,
        }
    }

    /// Find which edge holds a panel
    pub fn find(&self, persistent_id: &str) -> Option<AutoHideEdge> {
        AutoHideEdge::ALL
            .into_iter()
            .find(|&edge| self.edge(edge).iter().any(|id| id == persistent_id))
    }

    pub fn insert(&mut self, edge: AutoHideEdge, persistent_id: impl Into<String>) {
        let persistent_id = persistent_id.into();
        if self.find(&persistent_id).is_none() {
            self.edge_mut(edge).push(persistent_id);
        }
    }

    /// Remove a panel from whichever edge holds it
    pub fn remove(&mut self, persistent_id: &str) -> bool {
        match self.find(persistent_id) {
            Some(edge) => {
                self.edge_mut(edge).retain(|id| id != persistent_id);
                true
            }
            None => false,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.west.iter().chain(&self.east).chain(&self.south)
    }

    pub fn is_empty(&self) -> bool {
        self.west.is_empty() && self.east.is_empty() && self.south.is_empty()
    }
}

/// Metadata carried by a layout root for the window it is bound to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowMeta {
    pub position: Point,
    pub size: Size,
    pub state: WindowState,
    /// Panel currently maximized within the window, if any
    pub maximized_panel: Option<String>,
    pub auto_hide: AutoHide,
}

impl WindowMeta {
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            ..Default::default()
        }
    }
}

/// A top-level window and the layout tree rooted in it
#[derive(Debug, Clone)]
pub struct DockWindow {
    pub id: WindowId,
    pub tree: LayoutTree,
    pub is_main: bool,
    pub modality: Modality,
}

impl DockWindow {
    pub fn meta(&self) -> &WindowMeta {
        &self.tree.window
    }

    pub fn meta_mut(&mut self) -> &mut WindowMeta {
        &mut self.tree.window
    }

    /// A window holds nothing when its tree is empty and no panel is auto-hidden on it
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty() && self.tree.window.auto_hide.is_empty()
    }
}
