//! Panel registration
//!
//! Applications register every panel once with its persistent ID and
//! capability flags. The engine never looks at panel content; the registry is
//! only consulted for reconstruction (class name, properties) and for drag
//! and drop legality.

use std::collections::{BTreeMap, HashMap};

use crate::error::{DockingError, Result};

use super::layout::Leaf;
use super::region::RegionSet;

/// Registration record for a panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub persistent_id: String,
    /// Content-class tag used to rebuild the panel when a layout is restored
    pub class_name: String,
    /// Can be dropped outside every window to become a new window
    pub floatable: bool,
    /// Offers a close button; `close_panel` refuses panels without one
    pub closable: bool,
    /// Can be moved to an auto-hide edge
    pub pinnable: bool,
    /// Must stay in the window it was first docked to
    pub limited_to_window: bool,
    pub disallowed_regions: RegionSet,
    pub properties: BTreeMap<String, String>,
}

impl PanelSpec {
    pub fn new(persistent_id: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            persistent_id: persistent_id.into(),
            class_name: class_name.into(),
            floatable: true,
            closable: true,
            pinnable: false,
            limited_to_window: false,
            disallowed_regions: RegionSet::EMPTY,
            properties: BTreeMap::new(),
        }
    }

    pub fn floatable(mut self, floatable: bool) -> Self {
        self.floatable = floatable;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn pinnable(mut self, pinnable: bool) -> Self {
        self.pinnable = pinnable;
        self
    }

    pub fn limited_to_window(mut self, limited: bool) -> Self {
        self.limited_to_window = limited;
        self
    }

    pub fn disallow(mut self, regions: RegionSet) -> Self {
        self.disallowed_regions = self.disallowed_regions.union(regions);
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Leaf node describing this panel
    pub fn leaf(&self) -> Leaf {
        Leaf {
            persistent_id: self.persistent_id.clone(),
            class_name: self.class_name.clone(),
            properties: self.properties.clone(),
        }
    }
}

impl From<&PanelSpec> for Leaf {
    fn from(spec: &PanelSpec) -> Self {
        spec.leaf()
    }
}

/// All registered panels, keyed by persistent ID
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: HashMap<String, PanelSpec>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel; persistent IDs must be unique and non-empty
    pub fn register(&mut self, spec: PanelSpec) -> Result<()> {
        if spec.persistent_id.is_empty() || self.panels.contains_key(&spec.persistent_id) {
            return Err(DockingError::Registration {
                id: spec.persistent_id,
            });
        }
        tracing::debug!("Registered panel {}", spec.persistent_id);
        self.panels.insert(spec.persistent_id.clone(), spec);
        Ok(())
    }

    pub fn deregister(&mut self, persistent_id: &str) -> Result<PanelSpec> {
        self.panels
            .remove(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))
    }

    pub fn get(&self, persistent_id: &str) -> Result<&PanelSpec> {
        self.panels
            .get(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))
    }

    pub fn get_mut(&mut self, persistent_id: &str) -> Result<&mut PanelSpec> {
        self.panels
            .get_mut(persistent_id)
            .ok_or_else(|| DockingError::not_found(persistent_id))
    }

    pub fn contains(&self, persistent_id: &str) -> bool {
        self.panels.contains_key(persistent_id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Registered panels sorted by persistent ID
    pub fn iter(&self) -> impl Iterator<Item = &PanelSpec> {
        let mut specs: Vec<&PanelSpec> = self.panels.values().collect();
        specs.sort_by(|a, b| a.persistent_id.cmp(&b.persistent_id));
        specs.into_iter()
    }
}
