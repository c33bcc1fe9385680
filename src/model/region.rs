//! Drop regions relative to a docking target

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis along which a split divides space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Children arranged left-to-right
    Horizontal,
    /// Children arranged top-to-bottom
    Vertical,
}

/// Placement of a docked panel relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Center,
    North,
    East,
    South,
    West,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Center,
        Region::North,
        Region::East,
        Region::South,
        Region::West,
    ];

    pub const EDGES: [Region; 4] = [Region::North, Region::East, Region::South, Region::West];

    pub fn is_edge(self) -> bool {
        self != Region::Center
    }

    /// Orientation of the split created when docking to this region
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            Region::Center => None,
            Region::East | Region::West => Some(Orientation::Horizontal),
            Region::North | Region::South => Some(Orientation::Vertical),
        }
    }

    /// Whether the newly inserted node becomes the first child of the split
    pub fn inserts_first(self) -> bool {
        matches!(self, Region::North | Region::West)
    }

    fn bit(self) -> u8 {
        match self {
            Region::Center => 1 << 0,
            Region::North => 1 << 1,
            Region::East => 1 << 2,
            Region::South => 1 << 3,
            Region::West => 1 << 4,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Center => "CENTER",
            Region::North => "NORTH",
            Region::East => "EAST",
            Region::South => "SOUTH",
            Region::West => "WEST",
        };
        f.write_str(name)
    }
}

/// Small set of regions, used for a panel's disallowed drop regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegionSet(u8);

impl RegionSet {
    pub const EMPTY: RegionSet = RegionSet(0);

    /// Panels that only make sense side by side (no NORTH/SOUTH)
    pub fn vertical_only() -> Self {
        [Region::North, Region::South].into_iter().collect()
    }

    /// Panels that only make sense stacked (no EAST/WEST)
    pub fn horizontal_only() -> Self {
        [Region::East, Region::West].into_iter().collect()
    }

    pub fn insert(&mut self, region: Region) {
        self.0 |= region.bit();
    }

    pub fn remove(&mut self, region: Region) {
        self.0 &= !region.bit();
    }

    pub fn contains(&self, region: Region) -> bool {
        self.0 & region.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: RegionSet) -> RegionSet {
        RegionSet(self.0 | other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        Region::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut set = RegionSet::EMPTY;
        for region in iter {
            set.insert(region);
        }
        set
    }
}
