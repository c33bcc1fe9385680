//! Region detection - pointer position over a target area to a drop region
//!
//! The geometric rule picks the axis whose nearest edge is closest to the
//! pointer, then compares against the sensitivity band on that axis. Handles
//! (fixed drop-zone indicators shown during a drag) override geometry when the
//! pointer is over one of them.

use crate::model::{AutoHideEdge, Point, Rect, Region, RegionSet};

/// Fraction of the target's width/height that counts as an edge band
pub const DEFAULT_SENSITIVITY: f64 = 0.35;

/// Side length of a drop handle, in pixels
pub const HANDLE_SIZE: f64 = 32.0;

/// Gap between adjacent handles in a panel's handle cross
pub const HANDLE_SPACING: f64 = 8.0;

/// Distance from a root edge to its handle
pub const ROOT_HANDLE_INSET: f64 = 16.0;

/// Geometric region of `pointer` within `rect`
///
/// Comparisons against the sensitivity band are strict, so a pointer exactly
/// on the boundary resolves to `Center`. Degenerate rectangles always resolve
/// to `Center`.
pub fn region_for(pointer: Point, rect: Rect, sensitivity: f64) -> Region {
    if rect.is_degenerate() {
        return Region::Center;
    }

    let h_pct = (pointer.x - rect.x) / rect.width;
    let v_pct = (pointer.y - rect.y) / rect.height;
    let h_edge = h_pct.min(1.0 - h_pct);
    let v_edge = v_pct.min(1.0 - v_pct);

    if h_edge < v_edge {
        if h_pct < sensitivity {
            Region::West
        } else if h_pct > 1.0 - sensitivity {
            Region::East
        } else {
            Region::Center
        }
    } else if v_pct < sensitivity {
        Region::North
    } else if v_pct > 1.0 - sensitivity {
        Region::South
    } else {
        Region::Center
    }
}

/// Geometric region with disallowed regions filtered out
///
/// A disallowed geometric result falls back to `Center`. `Center` itself is
/// never filtered: a panel can always join a target's tab group.
pub fn legal_region_for(
    pointer: Point,
    rect: Rect,
    sensitivity: f64,
    disallowed: RegionSet,
) -> Region {
    match region_for(pointer, rect, sensitivity) {
        region if region.is_edge() && disallowed.contains(region) => Region::Center,
        region => region,
    }
}

/// What dropping onto a handle does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Region(Region),
    /// Auto-hide the panel on a window edge
    Pin(AutoHideEdge),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub bounds: Rect,
    pub visible: bool,
}

/// The set of handles overlaid on a panel or on a window's root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleLayout {
    handles: Vec<Handle>,
}

impl HandleLayout {
    /// Cross of five handles around the panel center
    pub fn for_panel(rect: Rect, disallowed: RegionSet) -> Self {
        let center = rect.center();
        let step = HANDLE_SIZE + HANDLE_SPACING;

        let handles = Region::ALL
            .into_iter()
            .map(|region| {
                let at = match region {
                    Region::Center => center,
                    Region::North => center.offset(0.0, -step),
                    Region::South => center.offset(0.0, step),
                    Region::West => center.offset(-step, 0.0),
                    Region::East => center.offset(step, 0.0),
                };
                Handle {
                    kind: HandleKind::Region(region),
                    bounds: Rect::centered_square(at, HANDLE_SIZE),
                    visible: region == Region::Center || !disallowed.contains(region),
                }
            })
            .collect();

        Self { handles }
    }

    /// Edge handles for a window root, plus the root center and pin handles
    ///
    /// The center handle is only shown on an empty root. Pin handles sit one
    /// step inside the west/east/south edge handles and are only shown for
    /// pinnable panels.
    pub fn for_root(rect: Rect, root_empty: bool, pinnable: bool, disallowed: RegionSet) -> Self {
        let center = rect.center();
        let offset = ROOT_HANDLE_INSET + HANDLE_SIZE / 2.0;
        let step = HANDLE_SIZE + HANDLE_SPACING;

        let north = Point::new(center.x, rect.y + offset);
        let south = Point::new(center.x, rect.bottom() - offset);
        let west = Point::new(rect.x + offset, center.y);
        let east = Point::new(rect.right() - offset, center.y);

        let region_handle = |region: Region, at: Point| Handle {
            kind: HandleKind::Region(region),
            bounds: Rect::centered_square(at, HANDLE_SIZE),
            visible: !root_empty && !disallowed.contains(region),
        };

        let mut handles = vec![
            Handle {
                kind: HandleKind::Region(Region::Center),
                bounds: Rect::centered_square(center, HANDLE_SIZE),
                visible: root_empty,
            },
            region_handle(Region::North, north),
            region_handle(Region::South, south),
            region_handle(Region::West, west),
            region_handle(Region::East, east),
        ];

        for (edge, at) in [
            (AutoHideEdge::West, west.offset(step, 0.0)),
            (AutoHideEdge::East, east.offset(-step, 0.0)),
            (AutoHideEdge::South, south.offset(0.0, -step)),
        ] {
            handles.push(Handle {
                kind: HandleKind::Pin(edge),
                bounds: Rect::centered_square(at, HANDLE_SIZE),
                visible: pinnable && !root_empty,
            });
        }

        Self { handles }
    }

    /// The visible handle under `point`, if any
    pub fn hit(&self, point: Point) -> Option<HandleKind> {
        self.handles
            .iter()
            .find(|h| h.visible && h.bounds.contains_point(point))
            .map(|h| h.kind)
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn visible(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter().filter(|h| h.visible)
    }
}
