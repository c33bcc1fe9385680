//! Region detection against rectangles of different shapes

use dockyard::detector::{legal_region_for, region_for, DEFAULT_SENSITIVITY};
use dockyard::model::{Point, Rect, Region, RegionSet};

fn wide() -> Rect {
    Rect::new(100.0, 50.0, 1000.0, 200.0)
}

#[test]
fn test_nearest_axis_wins_on_wide_rect() {
    let rect = wide();
    // 10% from the left but 50% down: the horizontal edge is closer
    assert_eq!(region_for(Point::new(200.0, 150.0), rect, DEFAULT_SENSITIVITY), Region::West);
    // 45% across, 10% down
    assert_eq!(region_for(Point::new(550.0, 70.0), rect, DEFAULT_SENSITIVITY), Region::North);
    assert_eq!(region_for(Point::new(600.0, 150.0), rect, DEFAULT_SENSITIVITY), Region::Center);
    assert_eq!(region_for(Point::new(1050.0, 150.0), rect, DEFAULT_SENSITIVITY), Region::East);
    assert_eq!(region_for(Point::new(550.0, 240.0), rect, DEFAULT_SENSITIVITY), Region::South);
}

#[test]
fn test_sensitivity_controls_band_width() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let pointer = Point::new(20.0, 50.0);
    assert_eq!(region_for(pointer, rect, 0.35), Region::West);
    assert_eq!(region_for(pointer, rect, 0.1), Region::Center);
}

#[test]
fn test_band_boundary_is_exclusive() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(region_for(Point::new(25.0, 50.0), rect, 0.25), Region::Center);
    assert_eq!(region_for(Point::new(24.0, 50.0), rect, 0.25), Region::West);
}

#[test]
fn test_pointer_outside_rect() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(region_for(Point::new(-20.0, 50.0), rect, DEFAULT_SENSITIVITY), Region::West);
}

#[test]
fn test_legality_never_yields_disallowed_region() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let disallowed: RegionSet = [Region::North, Region::East].into_iter().collect();
    for x in (0..100).step_by(5) {
        for y in (0..100).step_by(5) {
            let region =
                legal_region_for(Point::new(x as f64, y as f64), rect, DEFAULT_SENSITIVITY, disallowed);
            assert!(!disallowed.contains(region), "got {} at ({}, {})", region, x, y);
        }
    }
}
