//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockyard::commands::Cmd;
use dockyard::messages::{Msg, PointerEvent};
use dockyard::model::{
    DockingModel, PanelSpec, Point, Rect, Region, Size, WindowId, WindowMeta,
};
use dockyard::update::update;
use dockyard::{DockSurface, DockingConfig, Result};

pub const MAIN_BOUNDS: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 800.0,
    height: 600.0,
};

/// Screen layout the tests control directly
///
/// Windows are listed topmost first; panel rectangles are fixed and do not
/// follow tree changes.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub windows: Vec<(WindowId, Rect)>,
    pub panels: Vec<(WindowId, String, Rect)>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, id: WindowId, bounds: Rect) -> Self {
        self.windows.push((id, bounds));
        self
    }

    pub fn panel(mut self, window: WindowId, id: &str, bounds: Rect) -> Self {
        self.panels.push((window, id.to_string(), bounds));
        self
    }
}

impl DockSurface for FakeSurface {
    fn windows_at(&self, point: Point) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|(_, bounds)| bounds.contains_point(point))
            .map(|(id, _)| *id)
            .collect()
    }

    fn root_bounds(&self, window: WindowId) -> Option<Rect> {
        self.windows
            .iter()
            .find(|(id, _)| *id == window)
            .map(|(_, bounds)| *bounds)
    }

    fn panel_at(&self, window: WindowId, point: Point) -> Option<(String, Rect)> {
        self.panels
            .iter()
            .find(|(w, _, bounds)| *w == window && bounds.contains_point(point))
            .map(|(_, id, bounds)| (id.clone(), *bounds))
    }

    fn panel_bounds(&self, window: WindowId, panel: &str) -> Option<Rect> {
        self.panels
            .iter()
            .find(|(w, id, _)| *w == window && id == panel)
            .map(|(_, _, bounds)| *bounds)
    }
}

pub fn spec(id: &str) -> PanelSpec {
    PanelSpec::new(id, format!("test::{}", id))
}

/// Model with one main window at `MAIN_BOUNDS` and no panels
pub fn empty_model() -> (DockingModel, WindowId) {
    let mut model = DockingModel::new(DockingConfig::default());
    let main = model.add_window(WindowMeta::new(MAIN_BOUNDS.origin(), MAIN_BOUNDS.size()));
    (model, main)
}

/// `a | b` side by side in the main window, split at 0.5
///
/// `b` is registered from `b_spec` so tests can change its capabilities.
pub fn two_panel_model(b_spec: PanelSpec) -> (DockingModel, WindowId) {
    let (mut model, main) = empty_model();
    model.register_panel(spec("a")).unwrap();
    model.register_panel(b_spec).unwrap();
    model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
    model.dock("b", "a", Region::East, 0.5).unwrap();
    (model, main)
}

/// Surface matching `two_panel_model`
pub fn two_panel_surface(main: WindowId) -> FakeSurface {
    FakeSurface::new()
        .window(main, MAIN_BOUNDS)
        .panel(main, "a", Rect::new(0.0, 0.0, 400.0, 600.0))
        .panel(main, "b", Rect::new(400.0, 0.0, 400.0, 600.0))
}

pub fn secondary_bounds() -> Rect {
    Rect::new(1000.0, 0.0, 400.0, 400.0)
}

pub fn press(
    model: &mut DockingModel,
    surface: &FakeSurface,
    panel: &str,
    x: f64,
    y: f64,
) -> Result<Option<Cmd>> {
    update(
        model,
        Msg::Pointer(PointerEvent::pressed(panel, Point::new(x, y))),
        surface,
    )
}

pub fn move_to(model: &mut DockingModel, surface: &FakeSurface, x: f64, y: f64) -> Option<Cmd> {
    update(model, Msg::pointer_moved(x, y), surface).unwrap()
}

pub fn release(model: &mut DockingModel, surface: &FakeSurface, x: f64, y: f64) -> Option<Cmd> {
    update(model, Msg::pointer_released(x, y), surface).unwrap()
}

/// Press on `panel`, move to (x, y) and release there
pub fn drag_to(
    model: &mut DockingModel,
    surface: &FakeSurface,
    panel: &str,
    x: f64,
    y: f64,
) -> Option<Cmd> {
    let start = surface
        .panels
        .iter()
        .find(|(_, id, _)| id == panel)
        .map(|(_, _, bounds)| bounds.center())
        .unwrap_or(Point::new(x, y));
    press(model, surface, panel, start.x, start.y).unwrap();
    move_to(model, surface, x, y);
    release(model, surface, x, y)
}

pub fn main_ids(model: &DockingModel, window: WindowId) -> Vec<String> {
    model.window(window).unwrap().tree.panel_ids()
}

pub fn size(width: f64, height: f64) -> Size {
    Size::new(width, height)
}
