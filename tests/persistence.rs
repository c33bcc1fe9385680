//! Tests for saving, loading and restoring layouts

mod common;

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use common::*;
use dockyard::commands::Cmd;
use dockyard::messages::{Msg, PersistMsg};
use dockyard::model::{
    DockingEvent, DockingModel, NodeKind, Point, Rect, Region, WindowMeta, WindowState,
};
use dockyard::persist::{
    load_window, save_window, AppLayout, LayoutEvent, LayoutStore, Persistence, PersistWorker,
    WindowLayoutBuilder,
};
use dockyard::update::update;
use dockyard::DockingError;

/// Main window holding only `a`
fn default_layout() -> AppLayout {
    let (mut model, main) = empty_model();
    model.register_panel(spec("a")).unwrap();
    model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
    model.application_layout()
}

/// Fresh model with `a`, `b` and `c` registered but nothing docked
fn blank_model() -> (DockingModel, dockyard::model::WindowId) {
    let (mut model, main) = empty_model();
    for id in ["a", "b", "c"] {
        model.register_panel(spec(id)).unwrap();
    }
    (model, main)
}

fn temp_layout() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    (dir, path)
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_save_and_restore_round_trip() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = two_panel_model(spec("b"));
    model.register_panel(spec("c")).unwrap();
    model.dock("c", "b", Region::South, 0.3).unwrap();
    model.save_layout(&path).unwrap();
    assert_eq!(
        model.layouts.drain_events(),
        vec![LayoutEvent::Persisted(path.clone())]
    );

    let (mut restored, main) = blank_model();
    let report = restored.restore_from(&path, &default_layout()).unwrap();

    assert!(report.opened.is_empty());
    assert!(report.closed.is_empty());
    assert_eq!(main_ids(&restored, main), vec!["a", "b", "c"]);
    assert_eq!(
        restored.window(main).unwrap().tree.outline(),
        model.window(model.main_window().unwrap()).unwrap().tree.outline()
    );
}

#[test]
fn test_document_shape() {
    let (mut model, _) = two_panel_model(spec("b"));
    let value = serde_json::to_value(model.application_layout()).unwrap();

    assert_eq!(value["version"], 1);
    let root = &value["windows"][0]["root"];
    assert_eq!(root["kind"], "split");
    assert_eq!(root["orientation"], "horizontal");
    assert_eq!(root["left"]["kind"], "simple");
    assert_eq!(root["left"]["persistent_id"], "a");
    assert_eq!(root["right"]["class_name"], "test::b");
}

#[test]
fn test_multi_window_round_trip() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = two_panel_model(spec("b"));
    model.undock("b").unwrap();
    let floating = model
        .float_panel("b", Rect::new(900.0, 100.0, 300.0, 200.0))
        .unwrap();
    model.save_layout(&path).unwrap();

    let (mut restored, main) = blank_model();
    let report = restored.restore_from(&path, &default_layout()).unwrap();

    assert_eq!(report.opened.len(), 1);
    let opened = report.opened[0];
    assert_ne!(opened, main);
    assert_eq!(main_ids(&restored, main), vec!["a"]);
    let window = restored.window(opened).unwrap();
    assert_eq!(window.tree.panel_ids(), vec!["b"]);
    assert_eq!(window.meta().position, Point::new(900.0, 100.0));
    assert_eq!(window.meta().size, size(300.0, 200.0));
    assert!(!window.is_main);
    assert!(model.window(floating).unwrap().tree.contains("b"));
}

#[test]
fn test_restore_closes_extra_windows() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = two_panel_model(spec("b"));
    model.save_layout(&path).unwrap();

    let (mut restored, main) = blank_model();
    let extra = restored.add_window(WindowMeta::default());
    let report = restored.restore_from(&path, &default_layout()).unwrap();

    assert_eq!(report.closed, vec![extra]);
    assert_eq!(restored.window_ids(), vec![main]);
}

#[test]
fn test_auto_hide_and_maximized_round_trip() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = blank_model();
    let main = model.main_window().unwrap();
    model.registry.get_mut("c").unwrap().pinnable = true;
    model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
    model.dock("b", "a", Region::Center, 0.5).unwrap();
    model.dock_to_root(main, "c", Region::South, 0.25).unwrap();
    model.auto_hide("c", dockyard::model::AutoHideEdge::South).unwrap();
    model.maximize("a").unwrap();
    model.save_layout(&path).unwrap();

    let (mut restored, main) = blank_model();
    restored.restore_from(&path, &default_layout()).unwrap();

    let meta = restored.window(main).unwrap().meta();
    assert_eq!(meta.auto_hide.south, vec!["c"]);
    assert_eq!(meta.maximized_panel.as_deref(), Some("a"));
    assert!(restored.is_auto_hidden("c"));
    let tree = &restored.window(main).unwrap().tree;
    match tree.child().and_then(|id| tree.node(id)).map(|n| &n.kind) {
        Some(NodeKind::Tab(tab)) => assert_eq!(tab.selected, "b"),
        other => panic!("Expected Tab, got {:?}", other),
    }
}

#[test]
fn test_undocked_properties_round_trip() {
    let (_dir, path) = temp_layout();
    let (mut model, main) = empty_model();
    model.register_panel(spec("a")).unwrap();
    model
        .register_panel(spec("notes").property("draft", "hello"))
        .unwrap();
    model.dock_to_root(main, "a", Region::Center, 0.5).unwrap();
    model.save_layout(&path).unwrap();

    let (mut restored, _) = empty_model();
    restored.register_panel(spec("a")).unwrap();
    restored.register_panel(spec("notes")).unwrap();
    restored.restore_from(&path, &default_layout()).unwrap();

    let notes = restored.registry.get("notes").unwrap();
    assert_eq!(notes.properties.get("draft").map(String::as_str), Some("hello"));
}

#[test]
fn test_window_layout_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("window.json");
    let (model, main) = two_panel_model(spec("b"));
    save_window(&path, &model.window_layout(main).unwrap()).unwrap();

    let loaded = load_window(&path).unwrap();
    let (mut restored, target) = blank_model();
    restored.restore_window_layout(target, &loaded).unwrap();

    assert_eq!(main_ids(&restored, target), vec!["a", "b"]);
}

// ============================================================================
// Fallbacks and validation
// ============================================================================

#[test]
fn test_missing_file_falls_back_to_default() {
    let (_dir, path) = temp_layout();
    let (mut model, main) = blank_model();

    model.restore_from(&path, &default_layout()).unwrap();

    assert_eq!(main_ids(&model, main), vec!["a"]);
}

#[test]
fn test_built_default_applies_when_nothing_saved() {
    let (_dir, path) = temp_layout();
    let (mut model, main) = blank_model();
    let default = WindowLayoutBuilder::new(&spec("a"))
        .dock(&spec("b"), "a", Region::East, 0.75)
        .unwrap()
        .tab(&spec("c"), "b")
        .unwrap()
        .display("b")
        .unwrap()
        .property("c", "filter", "errors")
        .unwrap()
        .bounds(Point::new(20.0, 30.0), size(1024.0, 768.0))
        .build_application_layout();
    model.drain_events();

    model.restore_from(&path, &default).unwrap();

    assert_eq!(main_ids(&model, main), vec!["a", "b", "c"]);
    let window = model.window(main).unwrap();
    assert_eq!(window.meta().position, Point::new(20.0, 30.0));
    let c = window.tree.find("c").and_then(|n| n.as_leaf()).unwrap();
    assert_eq!(c.properties.get("filter").map(String::as_str), Some("errors"));
    assert_eq!(window.tree.visible_panels(), vec!["a", "b"]);

    let docked: Vec<String> = model
        .drain_events()
        .iter()
        .filter(|e| matches!(e, DockingEvent::Docked { .. }))
        .map(|e| e.panel().to_string())
        .collect();
    assert_eq!(docked, vec!["a", "b", "c"]);
}

#[test]
fn test_corrupt_file_falls_back_to_default() {
    let (_dir, path) = temp_layout();
    fs::write(&path, "{ not json").unwrap();
    let (mut model, main) = blank_model();

    model.restore_from(&path, &default_layout()).unwrap();

    assert_eq!(main_ids(&model, main), vec!["a"]);
}

#[test]
fn test_unregistered_panel_falls_back_to_default() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = two_panel_model(spec("b"));
    model.save_layout(&path).unwrap();

    let (mut restored, main) = empty_model();
    restored.register_panel(spec("a")).unwrap();
    restored.restore_from(&path, &default_layout()).unwrap();

    assert_eq!(main_ids(&restored, main), vec!["a"]);
}

#[test]
fn test_load_rejects_invalid_documents() {
    let (_dir, path) = temp_layout();
    let window = r#"{"main": true, "position": {"x": 0, "y": 0}, "size": {"width": 10, "height": 10}}"#;
    fs::write(&path, format!(r#"{{"version": 1, "windows": [{}, {}]}}"#, window, window)).unwrap();

    let err = LayoutStore::new(&path).load().unwrap_err();
    assert!(err.is_persistence());
    assert!(err.to_string().contains("main window"));

    fs::write(&path, format!(r#"{{"version": 99, "windows": [{}]}}"#, window)).unwrap();
    assert!(LayoutStore::new(&path).load().is_err());
}

#[test]
fn test_load_rejects_duplicate_panels() {
    let (_dir, path) = temp_layout();
    let content = r#"{
        "version": 1,
        "windows": [{
            "main": true,
            "position": {"x": 0, "y": 0},
            "size": {"width": 10, "height": 10},
            "root": {
                "kind": "split",
                "orientation": "vertical",
                "proportion": 0.5,
                "left": {"kind": "simple", "persistent_id": "a", "class_name": "x"},
                "right": {"kind": "simple", "persistent_id": "a", "class_name": "x"}
            }
        }]
    }"#;
    fs::write(&path, content).unwrap();

    assert!(matches!(
        LayoutStore::new(&path).load(),
        Err(DockingError::Persistence { .. })
    ));
}

#[test]
fn test_maximized_window_keeps_normal_geometry() {
    let (mut model, main) = two_panel_model(spec("b"));
    model
        .set_window_bounds(main, Point::new(20.0, 30.0), size(640.0, 480.0))
        .unwrap();
    model.application_layout();

    model.set_window_state(main, WindowState::Maximized).unwrap();
    model
        .set_window_bounds(main, Point::new(0.0, 0.0), size(1920.0, 1080.0))
        .unwrap();
    let layout = model.application_layout();

    let window = layout.main_window().unwrap();
    assert_eq!(window.state, WindowState::Maximized);
    assert_eq!(window.position, Point::new(20.0, 30.0));
    assert_eq!(window.size, size(640.0, 480.0));
}

// ============================================================================
// Debounce, worker and messages
// ============================================================================

#[test]
fn test_debounce_restarts_on_each_change() {
    let mut persistence =
        Persistence::new(Duration::from_millis(500), Some(PathBuf::from("layout.json")), true);
    let t0 = Instant::now();

    persistence.request(t0);
    assert_eq!(persistence.due(t0 + Duration::from_millis(400)), None);
    persistence.request(t0 + Duration::from_millis(300));
    assert_eq!(persistence.due(t0 + Duration::from_millis(700)), None);
    assert_eq!(
        persistence.due(t0 + Duration::from_millis(800)),
        Some(PathBuf::from("layout.json"))
    );
    assert_eq!(persistence.due(t0 + Duration::from_millis(900)), None);
}

#[test]
fn test_paused_persistence_drops_requests() {
    let mut persistence =
        Persistence::new(Duration::from_millis(500), Some(PathBuf::from("layout.json")), true);
    let t0 = Instant::now();

    persistence.request(t0);
    persistence.pause();
    persistence.request(t0);
    assert_eq!(persistence.due(t0 + Duration::from_secs(1)), None);

    persistence.resume();
    assert_eq!(persistence.due(t0 + Duration::from_secs(1)), None);
}

#[test]
fn test_auto_persist_off_never_schedules() {
    let mut persistence =
        Persistence::new(Duration::from_millis(500), Some(PathBuf::from("layout.json")), false);
    let t0 = Instant::now();
    persistence.request(t0);
    assert_eq!(persistence.due(t0 + Duration::from_secs(1)), None);
}

#[test]
fn test_worker_writes_in_background() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = two_panel_model(spec("b"));
    let layout = model.application_layout();

    let worker = PersistWorker::spawn().unwrap();
    assert!(worker.submit(path.clone(), layout.clone()));
    let results = worker.shutdown();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, path);
    assert_eq!(results[0].result, Ok(()));
    assert_eq!(LayoutStore::new(&path).load().unwrap(), layout);
}

#[test]
fn test_save_now_and_write_completed() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = two_panel_model(spec("b"));
    model.persistence.target = Some(path.clone());
    let surface = FakeSurface::new();

    let cmd = update(&mut model, Msg::Persist(PersistMsg::SaveNow), &surface).unwrap();
    let Some(Cmd::WriteLayout { path: target, layout }) = cmd else {
        panic!("expected a layout write");
    };
    assert_eq!(target, path);
    assert_eq!(layout.panel_ids(), vec!["a", "b"]);

    update(
        &mut model,
        Msg::Persist(PersistMsg::WriteCompleted {
            path: path.clone(),
            result: Ok(()),
        }),
        &surface,
    )
    .unwrap();
    assert_eq!(
        model.layouts.drain_events(),
        vec![LayoutEvent::Persisted(path)]
    );
}

#[test]
fn test_restore_message_emits_window_commands() {
    let (_dir, path) = temp_layout();
    let (mut model, _) = two_panel_model(spec("b"));
    model.undock("b").unwrap();
    let floating = model
        .float_panel("b", Rect::new(900.0, 100.0, 300.0, 200.0))
        .unwrap();
    model.save_layout(&path).unwrap();

    let (mut restored, _) = blank_model();
    let cmd = update(
        &mut restored,
        Msg::Persist(PersistMsg::Restore {
            path,
            default: Box::new(default_layout()),
        }),
        &FakeSurface::new(),
    )
    .unwrap()
    .unwrap();

    let opened: Vec<_> = cmd
        .flatten()
        .into_iter()
        .filter_map(|c| match c {
            Cmd::OpenWindow { bounds, .. } => Some(*bounds),
            _ => None,
        })
        .collect();
    assert_eq!(opened, vec![Rect::new(900.0, 100.0, 300.0, 200.0)]);
    assert!(cmd.needs_redraw());
    assert_ne!(floating, restored.main_window().unwrap());
}

#[test]
fn test_named_layouts() {
    let (mut model, main) = two_panel_model(spec("b"));
    let surface = FakeSurface::new();

    update(
        &mut model,
        Msg::Persist(PersistMsg::SaveNamed("coding".to_string())),
        &surface,
    )
    .unwrap();
    model.undock("b").unwrap();
    assert_eq!(main_ids(&model, main), vec!["a"]);

    update(
        &mut model,
        Msg::Persist(PersistMsg::RestoreNamed("coding".to_string())),
        &surface,
    )
    .unwrap();
    assert_eq!(main_ids(&model, main), vec!["a", "b"]);

    let result = update(
        &mut model,
        Msg::Persist(PersistMsg::RestoreNamed("missing".to_string())),
        &surface,
    );
    assert!(matches!(result, Err(DockingError::Structural { .. })));

    update(
        &mut model,
        Msg::Persist(PersistMsg::RemoveNamed("coding".to_string())),
        &surface,
    )
    .unwrap();
    assert!(model.layouts.names().is_empty());
    assert_eq!(
        model.layouts.drain_events(),
        vec![
            LayoutEvent::Added("coding".to_string()),
            LayoutEvent::Restored("coding".to_string()),
            LayoutEvent::Removed("coding".to_string()),
        ]
    );
}
