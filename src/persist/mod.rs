//! Layout persistence: document format, disk store, debounce timer,
//! background writer and named layouts

pub mod builder;
pub mod document;
pub mod named;
pub mod scheduler;
pub mod store;
pub mod worker;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub use builder::WindowLayoutBuilder;
pub use document::{AppLayout, LeafLayout, NodeLayout, UndockedPanel, WindowLayout, LAYOUT_VERSION};
pub use named::{LayoutEvent, NamedLayouts};
pub use scheduler::{PersistScheduler, DEFAULT_PERSIST_DELAY};
pub use store::{load_window, save_window, LayoutStore};
pub use worker::{PersistWorker, WriteResult};

use crate::model::{Point, Size, WindowId, WindowMeta, WindowState};

/// Auto-persist settings and timer state held by the model
#[derive(Debug, Clone)]
pub struct Persistence {
    scheduler: PersistScheduler,
    /// File written when the timer fires
    pub target: Option<PathBuf>,
    pub auto_persist: bool,
    /// Geometry last written for each window while it was in normal state
    last_geometry: HashMap<WindowId, (Point, Size)>,
}

impl Default for Persistence {
    fn default() -> Self {
        Self::new(DEFAULT_PERSIST_DELAY, None, false)
    }
}

impl Persistence {
    pub fn new(delay: Duration, target: Option<PathBuf>, auto_persist: bool) -> Self {
        Self {
            scheduler: PersistScheduler::new(delay),
            target,
            auto_persist,
            last_geometry: HashMap::new(),
        }
    }

    pub fn scheduler(&self) -> &PersistScheduler {
        &self.scheduler
    }

    /// Note a layout change; restarts the debounce timer when auto-persist is on
    pub fn request(&mut self, now: Instant) {
        if self.auto_persist && self.target.is_some() {
            self.scheduler.request(now);
        }
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    /// Target path when a debounced write has come due
    pub fn due(&mut self, now: Instant) -> Option<PathBuf> {
        if self.scheduler.poll(now) {
            self.target.clone()
        } else {
            None
        }
    }

    /// Geometry to persist for a window
    ///
    /// A maximized or minimized window reports the geometry it had the last
    /// time it was persisted in normal state.
    pub(crate) fn geometry_for(&mut self, window: WindowId, meta: &WindowMeta) -> (Point, Size) {
        if meta.state == WindowState::Normal {
            self.last_geometry.insert(window, (meta.position, meta.size));
            return (meta.position, meta.size);
        }
        self.last_geometry
            .get(&window)
            .copied()
            .unwrap_or((meta.position, meta.size))
    }

    pub(crate) fn forget(&mut self, window: WindowId) {
        self.last_geometry.remove(&window);
    }
}
