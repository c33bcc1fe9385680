//! Named layouts the application can switch between

use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;

use super::document::AppLayout;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    Added(String),
    Removed(String),
    /// A named layout was applied to the model
    Restored(String),
    /// The application layout was written to disk
    Persisted(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct NamedLayouts {
    layouts: BTreeMap<String, AppLayout>,
    events: VecDeque<LayoutEvent>,
}

impl NamedLayouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a layout under `name`, replacing any previous one
    pub fn add(&mut self, name: impl Into<String>, layout: AppLayout) {
        let name = name.into();
        self.layouts.insert(name.clone(), layout);
        self.events.push_back(LayoutEvent::Added(name));
    }

    pub fn remove(&mut self, name: &str) -> Option<AppLayout> {
        let removed = self.layouts.remove(name);
        if removed.is_some() {
            self.events.push_back(LayoutEvent::Removed(name.to_string()));
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&AppLayout> {
        self.layouts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    /// Layout names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.layouts.keys().map(String::as_str).collect()
    }

    pub(crate) fn push_event(&mut self, event: LayoutEvent) {
        self.events.push_back(event);
    }

    pub fn drain_events(&mut self) -> Vec<LayoutEvent> {
        self.events.drain(..).collect()
    }
}
