//! The `ConfigStore` resource: a JSON document addressed with dotted keys.
//!
//! `zones.hub.world` names the `world` field of the `hub` object inside the
//! top-level `zones` object. Objects are "sections"; everything else is a
//! value. Getters never fail: a missing or mistyped value yields the caller's
//! default, so user-edited files degrade instead of erroring.

use bevy::prelude::*;
use serde_json::{Map, Value};

use crate::backend::{MemoryBackend, StoreBackend};
use crate::StoreError;

#[derive(Resource)]
pub struct ConfigStore {
    root: Map<String, Value>,
    backend: Box<dyn StoreBackend>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("backend", &self.backend.describe())
            .field("root", &self.root)
            .finish()
    }
}

impl ConfigStore {
    /// Open a store over `backend`, loading whatever it currently holds.
    /// An absent or blank document opens as an empty store.
    pub fn open(backend: impl StoreBackend) -> Result<Self, StoreError> {
        let mut store = Self {
            root: Map::new(),
            backend: Box::new(backend),
        };
        store.reload()?;
        Ok(store)
    }

    /// Like [`ConfigStore::open`], but writes `defaults` first when the
    /// backend holds no document yet (first run).
    pub fn open_or_create(backend: impl StoreBackend, defaults: &str) -> Result<Self, StoreError> {
        if backend.read()?.is_none() {
            // Reject broken defaults before they reach disk.
            parse_document(defaults)?;
            info!(
                "Config store {} not found; writing default configuration",
                backend.describe()
            );
            backend.write(defaults)?;
        }
        Self::open(backend)
    }

    /// Empty store persisting to a private in-memory backend.
    pub fn in_memory() -> Self {
        Self {
            root: Map::new(),
            backend: Box::new(MemoryBackend::default()),
        }
    }

    /// Replace the in-memory document with the backend's current contents.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.root = match self.backend.read()? {
            Some(text) if !text.trim().is_empty() => parse_document(&text)?,
            _ => Map::new(),
        };
        Ok(())
    }

    /// Persist the whole document through the backend.
    pub fn save(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.root)
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        self.backend.write(&text)
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Raw value at `path`, if present.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Whether `path` names a section (a nested object).
    pub fn is_section(&self, path: &str) -> bool {
        self.get(path).is_some_and(Value::is_object)
    }

    /// Direct child keys of the section at `path`, in document order.
    /// Empty when `path` is missing or not a section.
    pub fn section_keys(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(Value::Object(section)) => section.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// String at `path`. Numbers and booleans are rendered as text; sections,
    /// lists and nulls count as absent.
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(scalar_to_string)
    }

    pub fn get_string_or(&self, path: &str, default: &str) -> String {
        self.get_string(path)
            .unwrap_or_else(|| default.to_string())
    }

    /// Number at `path`, or `default` when missing or not numeric.
    pub fn get_f64(&self, path: &str, default: f64) -> f64 {
        self.get(path).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.get(path).and_then(Value::as_bool).unwrap_or(default)
    }

    /// List at `path` as strings. Scalar entries are rendered as text and
    /// nested sections or lists are dropped. Missing or non-list → empty.
    pub fn get_string_list(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Writes (in memory until `save`)
    // -------------------------------------------------------------------------

    /// Set `path` to `value`, creating intermediate sections. A non-section
    /// value sitting on the path is replaced by a section.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };

        let mut section = &mut self.root;
        for segment in segments {
            let entry = section
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(child) = entry else {
                return;
            };
            section = child;
        }
        section.insert(leaf.to_string(), value.into());
    }
}

fn parse_document(text: &str) -> Result<Map<String, Value>, StoreError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(root) => Ok(root),
        _ => Err(StoreError::NotADocument),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
