//! Storage backends the [`ConfigStore`](crate::ConfigStore) reads from and
//! persists to.
//!
//! The store only ever exchanges whole documents with a backend: `read`
//! returns the full text (or `None` when nothing has been written yet) and
//! `write` replaces it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::atomic_write::atomic_write;
use crate::StoreError;

/// Whole-document persistence for the config store.
pub trait StoreBackend: Send + Sync + 'static {
    /// Returns the persisted document, or `None` if none exists yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the persisted document.
    fn write(&self, document: &str) -> Result<(), StoreError>;

    /// Short label for log lines (file path, `memory`, ...).
    fn describe(&self) -> String;
}

// =============================================================================
// File backend
// =============================================================================

/// Document stored in a single JSON file, written with write-rename.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        atomic_write(&self.path, document.as_bytes())?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Memory backend
// =============================================================================

/// In-process backend. Clones share the same document and write counter, so a
/// test can keep a handle and inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Arc<Mutex<Option<String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryBackend {
    /// Backend that already holds `document`, as if a previous run wrote it.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document.into()))),
            writes: Arc::default(),
        }
    }

    /// Number of `write` calls observed so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The currently persisted document.
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StoreBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.document())
    }

    fn write(&self, document: &str) -> Result<(), StoreError> {
        *self
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(document.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
