// ---------------------------------------------------------------------------
// StoreError: failures reading or persisting the configuration document
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while reading or writing the configuration store.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The document is not valid JSON.
    Parse(String),
    /// The document parsed, but its top level is not an object.
    NotADocument,
    /// Serializing the in-memory document failed.
    Encode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Parse(msg) => write!(f, "Malformed config document: {msg}"),
            StoreError::NotADocument => {
                write!(f, "Malformed config document: top level must be an object")
            }
            StoreError::Encode(msg) => write!(f, "Encoding error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            StoreError::Encode(e.to_string())
        } else {
            StoreError::Parse(e.to_string())
        }
    }
}
