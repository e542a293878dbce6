//! Integer key-value persistence
//!
//! The only thing the game persists is the high score, so stores expose a
//! single integer get/set pair. Missing keys read as zero.
//!
//! Backends:
//! - `MemoryStore`: process-local, used by tests
//! - `JsonFileStore`: native, one JSON object per file, write-then-rename
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use std::collections::BTreeMap;
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

/// Storage for named integers
pub trait IntegerStore {
    /// Read an integer; an absent key reads as 0
    fn get_integer(&self, key: &str) -> Result<i64, StoreError>;

    /// Write an integer, persisting it before returning
    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Errors raised by a store backend
#[derive(Debug)]
pub enum StoreError {
    /// I/O error (permission denied, disk full, ...)
    Io(std::io::Error),
    /// Stored data could not be decoded
    Decode(String),
    /// No backing storage available (e.g. LocalStorage disabled)
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            StoreError::Unavailable(msg) => write!(f, "Storage unavailable: {msg}"),
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
        StoreError::Decode(e.to_string())
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    /// Number of successful writes, for observing persistence
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntegerStore for MemoryStore {
    fn get_integer(&self, key: &str) -> Result<i64, StoreError> {
        Ok(self.values.get(key).copied().unwrap_or(0))
    }

    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

impl<S: IntegerStore + ?Sized> IntegerStore for Box<S> {
    fn get_integer(&self, key: &str) -> Result<i64, StoreError> {
        (**self).get_integer(key)
    }

    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        (**self).set_integer(key, value)
    }
}
