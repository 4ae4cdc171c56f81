//! Shared persistence helpers for the JSON-backed stores
//!
//! Both stores are whole-value overwrites of a single JSON file. Reads
//! are corruption-tolerant and writes are best-effort: failures are
//! logged, never propagated.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{error, warn};

/// Outcome of a corruption-tolerant store read.
///
/// The caller-facing contract collapses `Missing` and `Unreadable` into
/// an empty default, but keeping them distinct lets tests tell
/// "genuinely empty" from "read failed".
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRead<T> {
    /// The file existed and parsed
    Loaded(T),
    /// No file yet (first run)
    Missing,
    /// The file exists but could not be read or parsed
    Unreadable,
}

impl<T: Default> StoreRead<T> {
    /// Collapse to the stored value, degrading to the empty default
    pub fn or_default(self) -> T {
        match self {
            StoreRead::Loaded(value) => value,
            StoreRead::Missing | StoreRead::Unreadable => T::default(),
        }
    }
}

impl<T> StoreRead<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, StoreRead::Loaded(_))
    }
}

/// Read and parse a JSON file, swallowing corruption
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> StoreRead<T> {
    if !path.exists() {
        return StoreRead::Missing;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return StoreRead::Unreadable;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => StoreRead::Loaded(value),
        Err(e) => {
            warn!("Failed to parse {}: {}", path.display(), e);
            StoreRead::Unreadable
        }
    }
}

/// Serialize and write a JSON file. Returns whether the durable write
/// succeeded; failures are logged and swallowed so the in-memory value
/// still stands for the caller.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> bool {
    let contents = match serde_json::to_string_pretty(value) {
        Ok(contents) => contents,
        Err(e) => {
            error!("Failed to serialize {}: {}", path.display(), e);
            return false;
        }
    };

    if let Err(e) = std::fs::write(path, contents) {
        error!("Failed to write {}: {}", path.display(), e);
        return false;
    }

    true
}
