#![forbid(unsafe_code)]

//! Preference storage.
//!
//! A tiny key/value contract for the few user preferences that outlive a
//! session (currently only the theme mode). The browser backend lives in
//! `folio-web`; [`MemoryStorage`] serves tests and hosts without storage.
//!
//! # Design Invariants
//!
//! 1. **Graceful degradation**: storage failures never panic; operations
//!    return `Result` and callers fall back to defaults.
//! 2. **Strings only**: values are stored as plain strings; parsing is the
//!    caller's job (see [`load_parsed`]).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Unavailable` | Storage disabled (private mode, no window) | Default used |
//! | `StorageError::Backend` | Quota exceeded, security error | Write dropped, logged |
//! | `StorageError::Corruption` | Stored value does not parse | Default used, logged |

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend is not available.
    Unavailable(String),
    /// The backend rejected the operation.
    Backend(String),
    /// A stored value is not in the expected format.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StorageError::Backend(msg) => write!(f, "storage backend error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Storage Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for pluggable preference storage backends.
///
/// No `Send`/`Sync` bound: the browser backend wraps JS handles that must
/// stay on the UI thread.
pub trait StorageBackend {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Load the value stored under `key`. `Ok(None)` when absent.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Load and parse a value, degrading every failure to `None`.
///
/// Failures are logged at warn level with the backend name.
pub fn load_parsed<T: FromStr>(backend: &dyn StorageBackend, key: &str) -> Option<T> {
    let raw = match backend.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(backend = backend.name(), key, error = %err, "preference load failed");
            return None;
        }
    };
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            let err = StorageError::Corruption(format!("unparseable value {raw:?}"));
            tracing::warn!(backend = backend.name(), key, error = %err, "ignoring stored preference");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Storage
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory storage backend.
///
/// Useful for tests and for hosts without persistent storage. Values are
/// lost when the backend is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Snapshot of a stored value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    fn store(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
