//! Persistence port for the session slot.

use std::sync::{Arc, Mutex, PoisonError};

use super::state::SessionState;

/// Errors a storage backend can report on write.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// The backing medium could not be written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The state could not be serialized.
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single named slot that holds the serialized session.
///
/// `load` cannot fail: a missing, unreadable or corrupt slot yields
/// [`SessionState::default`]. `save` replaces the slot with the full state.
pub trait SessionStorage: Send + Sync {
    /// Read and rehydrate the slot.
    fn load(&self) -> SessionState;

    /// Replace the slot with `state`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the state cannot be serialized or the
    /// slot cannot be written.
    fn save(&self, state: &SessionState) -> Result<(), StorageError>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    fn load(&self) -> SessionState {
        (**self).load()
    }

    fn save(&self, state: &SessionState) -> Result<(), StorageError> {
        (**self).save(state)
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for Box<T> {
    fn load(&self) -> SessionState {
        (**self).load()
    }

    fn save(&self, state: &SessionState) -> Result<(), StorageError> {
        (**self).save(state)
    }
}

/// In-process slot. Keeps the serialized string, not the value, so loads
/// go through the same JSON path as any other backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `raw`, which need not be valid JSON.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Current raw slot value.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> SessionState {
        self.raw()
            .map_or_else(SessionState::default, |raw| SessionState::rehydrate(&raw))
    }

    fn save(&self, state: &SessionState) -> Result<(), StorageError> {
        let raw = state.to_json()?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }
}
