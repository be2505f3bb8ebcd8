//! Session slot stored as one JSON file on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cartwheel_core::{SessionState, SessionStorage, StorageError};
use tracing::debug;

/// A slot backed by `<dir>/<slot>.json`.
///
/// Writes go to a sibling temp file and are renamed into place, so a crash
/// mid-write leaves either the old slot or the new one, never half of each.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStorage for JsonFileStorage {
    fn load(&self) -> SessionState {
        match fs::read_to_string(&self.path) {
            Ok(raw) => SessionState::rehydrate(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => SessionState::default(),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "unreadable session slot, starting empty");
                SessionState::default()
            }
        }
    }

    fn save(&self, state: &SessionState) -> Result<(), StorageError> {
        let raw = state.to_json()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::{CartProduct, Price, ProductId, User};

    use super::*;

    fn sample_state() -> SessionState {
        let mut state = SessionState::default();
        state.login(User {
            name: "Noor".to_string(),
            email: "noor@example.com".to_string(),
        });
        state.add_to_cart(CartProduct {
            id: ProductId::new(30),
            title: "Wooden Bathroom Sink".to_string(),
            price: Price::from_cents(79_999).unwrap(),
            thumbnail: "sink.webp".to_string(),
        });
        state
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart_app_data.json"));
        assert_eq!(storage.load(), SessionState::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/slot.json"));
        let state = sample_state();

        storage.save(&state).unwrap();
        assert_eq!(storage.load(), state);
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("slot.json"));

        storage.save(&sample_state()).unwrap();
        storage.save(&SessionState::default()).unwrap();
        assert_eq!(storage.load(), SessionState::default());
    }

    #[test]
    fn test_corrupt_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.json");
        fs::write(&path, "{\"items\": [").unwrap();

        assert_eq!(JsonFileStorage::new(path).load(), SessionState::default());
    }

    #[test]
    fn test_directory_in_place_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let slot = dir.path().join("slot.json");
        fs::create_dir(&slot).unwrap();
        let storage = JsonFileStorage::new(slot);

        assert_eq!(storage.load(), SessionState::default());
        assert!(storage.save(&sample_state()).is_err());
    }
}
