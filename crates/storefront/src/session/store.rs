//! The session store context object.

use std::fmt;
use std::sync::Arc;

use cartwheel_core::{SessionAction, SessionState, SessionStorage};
use tracing::{debug, info, warn};

/// Shared handle used by HTTP handlers. The mutex makes every
/// read-modify-persist a single writer step.
pub type SharedSession = Arc<tokio::sync::Mutex<SessionStore>>;

/// Holds the live [`SessionState`] and persists it after every action.
///
/// Consumers receive a `SessionStore` (or a [`SharedSession`]) explicitly;
/// there is no global instance.
pub struct SessionStore {
    state: SessionState,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Rehydrate from `storage`, falling back to an empty session.
    pub fn open(storage: impl SessionStorage + 'static) -> Self {
        let state = storage.load();
        info!(
            items = state.items().len(),
            wishlist = state.wishlist().len(),
            logged_in = state.is_logged_in(),
            "Session rehydrated"
        );
        Self {
            state,
            storage: Box::new(storage),
        }
    }

    /// Wrap this store for sharing across handlers.
    #[must_use]
    pub fn shared(self) -> SharedSession {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply `action`, persist the full state, and return it.
    ///
    /// A failed write is logged and otherwise ignored: the in-memory state
    /// keeps the change and the next successful save catches the slot up.
    pub fn dispatch(&mut self, action: SessionAction) -> &SessionState {
        let name = action.name();
        self.state.apply(action);
        debug!(action = name, "Session action applied");

        if let Err(e) = self.storage.save(&self.state) {
            warn!(action = name, error = %e, "Failed to persist session");
        }
        &self.state
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("storage", &"<dyn SessionStorage>")
            .finish()
    }
}
