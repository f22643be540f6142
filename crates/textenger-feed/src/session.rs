use textenger_core::models::session::SessionInfo;
use textenger_core::storage_keys;
use textenger_storage::kv::KeyValueStore;

use crate::seed::SessionSeed;

/// Seed bookkeeping over a session-scoped store.
///
/// Storage is best effort. When the store fails, a fresh unpersisted seed is
/// handed out and a warning is logged; nothing here returns an error.
pub struct SessionSeeds<S> {
    store: S,
}

impl<S: KeyValueStore> SessionSeeds<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the stored seed, creating and persisting one if none exists.
    pub fn get_or_create_session_seed(&self) -> SessionSeed {
        match self.store.get(storage_keys::SESSION_SEED) {
            Ok(Some(existing)) if !existing.is_empty() => SessionSeed::from(existing),
            Ok(_) => {
                let seed = SessionSeed::generate();
                if let Err(e) = self.store.set(storage_keys::SESSION_SEED, seed.as_str()) {
                    tracing::warn!(error = %e, "failed to persist session seed");
                } else {
                    tracing::debug!(seed = %seed.preview(), "new session seed");
                }
                seed
            }
            Err(e) => {
                tracing::warn!(error = %e, "session storage unavailable, using fallback seed");
                SessionSeed::generate()
            }
        }
    }

    /// True when no seed exists yet. Unreadable storage counts as fresh.
    pub fn is_fresh_session(&self) -> bool {
        match self.store.get(storage_keys::SESSION_SEED) {
            Ok(seed) => seed.is_none_or(|s| s.is_empty()),
            Err(_) => true,
        }
    }

    pub fn clear_session_seed(&self) {
        if let Err(e) = self.store.remove(storage_keys::SESSION_SEED) {
            tracing::debug!(error = %e, "could not clear session seed");
        }
    }

    /// Drop the seed so the next read draws a new order.
    pub fn force_new_shuffle(&self) {
        match self.store.remove(storage_keys::SESSION_SEED) {
            Ok(()) => tracing::info!("forced new shuffle, seed cleared"),
            Err(e) => tracing::warn!(error = %e, "could not clear session seed"),
        }
    }

    /// Wipe the whole session store, as closing the app would.
    pub fn simulate_app_closure(&self) {
        match self.store.clear() {
            Ok(()) => tracing::info!("app closure simulated, session data cleared"),
            Err(e) => tracing::warn!(error = %e, "could not clear session storage"),
        }
    }

    pub fn session_info(&self) -> SessionInfo {
        match self.store.get(storage_keys::SESSION_SEED) {
            Ok(Some(raw)) if !raw.is_empty() => {
                let seed = SessionSeed::from(raw);
                SessionInfo {
                    has_active_seed: true,
                    session_start_time: seed.started_at(),
                    seed_preview: Some(seed.preview()),
                }
            }
            _ => SessionInfo::default(),
        }
    }
}
