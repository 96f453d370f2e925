//! YachtRow - discovery core for the YachtRow boat marketplace
//!
//! This library provides the swipe feed used by the marketplace front end:
//! a pure ranking and filtering pipeline over the listing catalog, a small
//! swipe state machine with a liked/disliked ledger, and a preference store
//! over a pluggable key-value backend.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use thiserror::Error;

use crate::config::{Settings, StorageBackend};
use crate::routes::AppState;
use crate::services::{Catalog, FileKvStore, FixtureData, FixtureError, KeyValueStore, KvError, MemoryKvStore, SessionManager};

// Re-export commonly used types
pub use crate::core::{compute_feed, InteractionLedger, SwipeMachine, SwipeState};
pub use crate::models::{BoatType, Listing, PreferenceSet, User};
pub use crate::services::PreferenceStore;

/// Errors that can stop the service from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Fixture error: {0}")]
    Fixtures(#[from] FixtureError),

    #[error("Storage error: {0}")]
    Storage(#[from] KvError),
}

/// Wire fixtures, key-value backend and session manager from settings
pub fn build_state(settings: &Settings) -> Result<AppState, StartupError> {
    let fixtures = match &settings.fixtures.path {
        Some(path) => FixtureData::load_from(path)?,
        None => FixtureData::builtin()?,
    };

    let store: Arc<dyn KeyValueStore> = match settings.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryKvStore::new()),
        StorageBackend::File => Arc::new(FileKvStore::open(&settings.storage.path)?),
    };

    let sessions = SessionManager::new(
        store,
        settings.storage.namespace.clone(),
        settings.sessions.max_sessions,
        settings.sessions.idle_ttl_secs,
    );

    Ok(AppState {
        catalog: Arc::new(Catalog::new(fixtures)),
        sessions: Arc::new(sessions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_with_defaults() {
        let state = build_state(&Settings::default()).unwrap();
        assert_eq!(state.catalog.listing_count(), 7);
        assert_eq!(state.sessions.active_sessions(), 0);
    }

    #[test]
    fn test_build_state_missing_fixture_file() {
        let mut settings = Settings::default();
        settings.fixtures.path = Some("/definitely/not/here.json".into());
        assert!(matches!(build_state(&settings), Err(StartupError::Fixtures(_))));
    }
}
