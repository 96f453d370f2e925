use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::core::SwipeMachine;
use crate::services::kv::{KeyValueStore, KvError};
use crate::services::preferences::PreferenceStore;

/// Per-session swipe state plus the session's preference namespace
///
/// The swipe machines live in memory only and expire after sitting idle.
/// Preferences are persisted in the shared key-value store, namespaced by
/// session id, so they outlive the in-memory state the same way browser
/// local storage outlives a tab. Expiry never touches them; only `forget`
/// removes a session's keys.
pub struct SessionManager {
    machines: moka::future::Cache<String, Arc<Mutex<SwipeMachine>>>,
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        namespace: impl Into<String>,
        max_sessions: u64,
        idle_ttl_secs: u64,
    ) -> Self {
        let machines = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self {
            machines,
            store,
            namespace: namespace.into(),
        }
    }

    /// Swipe machine for `session_id`, created fresh on first use
    pub async fn machine(&self, session_id: &str) -> Arc<Mutex<SwipeMachine>> {
        self.machines
            .get_with(session_id.to_string(), async {
                tracing::debug!("Starting swipe session {}", session_id);
                Arc::new(Mutex::new(SwipeMachine::new()))
            })
            .await
    }

    /// Preference store scoped to `session_id`
    pub fn preferences(&self, session_id: &str) -> PreferenceStore {
        PreferenceStore::new(self.store.clone(), session_namespace(&self.namespace, session_id))
    }

    /// Drop the in-memory swipe state; persisted preferences are kept
    pub async fn end(&self, session_id: &str) {
        self.machines.invalidate(session_id).await;
    }

    /// Drop the swipe state and delete the session's persisted preferences
    pub async fn forget(&self, session_id: &str) -> Result<(), KvError> {
        self.end(session_id).await;
        self.preferences(session_id).clear()?;
        tracing::info!("Forgot session {}", session_id);
        Ok(())
    }

    pub fn active_sessions(&self) -> u64 {
        self.machines.entry_count()
    }
}

/// Key namespace for one session's preferences
pub fn session_namespace(base: &str, session_id: &str) -> String {
    format!("{}.{}", base, session_id)
}
