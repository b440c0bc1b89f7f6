// # Memory State Store
//
// In-memory implementation of StateStore.
//
// ## When to Use
//
// - Tests (inspect what a run persisted without touching disk)
// - Embedding the library where persistence is handled elsewhere
//
// All state is lost on drop; the first run after a restart treats every
// address as new and re-applies the zone.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::state::SyncState;
use crate::traits::StateStore;

/// In-memory state store
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<SyncState>>,
}

impl MemoryStateStore {
    /// Create a store holding the zero state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with the given state
    pub fn with_state(state: SyncState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Current contents of the store
    pub async fn snapshot(&self) -> SyncState {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<SyncState, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, state: &SyncState) -> Result<(), Error> {
        let mut state = state.clone();
        state.stamp_last_run();
        *self.inner.write().await = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryStateStore::new();

        let state = SyncState {
            domain: "example.com".to_string(),
            ipv4: Some("1.2.3.4".parse().unwrap()),
            ..Default::default()
        };
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.domain, "example.com");
        assert_eq!(loaded.ipv4, state.ipv4);
        assert!(!loaded.last_run.is_empty());
    }

    #[tokio::test]
    async fn seeded_store_loads_seed() {
        let seed = SyncState {
            access_token: "tok".to_string(),
            ..Default::default()
        };
        let store = MemoryStateStore::with_state(seed.clone());
        assert_eq!(store.load().await.unwrap(), seed);
    }
}
