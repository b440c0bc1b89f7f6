// # State Store Trait
//
// Defines the interface for persisting `SyncState` between runs.
//
// ## Purpose
//
// The state store is what makes unattended, repeated runs idempotent: the
// last applied addresses are compared against fresh observations to decide
// whether the remote zone needs to change at all.
//
// The store is a local cache, not a record of truth. The remote zone is the
// source of truth for actual DNS state, which is why `load()` degrades
// permissively instead of failing hard.
//
// ## Implementations
//
// - File-based (JSON): `crate::state::FileStateStore`
// - In-memory: `crate::state::MemoryStateStore` (tests, embedding)

use async_trait::async_trait;

use crate::state::SyncState;

/// Trait for state store implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Known Limitation
///
/// The load-then-save pattern is vulnerable to a lost update if two
/// invocations overlap. Invocation cadence is expected to be sparse
/// (cron-like), so no locking is provided.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted state
    ///
    /// Missing state is not an error: the first run starts from the zero
    /// value. Corrupt or partially unreadable state degrades to defaults
    /// (with a warning) rather than aborting the run.
    async fn load(&self) -> Result<SyncState, crate::Error>;

    /// Persist the state, refreshing its `last_run` timestamp
    ///
    /// Called exactly once at the end of a successful run, including the
    /// "no change needed" case.
    async fn save(&self, state: &SyncState) -> Result<(), crate::Error>;
}
