// # File State Store
//
// File-based implementation of StateStore.
//
// ## Durability
//
// - Atomic writes: new state is written to a temporary file, then renamed
//   over the real one, so a reader never sees a half-written document
// - Corrupt or unparseable content degrades to the zero state with a
//   warning; the remote zone is the source of truth, so losing this cache
//   only costs one redundant sync
//
// ## File Format
//
// ```json
// {
//   "accessToken": "...",
//   "domain": "example.com",
//   "ipv4": "1.2.3.4",
//   "ttl": 1800,
//   "recordTypes": { "A": true, "AAAA": false },
//   "lastRun": "Mon Jan  2 15:04:05 +0000 2006"
// }
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::state::SyncState;
use crate::traits::StateStore;

/// File-based state store
///
/// The caller chooses the path; by convention the binary places the file in
/// the per-user config directory under the name `do-dyn-dns.json`.
///
/// # Example
///
/// ```rust,no_run
/// use dyndns_core::{FileStateStore, StateStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStateStore::new("/home/me/.config/do-dyn-dns.json");
///
///     let mut state = store.load().await?;
///     state.domain = "example.com".to_string();
///     store.save(&state).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Create a store backed by the given path
    ///
    /// The file (and its parent directory) need not exist yet; both are
    /// created on the first save.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temporary file used for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    /// Write `state` to disk atomically (temp file, then rename)
    async fn write_state(&self, state: &SyncState) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::state_store(format!(
                        "failed to create state directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| Error::state_store(format!("failed to serialize state: {}", e)))?;

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::state_store(format!(
                    "failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::state_store(format!(
                    "failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::state_store(format!(
                    "failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::state_store(format!(
                "failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("state written to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<SyncState, Error> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("state file {} does not exist, first run", self.path.display());
                return Ok(SyncState::default());
            }
            Err(e) => {
                return Err(Error::state_store(format!(
                    "failed to read state file {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(
                    "state file {} is unparseable ({}); starting from defaults",
                    self.path.display(),
                    e
                );
                Ok(SyncState::default())
            }
        }
    }

    async fn save(&self, state: &SyncState) -> Result<(), Error> {
        let mut state = state.clone();
        state.stamp_last_run();
        self.write_state(&state).await
    }
}
