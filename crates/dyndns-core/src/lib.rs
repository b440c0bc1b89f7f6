//! Core library for `do-dyn-dns`.
//!
//! `do-dyn-dns` keeps a single DNS zone's address records (the apex `@` and
//! the wildcard `*`) pointed at the machine's current public IP address.
//! It is meant to run from a scheduler such as cron: every invocation is one
//! complete, independent reconciliation run.
//!
//! ## Architecture
//!
//! ```text
//! StateStore ──► reconcile::evaluate ◄── AddressOracle (per enabled family)
//!                        │
//!                 [change detected]
//!                        ▼
//!               ZoneSynchronizer ──► ZoneApi (list / delete / create)
//!                        │
//!                        ▼
//!        StateStore (observed addresses + fresh timestamp)
//! ```
//!
//! - [`AddressOracle`]: reports the caller's current public IP per family
//! - [`ZoneApi`]: list/delete/create records in the remote zone
//! - [`StateStore`]: durable record of the last applied addresses
//! - [`reconcile`]: decides whether a sync is needed and computes the
//!   target record set
//! - [`sync`]: applies a target record set via a delete pass then a create
//!   pass (the remote API has no atomic replace)
//!
//! Local state is a convenience cache, not a record of truth: the remote
//! zone always wins, which is why corrupt state degrades to defaults and
//! why a failed sync must never advance the stored addresses.

pub mod error;
pub mod reconcile;
pub mod state;
pub mod sync;
pub mod traits;

pub use error::{Error, Result};
pub use reconcile::{ObservedAddresses, SyncPlan, evaluate};
pub use state::{FileStateStore, MemoryStateStore, RecordTypes, SyncState};
pub use sync::{DEFAULT_PAGE_SIZE, SyncReport, ZoneSynchronizer};
pub use traits::{AddressOracle, IpFamily, RecordSpec, RemoteRecord, StateStore, ZoneApi};
