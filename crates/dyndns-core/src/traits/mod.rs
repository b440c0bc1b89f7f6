//! Core traits for the zone synchronizer
//!
//! This module defines the abstract interfaces the reconciliation run is
//! wired together from.
//!
//! - [`AddressOracle`]: report the caller's current public IP address
//! - [`ZoneApi`]: list/delete/create records in the remote authoritative zone
//! - [`StateStore`]: durable record of the last applied addresses

pub mod oracle;
pub mod state_store;
pub mod zone_api;

pub use oracle::{AddressOracle, IpFamily};
pub use state_store::StateStore;
pub use zone_api::{RecordSpec, RemoteRecord, ZoneApi};
