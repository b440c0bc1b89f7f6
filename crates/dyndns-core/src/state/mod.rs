//! Persisted synchronizer state
//!
//! [`SyncState`] is the JSON document written to the per-user config file
//! (`do-dyn-dns.json`). It is loaded once at the start of a run, mutated in
//! memory, and written back exactly once at the end of a successful run.
//!
//! Decoding is deliberately permissive: every field has a default, and the
//! address fields tolerate the empty/garbage values older versions of the
//! tool wrote for "no address". The remote zone is the source of truth, so
//! a broken local file costs one redundant sync, nothing more.

pub mod file;
pub mod memory;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::IpFamily;

/// Timestamp format for the `lastRun` field, e.g.
/// `Mon Jan  2 15:04:05 +0700 2006`.
pub const LAST_RUN_FORMAT: &str = "%a %b %e %H:%M:%S %z %Y";

/// Which address families are managed
///
/// User-set at configuration time and immutable afterwards. If both flags
/// are off the run performs no work; the core does not treat that as an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTypes {
    /// Manage `A` records (IPv4)
    #[serde(rename = "A", default)]
    pub a: bool,
    /// Manage `AAAA` records (IPv6)
    #[serde(rename = "AAAA", default)]
    pub aaaa: bool,
}

impl RecordTypes {
    /// Whether the given family is managed
    pub fn enabled(&self, family: IpFamily) -> bool {
        match family {
            IpFamily::V4 => self.a,
            IpFamily::V6 => self.aaaa,
        }
    }

    /// The enabled families, in fixed A-before-AAAA order
    pub fn enabled_families(&self) -> impl Iterator<Item = IpFamily> {
        [(IpFamily::V4, self.a), (IpFamily::V6, self.aaaa)]
            .into_iter()
            .filter_map(|(family, enabled)| enabled.then_some(family))
    }
}

/// Persisted synchronizer state
///
/// Field names mirror the on-disk JSON schema (`accessToken`, `domain`,
/// `ipv4`, `ipv6`, `ttl`, `recordTypes`, `lastRun`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncState {
    /// Opaque API access token for the zone provider
    pub access_token: String,

    /// The authoritative zone to manage
    pub domain: String,

    /// Last applied IPv4 address, absent if never applied or IPv4 disabled
    #[serde(deserialize_with = "lenient_ip", skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Addr>,

    /// Last applied IPv6 address, absent if never applied or IPv6 disabled
    #[serde(deserialize_with = "lenient_ip", skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Ipv6Addr>,

    /// TTL in seconds applied to newly created records
    pub ttl: u32,

    /// Which address families are managed
    pub record_types: RecordTypes,

    /// Human-readable timestamp of the last completed run
    pub last_run: String,
}

impl SyncState {
    /// The last applied address for the given family
    pub fn last_observed(&self, family: IpFamily) -> Option<IpAddr> {
        match family {
            IpFamily::V4 => self.ipv4.map(IpAddr::V4),
            IpFamily::V6 => self.ipv6.map(IpAddr::V6),
        }
    }

    /// Refresh `last_run` to the current local time
    pub fn stamp_last_run(&mut self) {
        self.last_run = chrono::Local::now().format(LAST_RUN_FORMAT).to_string();
    }
}

/// Permissive decoder for optional address fields.
///
/// Absent, null, empty, and unparseable values all load as `None`. Older
/// versions of the tool stored `""` (and in one buggy release, a stringified
/// nil placeholder) for "no address"; those files must keep loading.
fn lenient_ip<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}
