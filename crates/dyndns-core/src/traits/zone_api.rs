// # Zone API Trait
//
// Defines the interface for mutating records in a remote authoritative DNS
// zone. The remote API offers independent list/delete/create operations
// only: no batch calls, no atomic replace. The ordering that makes those
// primitives safe to combine lives in `crate::sync`, not here.
//
// ## Implementations
//
// - DigitalOcean Domains API: `dyndns-provider-digitalocean` crate

use async_trait::async_trait;
use std::net::IpAddr;

use super::oracle::IpFamily;

/// A record as enumerated from the remote zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    /// Provider-assigned record identifier, used to key deletions
    pub id: u64,
    /// Record type string as reported by the provider (`"A"`, `"MX"`, ...)
    pub record_type: String,
    /// Record name (`"@"`, `"*"`, `"www"`, ...)
    pub name: String,
    /// Record value
    pub data: String,
}

impl RemoteRecord {
    /// Whether this is an address record (type `A` or `AAAA`)
    ///
    /// The synchronizer deletes every address record in the zone regardless
    /// of name; anything else is left untouched.
    pub fn is_address_record(&self) -> bool {
        self.record_type == "A" || self.record_type == "AAAA"
    }
}

/// One entry of a target record set computed by the reconciliation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpec {
    /// Address family, which determines the record type
    pub family: IpFamily,
    /// Record name: `"@"` (apex) or `"*"` (wildcard)
    pub name: String,
    /// The address to publish
    pub value: IpAddr,
    /// TTL in seconds for the created record
    pub ttl: u32,
}

impl RecordSpec {
    /// The DNS record type string for this entry
    pub fn record_type(&self) -> &'static str {
        self.family.record_type()
    }
}

/// Trait for remote zone API implementations
///
/// Implementations are single-shot API wrappers: one method call is one
/// HTTP request. They hold no state, make no retry or ordering decisions,
/// and never touch the local state store.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// List the records currently present in the zone
    ///
    /// Single-page semantics: at most `page_size` records are returned and
    /// there is no continuation. Callers are responsible for surfacing the
    /// truncation risk on zones larger than one page.
    async fn list_records(
        &self,
        zone: &str,
        page_size: u32,
    ) -> Result<Vec<RemoteRecord>, crate::Error>;

    /// Delete a record by its provider-assigned identifier
    async fn delete_record(&self, zone: &str, record_id: u64) -> Result<(), crate::Error>;

    /// Create a record from the given spec
    async fn create_record(&self, zone: &str, record: &RecordSpec) -> Result<(), crate::Error>;
}
