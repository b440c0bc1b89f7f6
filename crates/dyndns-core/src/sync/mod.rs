//! Zone synchronizer
//!
//! Applies a target record set to the remote zone. The remote API offers
//! independent list/delete/create operations only, so the synchronizer runs
//! two explicit passes instead of computing a row-level diff:
//!
//! 1. List one page of existing records.
//! 2. Delete every listed `A`/`AAAA` record, including ones that happened
//!    to already be correct. The API has no "delete if stale" semantics.
//! 3. Create every target record.
//!
//! There is no rollback. A create failure after the delete pass leaves the
//! zone with fewer records than before; that condition is surfaced loudly
//! and the caller must not advance local state, so the next scheduled run
//! retries the full reconciliation.

use tracing::{error, info, warn};

use crate::error::Result;
use crate::traits::{RecordSpec, ZoneApi};

/// Default page size for the record listing call
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Counts of remote mutations performed by one apply pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Address records deleted
    pub deleted: usize,
    /// Target records created
    pub created: usize,
}

/// Applies a target record set through a [`ZoneApi`]
///
/// The synchronizer is pure with respect to local state: it only touches
/// the remote zone. Persisting the outcome is the orchestrator's job.
pub struct ZoneSynchronizer<'a> {
    api: &'a dyn ZoneApi,
    page_size: u32,
}

impl<'a> ZoneSynchronizer<'a> {
    /// Create a synchronizer with the default page size
    pub fn new(api: &'a dyn ZoneApi) -> Self {
        Self::with_page_size(api, DEFAULT_PAGE_SIZE)
    }

    /// Create a synchronizer with an explicit page size
    pub fn with_page_size(api: &'a dyn ZoneApi, page_size: u32) -> Self {
        Self { api, page_size }
    }

    /// Make the zone's address records match `target`
    ///
    /// Deletes are attempted before any create; the first failure of either
    /// pass aborts the run immediately.
    pub async fn apply(&self, zone: &str, target: &[RecordSpec]) -> Result<SyncReport> {
        let records = self.api.list_records(zone, self.page_size).await?;

        // Single-page listing is a known limitation; make the truncation
        // risk visible instead of silent.
        if records.len() >= self.page_size as usize {
            warn!(
                "zone {} returned a full page of {} records; records beyond \
                 the first page are not enumerated and will not be cleaned up",
                zone, self.page_size
            );
        }

        let mut report = SyncReport::default();

        for record in records.iter().filter(|r| r.is_address_record()) {
            info!(
                "deleting {} record {} {} (id {})",
                record.record_type, record.name, record.data, record.id
            );
            if let Err(e) = self.api.delete_record(zone, record.id).await {
                error!(
                    "delete failed for record {} in zone {}; aborting before \
                     the create pass",
                    record.id, zone
                );
                return Err(e);
            }
            report.deleted += 1;
        }

        for spec in target {
            info!(
                "creating {} record {} -> {} (ttl {})",
                spec.record_type(),
                spec.name,
                spec.value,
                spec.ttl
            );
            if let Err(e) = self.api.create_record(zone, spec).await {
                error!(
                    "create failed mid-sync; zone {} is left without its \
                     previous address records and must be re-synced",
                    zone
                );
                return Err(e);
            }
            report.created += 1;
        }

        Ok(report)
    }
}
