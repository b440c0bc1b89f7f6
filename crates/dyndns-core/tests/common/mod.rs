//! Test doubles and common utilities for synchronizer contract tests
//!
//! `MockZoneApi` records every call it receives in order, so tests can
//! assert protocol-level properties (delete-before-create, abort on first
//! failure) rather than just final outcomes.

use dyndns_core::error::{Error, Result};
use dyndns_core::traits::{RecordSpec, RemoteRecord, ZoneApi};
use std::sync::{Arc, Mutex};

/// One recorded zone API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneOp {
    List {
        zone: String,
        page_size: u32,
    },
    Delete {
        zone: String,
        record_id: u64,
    },
    Create {
        zone: String,
        record_type: String,
        name: String,
        data: String,
        ttl: u32,
    },
}

impl ZoneOp {
    pub fn is_delete(&self) -> bool {
        matches!(self, ZoneOp::Delete { .. })
    }

    pub fn is_create(&self) -> bool {
        matches!(self, ZoneOp::Create { .. })
    }
}

/// A mock ZoneApi that serves a fixed record listing and records all calls
pub struct MockZoneApi {
    records: Vec<RemoteRecord>,
    ops: Arc<Mutex<Vec<ZoneOp>>>,
    fail_deletes: bool,
    fail_creates: bool,
}

impl MockZoneApi {
    /// Create a mock serving the given listing
    pub fn new(records: Vec<RemoteRecord>) -> Self {
        Self {
            records,
            ops: Arc::new(Mutex::new(Vec::new())),
            fail_deletes: false,
            fail_creates: false,
        }
    }

    /// Make every delete_record() call fail
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Make every create_record() call fail
    pub fn failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    /// All calls received so far, in order
    pub fn ops(&self) -> Vec<ZoneOp> {
        self.ops.lock().unwrap().clone()
    }
}

/// Convenience constructor for listing fixtures
pub fn remote_record(id: u64, record_type: &str, name: &str, data: &str) -> RemoteRecord {
    RemoteRecord {
        id,
        record_type: record_type.to_string(),
        name: name.to_string(),
        data: data.to_string(),
    }
}

#[async_trait::async_trait]
impl ZoneApi for MockZoneApi {
    async fn list_records(&self, zone: &str, page_size: u32) -> Result<Vec<RemoteRecord>> {
        self.ops.lock().unwrap().push(ZoneOp::List {
            zone: zone.to_string(),
            page_size,
        });
        Ok(self.records.clone())
    }

    async fn delete_record(&self, zone: &str, record_id: u64) -> Result<()> {
        self.ops.lock().unwrap().push(ZoneOp::Delete {
            zone: zone.to_string(),
            record_id,
        });
        if self.fail_deletes {
            return Err(Error::zone_api(format!(
                "injected delete failure for record {record_id}"
            )));
        }
        Ok(())
    }

    async fn create_record(&self, zone: &str, record: &RecordSpec) -> Result<()> {
        self.ops.lock().unwrap().push(ZoneOp::Create {
            zone: zone.to_string(),
            record_type: record.record_type().to_string(),
            name: record.name.clone(),
            data: record.value.to_string(),
            ttl: record.ttl,
        });
        if self.fail_creates {
            return Err(Error::zone_api("injected create failure"));
        }
        Ok(())
    }
}
