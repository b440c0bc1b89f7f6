// # DigitalOcean Zone Backend
//
// This crate implements the `ZoneApi` trait against the DigitalOcean
// Domains API v2.
//
// The client is a thin single-shot wrapper: one trait method call is one
// HTTP request, errors are propagated to the caller, and no ordering or
// retry decisions are made here (those belong to the synchronizer and the
// external scheduler respectively).
//
// ## Security Requirements
//
// - The API token NEVER appears in logs
// - The `Debug` implementation redacts the token
//
// ## API Reference
//
// - DigitalOcean API v2: https://docs.digitalocean.com/reference/api/
// - List records: GET `/v2/domains/{zone}/records?per_page={n}`
// - Delete record: DELETE `/v2/domains/{zone}/records/{id}` (204)
// - Create record: POST `/v2/domains/{zone}/records`

use async_trait::async_trait;
use dyndns_core::traits::{RecordSpec, RemoteRecord, ZoneApi};
use dyndns_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// DigitalOcean API base URL
const DO_API_BASE: &str = "https://api.digitalocean.com/v2";

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// DigitalOcean Domains API client
pub struct DigitalOceanApi {
    /// Personal access token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL; overridable for tests
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for DigitalOceanApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanApi")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Listing response envelope
#[derive(Debug, Deserialize)]
struct RecordsResponse {
    domain_records: Vec<DomainRecord>,
}

/// One record as returned by the API
#[derive(Debug, Deserialize)]
struct DomainRecord {
    id: u64,
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    data: String,
}

impl From<DomainRecord> for RemoteRecord {
    fn from(record: DomainRecord) -> Self {
        RemoteRecord {
            id: record.id,
            record_type: record.record_type,
            name: record.name,
            data: record.data,
        }
    }
}

impl DigitalOceanApi {
    /// Create a client for the public DigitalOcean API
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_token, DO_API_BASE)
    }

    /// Create a client against a custom base URL (tests, mock servers)
    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("DigitalOcean access token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_token,
            base_url: base_url.into(),
            client,
        })
    }

    fn records_url(&self, zone: &str) -> String {
        format!("{}/domains/{}/records", self.base_url, zone)
    }

    /// Map a non-success response to a typed error, consuming the body
    async fn api_error(action: String, response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error response".to_string());

        match status.as_u16() {
            401 | 403 => Error::auth(format!(
                "{action}: invalid or unauthorized access token (HTTP {status})"
            )),
            404 => Error::not_found(format!("{action}: HTTP {status} - {body}")),
            429 => Error::rate_limited(format!("{action}: HTTP {status}")),
            500..=599 => Error::zone_api(format!(
                "{action}: DigitalOcean server error (HTTP {status}) - {body}"
            )),
            _ => Error::zone_api(format!("{action}: HTTP {status} - {body}")),
        }
    }
}

#[async_trait]
impl ZoneApi for DigitalOceanApi {
    async fn list_records(&self, zone: &str, page_size: u32) -> Result<Vec<RemoteRecord>> {
        let url = format!("{}?per_page={}", self.records_url(zone), page_size);
        tracing::debug!("listing records for zone {}", zone);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::zone_api(format!("record listing request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(
                format!("listing records for zone {zone} (does it exist under this token?)"),
                response,
            )
            .await);
        }

        let listing: RecordsResponse = response
            .json()
            .await
            .map_err(|e| Error::zone_api(format!("failed to parse record listing: {e}")))?;

        Ok(listing
            .domain_records
            .into_iter()
            .map(RemoteRecord::from)
            .collect())
    }

    async fn delete_record(&self, zone: &str, record_id: u64) -> Result<()> {
        let url = format!("{}/{}", self.records_url(zone), record_id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::zone_api(format!("record delete request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(
                format!("deleting record {record_id} in zone {zone}"),
                response,
            )
            .await);
        }

        Ok(())
    }

    async fn create_record(&self, zone: &str, record: &RecordSpec) -> Result<()> {
        let payload = serde_json::json!({
            "type": record.record_type(),
            "name": record.name,
            "data": record.value.to_string(),
            "ttl": record.ttl,
        });

        let response = self
            .client
            .post(&self.records_url(zone))
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::zone_api(format!("record create request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(
                format!(
                    "creating {} record {} in zone {zone}",
                    record.record_type(),
                    record.name
                ),
                response,
            )
            .await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyndns_core::traits::IpFamily;

    #[test]
    fn empty_token_is_rejected() {
        assert!(matches!(DigitalOceanApi::new(""), Err(Error::Config(_))));
    }

    #[test]
    fn debug_redacts_the_token() {
        let api = DigitalOceanApi::new("super-secret-token").unwrap();
        let debug = format!("{:?}", api);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("<REDACTED>"));
    }

    #[test]
    fn parses_record_listing() {
        let json = r#"{
            "domain_records": [
                {"id": 101, "type": "A", "name": "@", "data": "1.2.3.4", "ttl": 1800},
                {"id": 102, "type": "MX", "name": "@", "data": "mail.example.com.", "priority": 10, "ttl": 1800}
            ],
            "links": {},
            "meta": {"total": 2}
        }"#;

        let listing: RecordsResponse = serde_json::from_str(json).unwrap();
        let records: Vec<RemoteRecord> = listing
            .domain_records
            .into_iter()
            .map(RemoteRecord::from)
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 101);
        assert_eq!(records[0].record_type, "A");
        assert_eq!(records[0].name, "@");
        assert_eq!(records[0].data, "1.2.3.4");
        assert!(records[0].is_address_record());
        assert!(!records[1].is_address_record());
    }

    #[test]
    fn create_payload_shape() {
        let spec = RecordSpec {
            family: IpFamily::V4,
            name: "*".to_string(),
            value: "5.6.7.8".parse().unwrap(),
            ttl: 1800,
        };
        let payload = serde_json::json!({
            "type": spec.record_type(),
            "name": spec.name,
            "data": spec.value.to_string(),
            "ttl": spec.ttl,
        });

        assert_eq!(payload["type"], "A");
        assert_eq!(payload["name"], "*");
        assert_eq!(payload["data"], "5.6.7.8");
        assert_eq!(payload["ttl"], 1800);
    }

    #[test]
    fn record_urls() {
        let api = DigitalOceanApi::new("tok").unwrap();
        assert_eq!(
            api.records_url("example.com"),
            "https://api.digitalocean.com/v2/domains/example.com/records"
        );
    }
}
