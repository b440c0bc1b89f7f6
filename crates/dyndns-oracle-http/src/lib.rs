// # HTTP Address Oracle
//
// This crate provides the HTTP-based public-address oracle for do-dyn-dns.
//
// ## Protocol
//
// `GET https://ipv{4|6}.<host>/raw` returns the caller's public address for
// that family as a plaintext body. The body is trimmed and parsed; a
// non-2xx response, an unparseable body, or an address of the wrong family
// is a failure for that lookup.
//
// The oracle makes one request per call and holds no state. Whether a
// failed lookup is fatal is the caller's decision (it is, for any enabled
// family).

use async_trait::async_trait;
use dyndns_core::traits::{AddressOracle, IpFamily};
use dyndns_core::{Error, Result};
use std::net::IpAddr;
use std::time::Duration;

/// Default oracle host; `ipv4.` / `ipv6.` subdomains select the family
pub const DEFAULT_ORACLE_HOST: &str = "myexternalip.com";

/// Client-side timeout so an unattended run cannot hang on a dead oracle
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based public-address oracle
pub struct HttpAddressOracle {
    host: String,
    client: reqwest::Client,
}

impl HttpAddressOracle {
    /// Create an oracle against the default host
    pub fn new() -> Self {
        Self::with_host(DEFAULT_ORACLE_HOST)
    }

    /// Create an oracle against a custom host
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            client: reqwest::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    fn lookup_url(&self, family: IpFamily) -> String {
        format!("https://ipv{}.{}/raw", family.version(), self.host)
    }
}

impl Default for HttpAddressOracle {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an oracle response body into an address of the expected family
fn parse_address(family: IpFamily, body: &str) -> Result<IpAddr> {
    let text = body.trim();

    let ip: IpAddr = text.parse().map_err(|_| {
        Error::oracle(format!(
            "oracle returned an unparseable {family} address: {text:?}"
        ))
    })?;

    if !family.matches(ip) {
        return Err(Error::oracle(format!(
            "oracle returned {ip}, expected an {family} address"
        )));
    }

    Ok(ip)
}

#[async_trait]
impl AddressOracle for HttpAddressOracle {
    async fn current(&self, family: IpFamily) -> Result<IpAddr> {
        let url = self.lookup_url(family);
        tracing::debug!("looking up {} address via {}", family, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::oracle(format!("{family} lookup request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::oracle(format!(
                "{family} lookup failed: HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::oracle(format!("failed to read {family} lookup response: {e}")))?;

        parse_address(family, &body)
    }
}
