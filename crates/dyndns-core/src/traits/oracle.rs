// # Address Oracle Trait
//
// Defines the interface for looking up the caller's current public IP
// address, one family at a time.
//
// ## Implementations
//
// - HTTP-based: `dyndns-oracle-http` crate
// - Test doubles in `tests/common`

use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;

/// Address family of a managed DNS record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    /// IPv4, published as `A` records
    V4,
    /// IPv6, published as `AAAA` records
    V6,
}

impl IpFamily {
    /// The DNS record type this family is published as
    pub fn record_type(self) -> &'static str {
        match self {
            IpFamily::V4 => "A",
            IpFamily::V6 => "AAAA",
        }
    }

    /// Numeric IP version (4 or 6)
    pub fn version(self) -> u8 {
        match self {
            IpFamily::V4 => 4,
            IpFamily::V6 => 6,
        }
    }

    /// Whether `ip` belongs to this family
    pub fn matches(self, ip: IpAddr) -> bool {
        match self {
            IpFamily::V4 => ip.is_ipv4(),
            IpFamily::V6 => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFamily::V4 => write!(f, "IPv4"),
            IpFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// Trait for public-address oracle implementations
///
/// The oracle is an external dependency (typically an HTTP service) and is
/// treated as a replaceable capability. A failed lookup for an enabled
/// family is fatal for the run, so implementations must report failures
/// rather than guessing.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait AddressOracle: Send + Sync {
    /// Get the caller's current public address for the given family
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: an address of the requested family
    /// - `Err(Error)`: the lookup failed or the response was unparseable
    async fn current(&self, family: IpFamily) -> Result<IpAddr, crate::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_types_match_families() {
        assert_eq!(IpFamily::V4.record_type(), "A");
        assert_eq!(IpFamily::V6.record_type(), "AAAA");
        assert_eq!(IpFamily::V4.version(), 4);
        assert_eq!(IpFamily::V6.version(), 6);
    }

    #[test]
    fn family_matches_addresses() {
        let v4: IpAddr = "1.2.3.4".parse().unwrap();
        let v6: IpAddr = "2001:db8::1".parse().unwrap();

        assert!(IpFamily::V4.matches(v4));
        assert!(!IpFamily::V4.matches(v6));
        assert!(IpFamily::V6.matches(v6));
        assert!(!IpFamily::V6.matches(v4));
    }
}
