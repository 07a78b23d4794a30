//! CIDR prefix handling.
//!
//! Prefixes are interpreted non-strictly: host bits may be set, `10.0.0.7/24`
//! counts the same addresses as `10.0.0.0/24`.

use ipnetwork::IpNetwork;
use std::error::Error;
use std::str::FromStr;

/// Number of address bits for IPv4.
pub const IPV4_BITS: u8 = 32;
/// Number of address bits for IPv6.
pub const IPV6_BITS: u8 = 128;

/// Number of addresses in a block of `prefix_len` within an address family of
/// `address_bits`, i.e. `2^(address_bits - prefix_len)`.
///
/// Fails when the prefix is longer than the family allows, or when the count
/// does not fit in a `u128` (an IPv6 `/0`).
///
/// # Examples
/// ```
/// use gcp_ip_utilization::models::num_addresses;
/// assert_eq!(num_addresses(32, 24).unwrap(), 256);
/// assert_eq!(num_addresses(128, 64).unwrap(), 1u128 << 64);
/// ```
pub fn num_addresses(address_bits: u8, prefix_len: u8) -> Result<u128, Box<dyn Error>> {
    if prefix_len > address_bits {
        return Err(format!("Prefix length /{prefix_len} too long for {address_bits} bit address").into());
    }
    let host_bits = u32::from(address_bits - prefix_len);
    1u128
        .checked_shl(host_bits)
        .ok_or_else(|| format!("Address count 2^{host_bits} does not fit in 128 bits").into())
}

/// A parsed CIDR block of either address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: IpNetwork,
}

impl Cidr {
    /// Parse a CIDR string such as `10.0.0.0/24` or `2600:1900::/64`.
    ///
    /// An address without a prefix length is a single host block.
    pub fn new(prefix: &str) -> Result<Cidr, Box<dyn Error>> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err("Empty CIDR prefix".into());
        }
        let network =
            IpNetwork::from_str(prefix).map_err(|e| format!("Invalid CIDR '{prefix}': {e}"))?;
        Ok(Cidr { network })
    }

    pub fn prefix_len(&self) -> u8 {
        self.network.prefix()
    }

    pub fn address_bits(&self) -> u8 {
        match self.network {
            IpNetwork::V4(_) => IPV4_BITS,
            IpNetwork::V6(_) => IPV6_BITS,
        }
    }

    /// Total addresses covered by the block.
    pub fn total_ips(&self) -> Result<u128, Box<dyn Error>> {
        num_addresses(self.address_bits(), self.prefix_len())
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.network)
    }
}
