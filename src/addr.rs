//! Address value types
//!
//! [`MacAddress`] and [`IpInfo`] are plain `Copy` values shared by the
//! configuration, the event payloads and the state cache.

use core::net::Ipv4Addr;

use crate::constants::MAC_ADDR_LEN;

// =============================================================================
// MAC Address
// =============================================================================

/// Ethernet hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress([u8; MAC_ADDR_LEN]);

impl MacAddress {
    /// The all-zero address (not yet read from the driver).
    pub const UNSET: Self = Self([0; MAC_ADDR_LEN]);

    /// Create an address from its six octets
    pub const fn new(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }

    /// Raw octets
    pub const fn octets(&self) -> [u8; MAC_ADDR_LEN] {
        self.0
    }

    /// True for the all-zero address
    pub const fn is_unset(&self) -> bool {
        let mut i = 0;
        while i < MAC_ADDR_LEN {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// True if the locally-administered bit is set
    pub const fn is_local(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl From<[u8; MAC_ADDR_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }
}

impl core::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

// =============================================================================
// IP Info
// =============================================================================

/// IPv4 address triple: address, netmask, gateway.
///
/// Payload of an address-acquisition event and the static configuration
/// handed to the platform when DHCP is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpInfo {
    /// Interface address
    pub ip: Ipv4Addr,
    /// Subnet mask
    pub netmask: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
}

impl IpInfo {
    /// All-zero triple
    pub const UNSPECIFIED: Self = Self::new(
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::UNSPECIFIED,
    );

    /// Create a new triple
    pub const fn new(ip: Ipv4Addr, netmask: Ipv4Addr, gateway: Ipv4Addr) -> Self {
        Self {
            ip,
            netmask,
            gateway,
        }
    }

    /// Create a triple from host-byte-order integers (`0xC0A8_0132` is 192.168.1.50)
    pub const fn from_host_order(ip: u32, netmask: u32, gateway: u32) -> Self {
        Self::new(
            Ipv4Addr::from_bits(ip),
            Ipv4Addr::from_bits(netmask),
            Ipv4Addr::from_bits(gateway),
        )
    }

    /// Prefix length of the netmask, or `None` if the mask is not contiguous
    pub const fn prefix_len(&self) -> Option<u8> {
        let mask = self.netmask.to_bits();
        let ones = mask.leading_ones();
        let rest = match mask.checked_shl(ones) {
            Some(rest) => rest,
            None => 0,
        };
        if rest == 0 { Some(ones as u8) } else { None }
    }
}

impl Default for IpInfo {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IpInfo {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d] = self.ip.octets();
        let [m0, m1, m2, m3] = self.netmask.octets();
        let [g0, g1, g2, g3] = self.gateway.octets();
        defmt::write!(
            f,
            "ip {}.{}.{}.{} mask {}.{}.{}.{} gw {}.{}.{}.{}",
            a, b, c, d, m0, m1, m2, m3, g0, g1, g2, g3
        );
    }
}
