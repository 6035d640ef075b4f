//! External Stack Integrations
//!
//! This module provides integrations with external network stacks:
//!
//! - **smoltcp** (`smoltcp`): Bridges between smoltcp and the interface types
//!   - Hardware address conversion for `smoltcp::iface::Config`
//!   - DHCPv4 socket events forwarded as [`IpEvent`](crate::IpEvent)s
//!   - Address triple to `Ipv4Cidr` conversion
//!   - Requires `smoltcp` feature
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_eth::integration::smoltcp::{ethernet_address, forward_dhcp_event};
//!
//! let config = Config::new(ethernet_address(eth.mac_address()).into());
//!
//! // In the poll loop:
//! let dhcp = sockets.get_mut::<dhcpv4::Socket>(dhcp_handle);
//! forward_dhcp_event(dhcp.poll(), &STATE);
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;
