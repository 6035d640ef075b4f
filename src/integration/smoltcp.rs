//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! Glue between the [smoltcp](https://docs.rs/smoltcp) stack and the
//! interface types of this crate. When smoltcp runs its own DHCPv4 socket
//! instead of the vendor client, the socket's events are converted to
//! [`IpEvent`]s so the same [`ConnectionState`](crate::ConnectionState) keeps
//! answering `is_connected` and `info`.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface};
//! use smoltcp::socket::dhcpv4;
//! use ph_esp32_eth::integration::smoltcp::{ethernet_address, forward_dhcp_event};
//!
//! static STATE: ConnectionState = ConnectionState::new();
//!
//! let config = Config::new(ethernet_address(STATE.mac_address()).into());
//! let mut iface = Interface::new(config, &mut device, Instant::ZERO);
//!
//! loop {
//!     iface.poll(now, &mut device, &mut sockets);
//!     let event = sockets.get_mut::<dhcpv4::Socket>(dhcp_handle).poll();
//!     forward_dhcp_event(event, &STATE);
//! }
//! ```
//!
//! # Features
//!
//! This module is only available when the `smoltcp` feature is enabled in Cargo.toml:
//! ```toml
//! [dependencies]
//! ph-esp32-eth = { version = "0.1", features = ["smoltcp"] }
//! ```

use core::net::Ipv4Addr;

use smoltcp::socket::dhcpv4;
use smoltcp::wire::{EthernetAddress, Ipv4Cidr};

use crate::addr::{IpInfo, MacAddress};
use crate::event::{Event, EventHandler, IpEvent};

/// Hardware address in smoltcp's representation
#[inline]
#[must_use]
pub const fn ethernet_address(mac: MacAddress) -> EthernetAddress {
    EthernetAddress(mac.octets())
}

/// Convert a DHCPv4 socket event to an [`IpEvent`].
///
/// A lease without a router reports the unspecified gateway.
#[must_use]
pub fn ip_event_from_dhcp(event: &dhcpv4::Event<'_>) -> IpEvent {
    match event {
        dhcpv4::Event::Configured(config) => ip_event_from_lease(config.address, config.router),
        dhcpv4::Event::Deconfigured => IpEvent::LostIp,
    }
}

fn ip_event_from_lease(address: Ipv4Cidr, router: Option<Ipv4Addr>) -> IpEvent {
    IpEvent::GotIp(IpInfo::new(
        address.address(),
        address.netmask(),
        router.unwrap_or(Ipv4Addr::UNSPECIFIED),
    ))
}

/// Forward the result of `dhcpv4::Socket::poll` to `handler`.
///
/// Returns `true` if an event was delivered.
pub fn forward_dhcp_event(event: Option<dhcpv4::Event<'_>>, handler: &dyn EventHandler) -> bool {
    let Some(event) = event else {
        return false;
    };
    let ip_event = ip_event_from_dhcp(&event);

    #[cfg(feature = "defmt")]
    defmt::debug!("smoltcp DHCP: {}", ip_event);

    handler.notify(&Event::Ip(ip_event));
    true
}

/// Interface address for `Interface::update_ip_addrs`.
///
/// Returns `None` if the netmask is not contiguous.
#[must_use]
pub fn ipv4_cidr(info: &IpInfo) -> Option<Ipv4Cidr> {
    info.prefix_len().map(|len| Ipv4Cidr::new(info.ip, len))
}
