//! Connection-state cache
//!
//! [`ConnectionState`] holds the last observed MAC, IP, netmask and gateway
//! plus the connected flag. It is written by the link and IP event handlers
//! on the platform's dispatch context and read by application code through
//! [`ConnectionState::is_connected`] and [`ConnectionState::info`].
//!
//! The whole record sits behind one critical section, so a reader sees
//! either the state before an event or the state after it, never a mix.
//!
//! # State Machine
//!
//! ```text
//!            link-up              got IP
//!   Down ─────────────▶ Linked ─────────────▶ Connected
//!    ▲                    │  ▲     lost IP        │
//!    │      link-down     │  └────────────────────┤
//!    └────────────────────┴───────────────────────┘
//! ```
//!
//! A got-IP event sets `Connected` from any phase. Only the IP handler ever
//! sets the connected flag; link-down and lost-IP clear it.
//!
//! # Stale Addresses
//!
//! [`StaleAddressPolicy`] decides what happens to IP, netmask and gateway when
//! the connection drops. [`ConnectionState::info`] returns `None` whenever
//! disconnected regardless of policy; the policy is visible through
//! [`ConnectionState::snapshot`].

use core::net::Ipv4Addr;

use crate::addr::{IpInfo, MacAddress};
use crate::event::{EthEvent, Event, EventHandler, IpEvent};
use crate::sync::CriticalSectionCell;

// =============================================================================
// Types
// =============================================================================

/// Connection phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkPhase {
    /// No link (initial, or after link-down)
    #[default]
    Down,
    /// Link up, no address yet
    Linked,
    /// Address acquired
    Connected,
}

/// What to do with the cached addresses when the connection drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StaleAddressPolicy {
    /// Zero IP, netmask and gateway on link-down and lost-IP
    #[default]
    Clear,
    /// Keep the last values; only the connected flag is cleared
    Retain,
}

/// Cached connection details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Interface address
    pub ip: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
    /// Subnet mask
    pub netmask: Ipv4Addr,
    /// Hardware address
    pub mac: MacAddress,
}

impl ConnectionInfo {
    /// Zero-initialized record
    pub const UNSET: Self = Self {
        ip: Ipv4Addr::UNSPECIFIED,
        gateway: Ipv4Addr::UNSPECIFIED,
        netmask: Ipv4Addr::UNSPECIFIED,
        mac: MacAddress::UNSET,
    };

    /// Interface address in host byte order
    pub const fn ip_u32(&self) -> u32 {
        self.ip.to_bits()
    }

    /// Gateway address in host byte order
    pub const fn gateway_u32(&self) -> u32 {
        self.gateway.to_bits()
    }

    /// Address triple
    pub const fn ip_info(&self) -> IpInfo {
        IpInfo::new(self.ip, self.netmask, self.gateway)
    }
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self::UNSET
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConnectionInfo {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d] = self.ip.octets();
        let [g0, g1, g2, g3] = self.gateway.octets();
        defmt::write!(
            f,
            "ip {}.{}.{}.{} gw {}.{}.{}.{} mac {}",
            a, b, c, d, g0, g1, g2, g3, self.mac
        );
    }
}

#[derive(Debug, Clone, Copy)]
struct Record {
    info: ConnectionInfo,
    connected: bool,
    phase: LinkPhase,
}

impl Record {
    const ZERO: Self = Self {
        info: ConnectionInfo::UNSET,
        connected: false,
        phase: LinkPhase::Down,
    };

    fn drop_addresses(&mut self, policy: StaleAddressPolicy) {
        if policy == StaleAddressPolicy::Clear {
            self.info.ip = Ipv4Addr::UNSPECIFIED;
            self.info.gateway = Ipv4Addr::UNSPECIFIED;
            self.info.netmask = Ipv4Addr::UNSPECIFIED;
        }
    }
}

// =============================================================================
// Connection State
// =============================================================================

/// Connection-state cache for one interface.
///
/// `const`-constructible so it can live in a `static`, which is what the
/// platform's handler registry needs:
///
/// ```ignore
/// static NET: ConnectionState = ConnectionState::new();
///
/// let eth = EthInterface::bring_up(platform, EthConfig::new(), &NET)?;
/// if let Some(info) = NET.info() {
///     // ...
/// }
/// ```
pub struct ConnectionState {
    record: CriticalSectionCell<Record>,
    policy: StaleAddressPolicy,
}

impl ConnectionState {
    /// Zero-initialized cache with [`StaleAddressPolicy::Clear`]
    pub const fn new() -> Self {
        Self::with_policy(StaleAddressPolicy::Clear)
    }

    /// Zero-initialized cache with an explicit stale-address policy
    pub const fn with_policy(policy: StaleAddressPolicy) -> Self {
        Self {
            record: CriticalSectionCell::new(Record::ZERO),
            policy,
        }
    }

    /// Stale-address policy in effect
    pub const fn policy(&self) -> StaleAddressPolicy {
        self.policy
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// True once an address was acquired and the link has not dropped since
    pub fn is_connected(&self) -> bool {
        self.record.with_ref(|r| r.connected)
    }

    /// Cached record if connected, `None` otherwise
    pub fn info(&self) -> Option<ConnectionInfo> {
        self.record
            .with_ref(|r| if r.connected { Some(r.info) } else { None })
    }

    /// Hardware address cached at bring-up
    pub fn mac_address(&self) -> MacAddress {
        self.record.with_ref(|r| r.info.mac)
    }

    /// Current connection phase
    pub fn phase(&self) -> LinkPhase {
        self.record.with_ref(|r| r.phase)
    }

    /// Raw record regardless of the connected flag.
    ///
    /// Under [`StaleAddressPolicy::Retain`] this exposes the addresses of
    /// the last connection after it dropped.
    pub fn snapshot(&self) -> ConnectionInfo {
        self.record.with_ref(|r| r.info)
    }

    // =========================================================================
    // Bring-up hooks
    // =========================================================================

    pub(crate) fn set_mac(&self, mac: MacAddress) {
        self.record.with(|r| r.info.mac = mac);
    }

    pub(crate) fn reset(&self) {
        self.record.with(|r| *r = Record::ZERO);
    }

    pub(crate) fn mark_down(&self) {
        let policy = self.policy;
        self.record.with(|r| {
            r.connected = false;
            r.phase = LinkPhase::Down;
            r.drop_addresses(policy);
        });
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    /// Link lifecycle handler.
    ///
    /// Link-up moves `Down` to `Linked` (an already connected record is left
    /// alone); the MAC in the payload is logged, not cached. Link-down clears
    /// the connected flag and returns to `Down`.
    pub fn on_link_event(&self, event: &EthEvent) {
        match event {
            EthEvent::Connected { mac } => {
                self.record.with(|r| {
                    if r.phase == LinkPhase::Down {
                        r.phase = LinkPhase::Linked;
                    }
                });

                #[cfg(feature = "defmt")]
                {
                    let m = mac.octets();
                    defmt::info!("Ethernet Link Up");
                    defmt::info!(
                        "Ethernet HW Addr {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                        m[0], m[1], m[2], m[3], m[4], m[5]
                    );
                }
                #[cfg(not(feature = "defmt"))]
                let _ = mac;
            }
            EthEvent::Disconnected => {
                self.mark_down();

                #[cfg(feature = "defmt")]
                defmt::info!("Ethernet Link Down");
            }
            EthEvent::Started => {
                #[cfg(feature = "defmt")]
                defmt::info!("Ethernet Started");
            }
            EthEvent::Stopped => {
                #[cfg(feature = "defmt")]
                defmt::info!("Ethernet Stopped");
            }
        }
    }

    /// IP lifecycle handler.
    ///
    /// Got-IP stores the address and gateway and sets the connected flag;
    /// this is the only place the flag is set. Lost-IP clears the flag and
    /// falls back to `Linked`.
    pub fn on_ip_event(&self, event: &IpEvent) {
        match event {
            IpEvent::GotIp(info) => {
                self.record.with(|r| {
                    r.info.ip = info.ip;
                    r.info.gateway = info.gateway;
                    r.info.netmask = info.netmask;
                    r.connected = true;
                    r.phase = LinkPhase::Connected;
                });

                #[cfg(feature = "defmt")]
                defmt::info!("Ethernet Got IP Address: {}", info);
            }
            IpEvent::LostIp => {
                let policy = self.policy;
                self.record.with(|r| {
                    r.connected = false;
                    if r.phase == LinkPhase::Connected {
                        r.phase = LinkPhase::Linked;
                    }
                    r.drop_addresses(policy);
                });

                #[cfg(feature = "defmt")]
                defmt::info!("Ethernet Lost IP Address");
            }
        }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ConnectionState {
    fn notify(&self, event: &Event) {
        match event {
            Event::Link(e) => self.on_link_event(e),
            Event::Ip(e) => self.on_ip_event(e),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: MacAddress = MacAddress::new([0x24, 0x0A, 0xC4, 0x12, 0x34, 0x56]);

    fn got_ip() -> IpEvent {
        IpEvent::GotIp(IpInfo::new(
            Ipv4Addr::new(192, 168, 1, 50),
            Ipv4Addr::new(255, 255, 255, 0),
            Ipv4Addr::new(192, 168, 1, 1),
        ))
    }

    #[test]
    fn starts_disconnected_and_unavailable() {
        let state = ConnectionState::new();

        assert!(!state.is_connected());
        assert_eq!(state.info(), None);
        assert_eq!(state.phase(), LinkPhase::Down);
        assert_eq!(state.snapshot(), ConnectionInfo::UNSET);
        assert_eq!(state.policy(), StaleAddressPolicy::Clear);
    }

    #[test]
    fn got_ip_connects_with_cached_mac() {
        let state = ConnectionState::new();
        state.set_mac(MAC);
        state.on_ip_event(&got_ip());

        assert!(state.is_connected());
        let info = state.info().unwrap();
        assert_eq!(info.ip, Ipv4Addr::new(192, 168, 1, 50));
        assert_eq!(info.gateway, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(info.netmask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(info.ip_u32(), 0xC0A8_0132);
        assert_eq!(info.gateway_u32(), 0xC0A8_0101);
        assert_eq!(info.mac, MAC);
    }

    #[test]
    fn link_up_does_not_connect() {
        let state = ConnectionState::new();
        state.on_link_event(&EthEvent::Started);
        state.on_link_event(&EthEvent::Connected { mac: MAC });

        assert_eq!(state.phase(), LinkPhase::Linked);
        assert!(!state.is_connected());
        assert_eq!(state.info(), None);
    }

    #[test]
    fn link_up_never_overwrites_mac() {
        let state = ConnectionState::new();
        state.set_mac(MAC);

        let other = MacAddress::new([0x02, 0, 0, 0, 0, 0x99]);
        state.on_link_event(&EthEvent::Connected { mac: other });
        state.on_ip_event(&got_ip());
        state.on_link_event(&EthEvent::Disconnected);

        assert_eq!(state.mac_address(), MAC);
        assert_eq!(state.snapshot().mac, MAC);
    }

    #[test]
    fn full_sequence_walks_the_state_machine() {
        let state = ConnectionState::new();

        state.on_link_event(&EthEvent::Connected { mac: MAC });
        assert_eq!(state.phase(), LinkPhase::Linked);

        state.on_ip_event(&got_ip());
        assert_eq!(state.phase(), LinkPhase::Connected);

        // A repeated link-up while connected keeps the address
        state.on_link_event(&EthEvent::Connected { mac: MAC });
        assert_eq!(state.phase(), LinkPhase::Connected);
        assert!(state.is_connected());

        state.on_link_event(&EthEvent::Disconnected);
        assert_eq!(state.phase(), LinkPhase::Down);
        assert!(!state.is_connected());
    }

    #[test]
    fn link_down_clears_addresses_by_default() {
        let state = ConnectionState::new();
        state.set_mac(MAC);
        state.on_ip_event(&got_ip());
        state.on_link_event(&EthEvent::Disconnected);

        assert!(!state.is_connected());
        assert_eq!(state.info(), None);

        let raw = state.snapshot();
        assert_eq!(raw.ip, Ipv4Addr::UNSPECIFIED);
        assert_eq!(raw.gateway, Ipv4Addr::UNSPECIFIED);
        assert_eq!(raw.netmask, Ipv4Addr::UNSPECIFIED);
        assert_eq!(raw.mac, MAC);
    }

    #[test]
    fn link_down_retains_addresses_when_asked() {
        let state = ConnectionState::with_policy(StaleAddressPolicy::Retain);
        state.on_ip_event(&got_ip());
        state.on_link_event(&EthEvent::Disconnected);

        assert!(!state.is_connected());
        assert_eq!(state.info(), None);

        let raw = state.snapshot();
        assert_eq!(raw.ip, Ipv4Addr::new(192, 168, 1, 50));
        assert_eq!(raw.gateway, Ipv4Addr::new(192, 168, 1, 1));
    }

    #[test]
    fn lost_ip_falls_back_to_linked() {
        let state = ConnectionState::new();
        state.on_link_event(&EthEvent::Connected { mac: MAC });
        state.on_ip_event(&got_ip());
        state.on_ip_event(&IpEvent::LostIp);

        assert_eq!(state.phase(), LinkPhase::Linked);
        assert!(!state.is_connected());
        assert_eq!(state.snapshot().ip, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn lost_ip_while_down_stays_down() {
        let state = ConnectionState::new();
        state.on_ip_event(&IpEvent::LostIp);
        assert_eq!(state.phase(), LinkPhase::Down);
    }

    #[test]
    fn started_and_stopped_change_nothing() {
        let state = ConnectionState::new();
        state.on_ip_event(&got_ip());
        let before = state.info();

        state.on_link_event(&EthEvent::Started);
        state.on_link_event(&EthEvent::Stopped);

        assert_eq!(state.info(), before);
        assert_eq!(state.phase(), LinkPhase::Connected);
    }

    #[test]
    fn repeated_reads_are_identical() {
        let state = ConnectionState::new();
        state.set_mac(MAC);
        state.on_ip_event(&got_ip());

        let first = state.info();
        for _ in 0..100 {
            assert_eq!(state.info(), first);
            assert!(state.is_connected());
        }
    }

    #[test]
    fn renewed_lease_replaces_address() {
        let state = ConnectionState::new();
        state.on_ip_event(&got_ip());
        state.on_ip_event(&IpEvent::GotIp(IpInfo::from_host_order(
            0x0A00_0005,
            0xFF00_0000,
            0x0A00_0001,
        )));

        let info = state.info().unwrap();
        assert_eq!(info.ip, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(info.gateway, Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn notify_routes_to_handlers() {
        let state = ConnectionState::new();
        state.notify(&Event::Ip(got_ip()));
        assert!(state.is_connected());

        state.notify(&Event::Link(EthEvent::Disconnected));
        assert!(!state.is_connected());
    }

    #[test]
    fn reset_and_mark_down() {
        let state = ConnectionState::with_policy(StaleAddressPolicy::Retain);
        state.set_mac(MAC);
        state.on_ip_event(&got_ip());

        state.mark_down();
        assert_eq!(state.phase(), LinkPhase::Down);
        assert_eq!(state.snapshot().mac, MAC);

        state.reset();
        assert_eq!(state.snapshot(), ConnectionInfo::UNSET);
    }

    #[test]
    fn static_state_is_usable() {
        static STATE: ConnectionState = ConnectionState::new();
        STATE.on_link_event(&EthEvent::Started);
        assert!(!STATE.is_connected());
    }
}
