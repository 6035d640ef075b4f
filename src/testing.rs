//! Testing utilities and mock implementations
//!
//! This module provides a mock vendor platform for exercising bring-up,
//! teardown and event delivery on the host without an SDK.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::boxed::Box;
use std::vec::Vec;

use crate::addr::{IpInfo, MacAddress};
use crate::config::{MacConfig, PhyConfig};
use crate::error::{PlatformError, PlatformResult};
use crate::event::{Event, EventCategory, EventDispatcher, HandlerRef};
use crate::platform::EthPlatform;
use crate::state::{ConnectionState, StaleAddressPolicy};

/// Hardware address reported by [`MockPlatform`]
pub const MOCK_MAC: MacAddress = MacAddress::new([0x24, 0x0A, 0xC4, 0x5E, 0x11, 0x01]);

/// Fresh `'static` cache for one test
pub fn leak_state() -> &'static ConnectionState {
    leak_state_with(StaleAddressPolicy::Clear)
}

/// Fresh `'static` cache with an explicit stale-address policy
pub fn leak_state_with(policy: StaleAddressPolicy) -> &'static ConnectionState {
    Box::leak(Box::new(ConnectionState::with_policy(policy)))
}

// =============================================================================
// Mock Platform
// =============================================================================

/// Platform call, as recorded by [`MockPlatform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    CreateNetif,
    DestroyNetif,
    InstallDriver,
    UninstallDriver,
    Attach,
    Subscribe(EventCategory),
    Unsubscribe(EventCategory),
    MacAddress,
    StopDhcpClient,
    SetIpInfo,
    Start,
    Stop,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockNetif(u32);

#[derive(Debug, PartialEq, Eq)]
pub struct MockDriver(u32);

/// Mock vendor framework
///
/// Records every call, fails on request, tracks live handles and routes
/// emitted events through an embedded [`EventDispatcher`].
///
/// # Example
///
/// ```ignore
/// let mut platform = MockPlatform::new();
/// platform.fail_on(Call::Start, PlatformError::FAIL);
///
/// let result = EthInterface::bring_up(&mut platform, EthConfig::new(), leak_state());
/// assert!(result.is_err());
/// assert!(platform.is_clean());
/// ```
pub struct MockPlatform {
    calls: Vec<Call>,
    failures: Vec<(Call, PlatformError)>,
    dispatcher: EventDispatcher<4>,
    next_handle: u32,
    live_netifs: Vec<u32>,
    live_drivers: Vec<u32>,
    started: bool,
    assigned_ip: Option<IpInfo>,
    installed_with: Option<(MacConfig, PhyConfig)>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            failures: Vec::new(),
            dispatcher: EventDispatcher::new(),
            next_handle: 1,
            live_netifs: Vec::new(),
            live_drivers: Vec::new(),
            started: false,
            assigned_ip: None,
            installed_with: None,
        }
    }

    /// Make `call` fail with `error`
    pub fn fail_on(&mut self, call: Call, error: PlatformError) {
        self.failures.push((call, error));
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.clone()
    }

    /// Deliver an event to subscribed handlers; returns how many were notified
    pub fn emit(&self, event: &Event) -> usize {
        self.dispatcher.dispatch(event)
    }

    /// No live netif, driver or subscription
    pub fn is_clean(&self) -> bool {
        self.live_netifs.is_empty() && self.live_drivers.is_empty() && self.dispatcher.is_empty()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.dispatcher.len()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Triple passed to `set_ip_info`, if any
    pub fn assigned_ip(&self) -> Option<IpInfo> {
        self.assigned_ip
    }

    /// Configuration passed to `install_driver`, if any
    pub fn installed_with(&self) -> Option<(MacConfig, PhyConfig)> {
        self.installed_with
    }

    fn record(&mut self, call: Call) -> PlatformResult<()> {
        self.calls.push(call);
        match self.failures.iter().find(|(c, _)| *c == call) {
            Some((_, error)) => Err(*error),
            None => Ok(()),
        }
    }

    fn handle(&mut self) -> u32 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl EthPlatform for MockPlatform {
    type Netif = MockNetif;
    type Driver = MockDriver;

    fn create_netif(&mut self) -> PlatformResult<MockNetif> {
        self.record(Call::CreateNetif)?;
        let id = self.handle();
        self.live_netifs.push(id);
        Ok(MockNetif(id))
    }

    fn destroy_netif(&mut self, netif: MockNetif) {
        self.calls.push(Call::DestroyNetif);
        self.live_netifs.retain(|id| *id != netif.0);
    }

    fn install_driver(&mut self, mac: &MacConfig, phy: &PhyConfig) -> PlatformResult<MockDriver> {
        self.record(Call::InstallDriver)?;
        self.installed_with = Some((*mac, *phy));
        let id = self.handle();
        self.live_drivers.push(id);
        Ok(MockDriver(id))
    }

    fn uninstall_driver(&mut self, driver: MockDriver) {
        self.calls.push(Call::UninstallDriver);
        self.live_drivers.retain(|id| *id != driver.0);
        self.started = false;
    }

    fn attach(&mut self, netif: &mut MockNetif, driver: &mut MockDriver) -> PlatformResult<()> {
        self.record(Call::Attach)?;
        assert!(self.live_netifs.contains(&netif.0), "attach on dead netif");
        assert!(self.live_drivers.contains(&driver.0), "attach on dead driver");
        Ok(())
    }

    fn subscribe(&mut self, category: EventCategory, handler: HandlerRef) -> PlatformResult<()> {
        self.record(Call::Subscribe(category))?;
        self.dispatcher.register(category, handler)?;
        Ok(())
    }

    fn unsubscribe(&mut self, category: EventCategory, handler: HandlerRef) {
        self.calls.push(Call::Unsubscribe(category));
        self.dispatcher.unregister(category, handler);
    }

    fn mac_address(&mut self, _driver: &MockDriver) -> PlatformResult<MacAddress> {
        self.record(Call::MacAddress)?;
        Ok(MOCK_MAC)
    }

    fn stop_dhcp_client(&mut self, _netif: &mut MockNetif) -> PlatformResult<()> {
        self.record(Call::StopDhcpClient)
    }

    fn set_ip_info(&mut self, _netif: &mut MockNetif, info: &IpInfo) -> PlatformResult<()> {
        self.record(Call::SetIpInfo)?;
        self.assigned_ip = Some(*info);
        Ok(())
    }

    fn start(&mut self, _driver: &mut MockDriver) -> PlatformResult<()> {
        self.record(Call::Start)?;
        self.started = true;
        Ok(())
    }

    fn stop(&mut self, _driver: &mut MockDriver) -> PlatformResult<()> {
        self.record(Call::Stop)?;
        self.started = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EthEvent, IpEvent};

    #[test]
    fn mock_records_and_fails() {
        let mut platform = MockPlatform::new();
        platform.fail_on(Call::CreateNetif, PlatformError::NO_MEM);

        assert_eq!(platform.create_netif(), Err(PlatformError::NO_MEM));
        assert_eq!(platform.calls().as_slice(), &[Call::CreateNetif]);
        assert!(platform.is_clean());
    }

    #[test]
    fn mock_tracks_live_handles() {
        let mut platform = MockPlatform::new();
        let netif = platform.create_netif().unwrap();
        let driver = platform
            .install_driver(&MacConfig::new(), &PhyConfig::default())
            .unwrap();
        assert!(!platform.is_clean());

        platform.uninstall_driver(driver);
        platform.destroy_netif(netif);
        assert!(platform.is_clean());
        assert!(!platform.is_started());
    }

    #[test]
    fn mock_routes_events_to_subscribers() {
        let mut platform = MockPlatform::new();
        let state = leak_state();
        platform.subscribe(EventCategory::Ip, state).unwrap();

        assert_eq!(platform.emit(&Event::Link(EthEvent::Started)), 0);
        assert_eq!(platform.emit(&Event::Ip(IpEvent::GotIp(IpInfo::UNSPECIFIED))), 1);
        assert!(state.is_connected());

        platform.unsubscribe(EventCategory::Ip, state);
        assert_eq!(platform.live_subscriptions(), 0);
    }
}
