//! Vendor networking framework seam
//!
//! [`EthPlatform`] is everything [`EthInterface`](crate::EthInterface) needs
//! from the vendor SDK: network-interface objects, the combined MAC/PHY
//! driver, TCP/IP stack attachment, DHCP client control and the event-loop
//! registry. On ESP-IDF each method maps onto one `esp_netif_*`, `esp_eth_*`
//! or `esp_event_*` call; on the host, tests use a mock.
//!
//! # Preconditions
//!
//! The platform's persistent storage, network-interface subsystem and default
//! event loop must be initialized before the first call. The crate never
//! initializes them itself.
//!
//! # Release Contract
//!
//! The release methods ([`destroy_netif`](EthPlatform::destroy_netif),
//! [`uninstall_driver`](EthPlatform::uninstall_driver),
//! [`unsubscribe`](EthPlatform::unsubscribe)) cannot fail from the caller's
//! point of view and must tolerate being called for a half-configured
//! object: bring-up uses them to unwind after a failed step.

use crate::addr::{IpInfo, MacAddress};
use crate::config::{MacConfig, PhyConfig};
use crate::error::PlatformResult;
use crate::event::{EventCategory, HandlerRef};

/// Vendor networking framework operations.
///
/// # Example Implementation
///
/// ```ignore
/// struct EspIdf;
///
/// impl EthPlatform for EspIdf {
///     type Netif = *mut esp_netif_t;
///     type Driver = EspEthDriver;
///
///     fn create_netif(&mut self) -> PlatformResult<Self::Netif> {
///         let cfg = esp_netif_default_eth_config();
///         let netif = unsafe { esp_netif_new(&cfg) };
///         if netif.is_null() { Err(PlatformError::NO_MEM) } else { Ok(netif) }
///     }
///
///     // ... other methods
/// }
/// ```
pub trait EthPlatform {
    /// Network-interface object (`esp_netif_t`)
    type Netif;

    /// Installed MAC/PHY driver (`esp_eth_handle_t` plus its MAC/PHY objects)
    type Driver;

    /// Create a network-interface object with the default Ethernet profile
    fn create_netif(&mut self) -> PlatformResult<Self::Netif>;

    /// Destroy a network-interface object
    fn destroy_netif(&mut self, netif: Self::Netif);

    /// Instantiate MAC and PHY drivers from the pin configuration and install
    /// the combined driver
    fn install_driver(&mut self, mac: &MacConfig, phy: &PhyConfig)
        -> PlatformResult<Self::Driver>;

    /// Uninstall the driver, its stack glue and its MAC/PHY objects
    fn uninstall_driver(&mut self, driver: Self::Driver);

    /// Attach the driver to the TCP/IP stack through `netif`
    fn attach(&mut self, netif: &mut Self::Netif, driver: &mut Self::Driver)
        -> PlatformResult<()>;

    /// Register `handler` for every event of `category`
    fn subscribe(&mut self, category: EventCategory, handler: HandlerRef) -> PlatformResult<()>;

    /// Remove a registration made by [`subscribe`](Self::subscribe); no-op
    /// if it does not exist
    fn unsubscribe(&mut self, category: EventCategory, handler: HandlerRef);

    /// Read the hardware address from the driver
    fn mac_address(&mut self, driver: &Self::Driver) -> PlatformResult<MacAddress>;

    /// Stop the DHCP client on `netif`
    fn stop_dhcp_client(&mut self, netif: &mut Self::Netif) -> PlatformResult<()>;

    /// Assign an address triple to `netif`
    fn set_ip_info(&mut self, netif: &mut Self::Netif, info: &IpInfo) -> PlatformResult<()>;

    /// Start the driver state machine
    fn start(&mut self, driver: &mut Self::Driver) -> PlatformResult<()>;

    /// Stop the driver state machine
    fn stop(&mut self, driver: &mut Self::Driver) -> PlatformResult<()>;
}

impl<T: EthPlatform + ?Sized> EthPlatform for &mut T {
    type Netif = T::Netif;
    type Driver = T::Driver;

    #[inline]
    fn create_netif(&mut self) -> PlatformResult<Self::Netif> {
        T::create_netif(self)
    }

    #[inline]
    fn destroy_netif(&mut self, netif: Self::Netif) {
        T::destroy_netif(self, netif);
    }

    #[inline]
    fn install_driver(
        &mut self,
        mac: &MacConfig,
        phy: &PhyConfig,
    ) -> PlatformResult<Self::Driver> {
        T::install_driver(self, mac, phy)
    }

    #[inline]
    fn uninstall_driver(&mut self, driver: Self::Driver) {
        T::uninstall_driver(self, driver);
    }

    #[inline]
    fn attach(&mut self, netif: &mut Self::Netif, driver: &mut Self::Driver) -> PlatformResult<()> {
        T::attach(self, netif, driver)
    }

    #[inline]
    fn subscribe(&mut self, category: EventCategory, handler: HandlerRef) -> PlatformResult<()> {
        T::subscribe(self, category, handler)
    }

    #[inline]
    fn unsubscribe(&mut self, category: EventCategory, handler: HandlerRef) {
        T::unsubscribe(self, category, handler);
    }

    #[inline]
    fn mac_address(&mut self, driver: &Self::Driver) -> PlatformResult<MacAddress> {
        T::mac_address(self, driver)
    }

    #[inline]
    fn stop_dhcp_client(&mut self, netif: &mut Self::Netif) -> PlatformResult<()> {
        T::stop_dhcp_client(self, netif)
    }

    #[inline]
    fn set_ip_info(&mut self, netif: &mut Self::Netif, info: &IpInfo) -> PlatformResult<()> {
        T::set_ip_info(self, netif, info)
    }

    #[inline]
    fn start(&mut self, driver: &mut Self::Driver) -> PlatformResult<()> {
        T::start(self, driver)
    }

    #[inline]
    fn stop(&mut self, driver: &mut Self::Driver) -> PlatformResult<()> {
        T::stop(self, driver)
    }
}
