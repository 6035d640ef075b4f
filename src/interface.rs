//! Ethernet interface bring-up and teardown
//!
//! [`EthInterface::bring_up`] runs the fixed bring-up sequence against an
//! [`EthPlatform`], wiring the link and IP handlers of a [`ConnectionState`]
//! into the platform's event loop:
//!
//! 1. Create the network-interface object
//! 2. Install the MAC/PHY driver with the configured pins
//! 3. Attach the driver to the TCP/IP stack
//! 4. Register the link event handler
//! 5. Register the IP event handler
//! 6. Read and cache the hardware address
//! 7. Static addressing only: stop the DHCP client, assign the address triple
//! 8. Start the driver
//!
//! The first failing step aborts bring-up. Everything created before it is
//! released in reverse order and the cache is reset before the error is
//! returned. No step is retried.
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_eth::{ConnectionState, EthConfig, EthInterface};
//!
//! static NET: ConnectionState = ConnectionState::new();
//!
//! // nvs_flash_init, esp_netif_init and esp_event_loop_create_default first
//! let eth = EthInterface::bring_up(EspIdf::new(), EthConfig::new(), &NET)?;
//!
//! loop {
//!     if let Some(info) = eth.connection_info() {
//!         // talk to info.gateway ...
//!     }
//! }
//! ```

use crate::addr::MacAddress;
use crate::config::{AddressMode, EthConfig};
use crate::error::{BringUpStep, Error, PlatformError, Result};
use crate::event::{EventCategory, HandlerRef};
use crate::platform::EthPlatform;
use crate::state::{ConnectionInfo, ConnectionState, LinkPhase};

/// A running Ethernet interface.
///
/// Owns the platform handles created during bring-up and the link to the
/// [`ConnectionState`] its event handlers write to.
pub struct EthInterface<P: EthPlatform> {
    platform: P,
    netif: P::Netif,
    driver: P::Driver,
    state: &'static ConnectionState,
    config: EthConfig,
}

impl<P: EthPlatform> EthInterface<P> {
    /// Bring the interface up.
    ///
    /// `state` receives the link and IP events from the platform's dispatch
    /// context; it must be a `static` (or otherwise outlive the program's use
    /// of the interface).
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `config` fails validation; the platform is not
    ///   touched
    /// - [`Error::BringUp`] naming the first failing step; all resources
    ///   created before it have been released
    pub fn bring_up(
        mut platform: P,
        config: EthConfig,
        state: &'static ConnectionState,
    ) -> Result<Self> {
        config.validate()?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Ethernet bring-up: {}, PHY addr {}, MDC GPIO{}, MDIO GPIO{}",
            config.phy.model,
            config.phy.address,
            config.mac.mdc_gpio,
            config.mac.mdio_gpio
        );

        let mut netif = platform
            .create_netif()
            .map_err(|e| step_failed(BringUpStep::CreateInterface, e))?;

        let mut driver = match platform.install_driver(&config.mac, &config.phy) {
            Ok(driver) => driver,
            Err(e) => {
                platform.destroy_netif(netif);
                return Err(step_failed(BringUpStep::InstallDriver, e));
            }
        };

        if let Err(err) = configure(&mut platform, &mut netif, &mut driver, &config, state) {
            release(&mut platform, netif, driver, state);
            state.reset();
            return Err(err);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Ethernet load success");

        Ok(Self {
            platform,
            netif,
            driver,
            state,
            config,
        })
    }

    /// Stop the driver and release every platform resource.
    ///
    /// Resources are released even when stopping the driver fails. The cache
    /// is marked `Down`; the hardware address stays cached.
    ///
    /// # Errors
    ///
    /// [`Error::Shutdown`] if the platform refused to stop the driver.
    pub fn shutdown(self) -> Result<P> {
        let Self {
            mut platform,
            netif,
            mut driver,
            state,
            ..
        } = self;

        let stopped = platform.stop(&mut driver);
        release(&mut platform, netif, driver, state);
        state.mark_down();

        #[cfg(feature = "defmt")]
        {
            if let Err(e) = stopped {
                defmt::warn!("Ethernet driver stop failed: {}", e);
            } else {
                defmt::info!("Ethernet shut down");
            }
        }

        stopped.map(|()| platform).map_err(Error::Shutdown)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// True once an address was acquired and the link has not dropped since
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Cached connection details, `None` while not connected
    pub fn connection_info(&self) -> Option<ConnectionInfo> {
        self.state.info()
    }

    /// Hardware address read during bring-up
    pub fn mac_address(&self) -> MacAddress {
        self.state.mac_address()
    }

    /// Current connection phase
    pub fn phase(&self) -> LinkPhase {
        self.state.phase()
    }

    /// Connection-state cache fed by this interface
    pub fn state(&self) -> &'static ConnectionState {
        self.state
    }

    /// Configuration the interface was brought up with
    pub fn config(&self) -> &EthConfig {
        &self.config
    }

    /// Platform backing this interface
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform backing this interface
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

/// Steps 3 to 8 of bring-up, after both handles exist.
fn configure<P: EthPlatform>(
    platform: &mut P,
    netif: &mut P::Netif,
    driver: &mut P::Driver,
    config: &EthConfig,
    state: &'static ConnectionState,
) -> Result<()> {
    let handler: HandlerRef = state;

    platform
        .attach(netif, driver)
        .map_err(|e| step_failed(BringUpStep::AttachStack, e))?;

    platform
        .subscribe(EventCategory::Link, handler)
        .map_err(|e| step_failed(BringUpStep::RegisterLinkHandler, e))?;
    platform
        .subscribe(EventCategory::Ip, handler)
        .map_err(|e| step_failed(BringUpStep::RegisterIpHandler, e))?;

    let mac = platform
        .mac_address(driver)
        .map_err(|e| step_failed(BringUpStep::ReadMacAddress, e))?;
    state.set_mac(mac);

    #[cfg(feature = "defmt")]
    {
        let m = mac.octets();
        defmt::info!(
            "Ethernet MAC Address: {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        );
    }

    if let AddressMode::Static(info) = config.address_mode {
        #[cfg(feature = "defmt")]
        defmt::info!("Stopping DHCP client for static addressing");

        platform
            .stop_dhcp_client(netif)
            .map_err(|e| step_failed(BringUpStep::StopDhcpClient, e))?;

        #[cfg(feature = "defmt")]
        defmt::info!("static ip: {}", info);

        platform
            .set_ip_info(netif, &info)
            .map_err(|e| step_failed(BringUpStep::SetStaticAddress, e))?;
    }

    platform
        .start(driver)
        .map_err(|e| step_failed(BringUpStep::StartDriver, e))
}

/// Unwind in reverse creation order. Unsubscribing a handler that was never
/// registered is a no-op by the platform contract.
fn release<P: EthPlatform>(
    platform: &mut P,
    netif: P::Netif,
    driver: P::Driver,
    state: &'static ConnectionState,
) {
    let handler: HandlerRef = state;
    platform.unsubscribe(EventCategory::Ip, handler);
    platform.unsubscribe(EventCategory::Link, handler);
    platform.uninstall_driver(driver);
    platform.destroy_netif(netif);
}

fn step_failed(step: BringUpStep, cause: PlatformError) -> Error {
    #[cfg(feature = "defmt")]
    defmt::error!("Ethernet bring-up failed at {}: {}", step, cause);

    Error::bring_up(step, cause)
}

// =============================================================================
// Unit Tests
// =============================================================================
