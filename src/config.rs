//! Configuration types for Ethernet interface bring-up
//!
//! Pin assignments are compile-time wiring facts, so every type here is
//! `Copy` and buildable in `const` context:
//!
//! ```ignore
//! const CONFIG: EthConfig = EthConfig::new()
//!     .with_phy(PhyConfig::new(PhyModel::Lan87xx, 1).without_reset())
//!     .with_static_ip(IpInfo::from_host_order(0xC0A8_0132, 0xFFFF_FF00, 0xC0A8_0101));
//! ```

use crate::addr::IpInfo;
use crate::constants::{
    DEFAULT_MDC_GPIO, DEFAULT_MDIO_GPIO, DEFAULT_PHY_ADDR, DEFAULT_PHY_RST_GPIO,
    DEFAULT_REF_CLK_GPIO, FIRST_INPUT_ONLY_GPIO, MAX_GPIO, MAX_PHY_ADDR, MISSING_GPIOS,
    REF_CLK_OUTPUT_GPIOS, RMII_DATA_GPIOS,
};
use crate::error::{ConfigError, ConfigResult};

/// Clock mode for RMII interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RmiiClockMode {
    /// External 50MHz clock input on specified GPIO
    ExternalInput {
        /// GPIO number for clock input (GPIO0 on ESP32)
        gpio: u8,
    },
    /// Internal 50MHz clock output on specified GPIO
    InternalOutput {
        /// GPIO number for clock output (GPIO16 or GPIO17)
        gpio: u8,
    },
}

impl RmiiClockMode {
    /// GPIO carrying the reference clock
    pub const fn gpio(&self) -> u8 {
        match self {
            RmiiClockMode::ExternalInput { gpio } | RmiiClockMode::InternalOutput { gpio } => *gpio,
        }
    }
}

impl Default for RmiiClockMode {
    fn default() -> Self {
        RmiiClockMode::ExternalInput {
            gpio: DEFAULT_REF_CLK_GPIO,
        }
    }
}

/// PHY chip family, selects the vendor driver factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyModel {
    /// Microchip LAN8710/LAN8720
    #[default]
    Lan87xx,
    /// IC Plus IP101
    Ip101,
    /// Realtek RTL8201
    Rtl8201,
    /// TI DP83848
    Dp83848,
    /// Microchip KSZ8041/KSZ8081
    Ksz80xx,
}

/// MAC-side configuration: SMI pins and RMII clocking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacConfig {
    /// MDC GPIO
    pub mdc_gpio: u8,
    /// MDIO GPIO
    pub mdio_gpio: u8,
    /// RMII reference clock source
    pub rmii_clock: RmiiClockMode,
}

impl MacConfig {
    /// Default SMI pins (MDC 23, MDIO 18) with clock input on GPIO0
    pub const fn new() -> Self {
        Self {
            mdc_gpio: DEFAULT_MDC_GPIO,
            mdio_gpio: DEFAULT_MDIO_GPIO,
            rmii_clock: RmiiClockMode::ExternalInput {
                gpio: DEFAULT_REF_CLK_GPIO,
            },
        }
    }

    /// Set the SMI pins
    #[must_use]
    pub const fn with_smi_pins(mut self, mdc_gpio: u8, mdio_gpio: u8) -> Self {
        self.mdc_gpio = mdc_gpio;
        self.mdio_gpio = mdio_gpio;
        self
    }

    /// Set the RMII clock mode
    #[must_use]
    pub const fn with_rmii_clock(mut self, mode: RmiiClockMode) -> Self {
        self.rmii_clock = mode;
        self
    }
}

impl Default for MacConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// PHY-side configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyConfig {
    /// PHY chip family
    pub model: PhyModel,
    /// Address on the SMI bus (0-31)
    pub address: u8,
    /// Hardware reset GPIO, `None` if the line is not wired
    pub reset_gpio: Option<u8>,
}

impl PhyConfig {
    /// PHY of `model` at `address`, reset on the default GPIO
    pub const fn new(model: PhyModel, address: u8) -> Self {
        Self {
            model,
            address,
            reset_gpio: Some(DEFAULT_PHY_RST_GPIO),
        }
    }

    /// Set the reset GPIO
    #[must_use]
    pub const fn with_reset_gpio(mut self, gpio: u8) -> Self {
        self.reset_gpio = Some(gpio);
        self
    }

    /// No reset line; the platform falls back to a soft reset
    #[must_use]
    pub const fn without_reset(mut self) -> Self {
        self.reset_gpio = None;
        self
    }
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self::new(PhyModel::Lan87xx, DEFAULT_PHY_ADDR)
    }
}

/// How the interface obtains its IPv4 address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    /// Run the platform DHCP client
    #[default]
    Dhcp,
    /// Stop the DHCP client and assign this triple
    Static(IpInfo),
}

impl AddressMode {
    /// True when the DHCP client stays enabled
    pub const fn is_dhcp(&self) -> bool {
        matches!(self, AddressMode::Dhcp)
    }
}

/// Complete interface configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EthConfig {
    /// MAC-side pins and clocking
    pub mac: MacConfig,
    /// PHY chip and wiring
    pub phy: PhyConfig,
    /// DHCP or static addressing
    pub address_mode: AddressMode,
}

impl EthConfig {
    /// LAN87xx at address 0, reset GPIO5, MDC GPIO23, MDIO GPIO18, DHCP
    pub const fn new() -> Self {
        Self {
            mac: MacConfig::new(),
            phy: PhyConfig::new(PhyModel::Lan87xx, DEFAULT_PHY_ADDR),
            address_mode: AddressMode::Dhcp,
        }
    }

    /// Set the MAC configuration
    #[must_use]
    pub const fn with_mac(mut self, mac: MacConfig) -> Self {
        self.mac = mac;
        self
    }

    /// Set the PHY configuration
    #[must_use]
    pub const fn with_phy(mut self, phy: PhyConfig) -> Self {
        self.phy = phy;
        self
    }

    /// Set the address mode
    #[must_use]
    pub const fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = mode;
        self
    }

    /// Use DHCP
    #[must_use]
    pub const fn with_dhcp(self) -> Self {
        self.with_address_mode(AddressMode::Dhcp)
    }

    /// Use a static address triple
    #[must_use]
    pub const fn with_static_ip(self, info: IpInfo) -> Self {
        self.with_address_mode(AddressMode::Static(info))
    }

    /// Check pins, PHY address and static addressing.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.phy.address > MAX_PHY_ADDR {
            return Err(ConfigError::InvalidPhyAddress);
        }

        check_output_gpio(self.mac.mdc_gpio)?;
        check_output_gpio(self.mac.mdio_gpio)?;
        if let Some(reset) = self.phy.reset_gpio {
            check_output_gpio(reset)?;
        }
        match self.mac.rmii_clock {
            RmiiClockMode::ExternalInput { gpio } if gpio != DEFAULT_REF_CLK_GPIO => {
                return Err(ConfigError::InvalidGpio);
            }
            RmiiClockMode::InternalOutput { gpio } if !REF_CLK_OUTPUT_GPIOS.contains(&gpio) => {
                return Err(ConfigError::InvalidGpio);
            }
            _ => {}
        }

        let clock = self.mac.rmii_clock.gpio();
        let pins = [
            Some(self.mac.mdc_gpio),
            Some(self.mac.mdio_gpio),
            self.phy.reset_gpio,
            Some(clock),
        ];
        for (i, a) in pins.iter().enumerate() {
            if a.is_some() && pins[i + 1..].contains(a) {
                return Err(ConfigError::PinConflict);
            }
        }

        if let AddressMode::Static(info) = self.address_mode {
            if info.prefix_len().is_none() {
                return Err(ConfigError::InvalidNetmask);
            }
            if info.ip.is_unspecified() || info.ip.is_broadcast() || info.ip.is_multicast() {
                return Err(ConfigError::InvalidStaticAddress);
            }
        }

        Ok(())
    }
}

impl Default for EthConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_output_gpio(gpio: u8) -> ConfigResult<()> {
    if gpio > MAX_GPIO
        || gpio >= FIRST_INPUT_ONLY_GPIO
        || MISSING_GPIOS.contains(&gpio)
        || RMII_DATA_GPIOS.contains(&gpio)
    {
        return Err(ConfigError::InvalidGpio);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
