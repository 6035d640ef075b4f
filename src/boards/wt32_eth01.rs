//! WT32-ETH01 board configuration (ESP32 + LAN8720A).

use crate::addr::IpInfo;
use crate::config::{EthConfig, MacConfig, PhyConfig, PhyModel, RmiiClockMode};

/// WT32-ETH01 board configuration constants and helpers.
pub struct Wt32Eth01;

impl Wt32Eth01 {
    // =========================================================================
    // PHY Configuration
    // =========================================================================

    /// PHY address (PHYAD0 is pulled HIGH on WT32-ETH01).
    pub const PHY_ADDR: u8 = 1;

    /// PHY reset GPIO (None = not connected, the driver uses a soft reset).
    pub const PHY_RST_GPIO: Option<u8> = None;

    // =========================================================================
    // SMI (MDIO) Pins
    // =========================================================================

    /// MDC (Management Data Clock) GPIO.
    pub const MDC_GPIO: u8 = 23;

    /// MDIO (Management Data I/O) GPIO.
    pub const MDIO_GPIO: u8 = 18;

    // =========================================================================
    // Clock Configuration
    // =========================================================================

    /// Reference clock input GPIO (50 MHz from external oscillator).
    pub const REF_CLK_GPIO: u8 = 0;

    /// Clock enable GPIO (controls external oscillator power).
    /// The application must drive it HIGH before bring-up.
    pub const CLK_EN_GPIO: u8 = 16;

    // =========================================================================
    // Board Identification
    // =========================================================================

    /// Board name.
    pub const BOARD_NAME: &'static str = "WT32-ETH01";

    /// Board manufacturer.
    pub const MANUFACTURER: &'static str = "Wireless-Tag";

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// MAC-side configuration: SMI pins and external clock on GPIO0.
    #[must_use]
    pub const fn mac_config() -> MacConfig {
        MacConfig::new()
            .with_smi_pins(Self::MDC_GPIO, Self::MDIO_GPIO)
            .with_rmii_clock(RmiiClockMode::ExternalInput {
                gpio: Self::REF_CLK_GPIO,
            })
    }

    /// PHY configuration: LAN8720A at address 1 without a reset line.
    #[must_use]
    pub const fn phy_config() -> PhyConfig {
        PhyConfig::new(PhyModel::Lan87xx, Self::PHY_ADDR).without_reset()
    }

    /// Interface configuration using DHCP.
    #[must_use]
    pub const fn eth_config() -> EthConfig {
        EthConfig::new()
            .with_mac(Self::mac_config())
            .with_phy(Self::phy_config())
    }

    /// Interface configuration with a static address triple.
    #[must_use]
    pub const fn eth_config_static(info: IpInfo) -> EthConfig {
        Self::eth_config().with_static_ip(info)
    }

    /// Get a human-readable description of the board.
    #[must_use]
    pub const fn description() -> &'static str {
        "WT32-ETH01: ESP32 + LAN8720A Ethernet (RMII, 50MHz external clock, PHY addr 1)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddressMode;

    #[test]
    fn pin_assignments_match_board() {
        assert_eq!(Wt32Eth01::PHY_ADDR, 1);
        assert_eq!(Wt32Eth01::CLK_EN_GPIO, 16);
        assert_eq!(Wt32Eth01::REF_CLK_GPIO, 0);
        assert_eq!(Wt32Eth01::MDC_GPIO, 23);
        assert_eq!(Wt32Eth01::MDIO_GPIO, 18);
    }

    #[test]
    fn eth_config_uses_board_wiring() {
        let config = Wt32Eth01::eth_config();

        assert_eq!(config.phy.address, Wt32Eth01::PHY_ADDR);
        assert_eq!(config.phy.reset_gpio, Wt32Eth01::PHY_RST_GPIO);
        assert_eq!(config.mac.mdc_gpio, Wt32Eth01::MDC_GPIO);
        assert_eq!(config.mac.mdio_gpio, Wt32Eth01::MDIO_GPIO);
        assert_eq!(config.mac.rmii_clock.gpio(), Wt32Eth01::REF_CLK_GPIO);
        assert!(config.address_mode.is_dhcp());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn static_config_is_valid() {
        let info = IpInfo::from_host_order(0xC0A8_0132, 0xFFFF_FF00, 0xC0A8_0101);
        let config = Wt32Eth01::eth_config_static(info);

        assert_eq!(config.address_mode, AddressMode::Static(info));
        assert_eq!(config.validate(), Ok(()));
    }
}
