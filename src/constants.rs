//! Centralized Constants
//!
//! Compile-time wiring and addressing defaults for the Ethernet interface.
//! [`EthConfig::new`](crate::EthConfig::new) is built entirely from these
//! values; board presets in [`crate::boards`] override them per board.
//!
//! # Organization
//!
//! - **PHY**: management bus address and reset line
//! - **SMI pins**: MDC/MDIO routed through the GPIO matrix
//! - **Clock**: RMII reference clock input
//! - **GPIO limits**: ESP32 pin ranges used by configuration validation
//! - **Addresses**: MAC length and dispatcher sizing

// =============================================================================
// PHY
// =============================================================================

/// Default PHY address on the SMI bus (PHYAD strapped low).
pub const DEFAULT_PHY_ADDR: u8 = 0;

/// Default PHY hardware reset GPIO.
pub const DEFAULT_PHY_RST_GPIO: u8 = 5;

/// Highest valid Clause 22 PHY address (5-bit field).
pub const MAX_PHY_ADDR: u8 = 31;

// =============================================================================
// SMI (MDIO) Pins
// =============================================================================

/// Default MDC (Management Data Clock) GPIO.
pub const DEFAULT_MDC_GPIO: u8 = 23;

/// Default MDIO (Management Data I/O) GPIO.
pub const DEFAULT_MDIO_GPIO: u8 = 18;

// =============================================================================
// Clock
// =============================================================================

/// Default RMII reference clock input GPIO (50 MHz from the PHY or oscillator).
pub const DEFAULT_REF_CLK_GPIO: u8 = 0;

/// GPIOs that can drive the internal 50 MHz RMII clock output.
pub const REF_CLK_OUTPUT_GPIOS: [u8; 2] = [16, 17];

// =============================================================================
// GPIO Limits
// =============================================================================

/// Highest GPIO number on the ESP32.
pub const MAX_GPIO: u8 = 39;

/// First input-only GPIO; pins 34..=39 cannot drive MDC, MDIO or reset.
pub const FIRST_INPUT_ONLY_GPIO: u8 = 34;

/// GPIOs that do not exist on the ESP32 (20, 24, 28..=31).
pub const MISSING_GPIOS: [u8; 6] = [20, 24, 28, 29, 30, 31];

/// GPIOs hard-wired to the RMII data path.
///
/// | Signal | GPIO |
/// |--------|------|
/// | TXD0   | 19   |
/// | TX_EN  | 21   |
/// | TXD1   | 22   |
/// | RXD0   | 25   |
/// | RXD1   | 26   |
/// | CRS_DV | 27   |
pub const RMII_DATA_GPIOS: [u8; 6] = [19, 21, 22, 25, 26, 27];

// =============================================================================
// Addresses
// =============================================================================

/// MAC address length in bytes.
pub const MAC_ADDR_LEN: usize = 6;

/// Handler slots a platform dispatcher needs for one interface (link + IP).
pub const HANDLER_SLOTS_PER_INTERFACE: usize = 2;
