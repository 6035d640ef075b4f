//! Board-specific pin mappings.
//!
//! Each board helper turns the wiring of one ESP32 Ethernet board into a
//! ready-to-use [`EthConfig`](crate::EthConfig), so bring-up code does not
//! repeat PHY addresses and GPIO numbers.
//!
//! # Supported Boards
//!
//! - WT32-ETH01 (LAN8720A, external 50 MHz oscillator)
//!
//! Boards not listed here can use [`EthConfig::new`](crate::EthConfig::new)
//! (LAN87xx at address 0, reset GPIO5, MDC GPIO23, MDIO GPIO18) or build a
//! configuration with the `with_*` methods.

#[cfg(feature = "esp32")]
#[cfg_attr(docsrs, doc(cfg(feature = "esp32")))]
pub mod wt32_eth01;
