//! ESP32 Ethernet Interface
//!
//! A `no_std`, `no_alloc` bring-up layer for wired Ethernet on the ESP32,
//! sitting on top of the vendor networking framework.
//!
//! This crate configures the internal EMAC and an external RMII PHY, attaches
//! the interface to the TCP/IP stack with DHCP or a static address, and keeps
//! a small connection cache that any task can query.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! 1. **Interface** ([`EthInterface`]): ordered bring-up with rollback, and shutdown
//! 2. **State** ([`ConnectionState`]): link/IP event handlers and the connection cache
//! 3. **Platform** ([`EthPlatform`]): the vendor SDK calls the interface is built from
//!
//! Events from the vendor event loop reach the cache through [`EventHandler`];
//! platform implementations can fan them out with [`EventDispatcher`].
//!
//! # Supported PHY Chips
//!
//! - [`PhyModel::Lan87xx`]: Microchip/SMSC LAN8720A family (default)
//! - [`PhyModel::Ip101`], [`PhyModel::Rtl8201`], [`PhyModel::Dp83848`],
//!   [`PhyModel::Ksz80xx`]
//!
//! This release targets ESP32 only.
//!
//! # Features
//!
//! - `esp32` (default): Target the original ESP32 and enable board presets
//! - `defmt`: Enable defmt logging and formatting
//! - `smoltcp`: Enable smoltcp network stack integration
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_eth::{ConnectionState, EthConfig, EthInterface, IpInfo};
//!
//! static STATE: ConnectionState = ConnectionState::new();
//!
//! // NVS, netif and the default event loop are already initialized.
//! let eth = EthInterface::bring_up(EspIdf, EthConfig::new(), &STATE)?;
//!
//! // From any task:
//! if let Some(info) = STATE.info() {
//!     defmt::info!("ip {}", info.ip_u32());
//! }
//!
//! // Static addressing instead of DHCP:
//! let config = EthConfig::new().with_static_ip(IpInfo::from_host_order(
//!     0xC0A8_0132, // 192.168.1.50
//!     0xFFFF_FF00, // 255.255.255.0
//!     0xC0A8_0101, // 192.168.1.1
//! ));
//! ```
//!
//! # Pin Assignments
//!
//! The RMII data pins use **dedicated internal routing** and are fixed; see
//! [`constants::RMII_DATA_GPIOS`]. Only MDC, MDIO, the PHY reset line and the
//! reference clock pin are configurable. Board presets such as
//! [`boards::wt32_eth01::Wt32Eth01`] fill these in for known boards.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels mirror the [lints] table in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

#[cfg(not(feature = "esp32"))]
compile_error!("Feature 'esp32' must be enabled. It is on by default.");

// =============================================================================
// Modules
// =============================================================================

pub mod addr;
#[cfg(feature = "esp32")]
#[cfg_attr(docsrs, doc(cfg(feature = "esp32")))]
pub mod boards;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod interface;
pub mod platform;
pub mod state;
pub mod sync;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use addr::{IpInfo, MacAddress};
pub use config::{AddressMode, EthConfig, MacConfig, PhyConfig, PhyModel, RmiiClockMode};
pub use error::{
    BringUpStep, ConfigError, ConfigResult, DispatchError, Error, PlatformError, PlatformResult,
    Result,
};
pub use event::{
    EthEvent, Event, EventCategory, EventDispatcher, EventHandler, HandlerRef, IpEvent,
};
pub use interface::EthInterface;
pub use platform::EthPlatform;
pub use state::{ConnectionInfo, ConnectionState, LinkPhase, StaleAddressPolicy};
pub use sync::CriticalSectionCell;

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static connection cache.
///
/// The cache must be `'static` because the vendor event loop keeps a
/// reference to it for as long as the interface is up.
///
/// # Examples
///
/// ```ignore
/// ph_esp32_eth::eth_state_static!(ETH_STATE);
/// ph_esp32_eth::eth_state_static!(ETH_STATE_RETAIN, StaleAddressPolicy::Retain);
///
/// let eth = EthInterface::bring_up(platform, EthConfig::new(), &ETH_STATE)?;
/// ```
#[macro_export]
macro_rules! eth_state_static {
    ($name:ident) => {
        static $name: $crate::ConnectionState = $crate::ConnectionState::new();
    };
    ($name:ident, $policy:expr) => {
        static $name: $crate::ConnectionState = $crate::ConnectionState::with_policy($policy);
    };
}
