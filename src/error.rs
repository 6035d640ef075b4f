//! Error types for Ethernet interface bring-up
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Configuration rejected before any platform call
//! - [`PlatformError`]: Status code reported by the vendor framework
//! - [`BringUpStep`]: Which bring-up step a platform failure belongs to
//! - [`DispatchError`]: Event handler registry failures
//!
//! The unified [`Error`] enum wraps these and is returned by
//! [`EthInterface`](crate::EthInterface) operations.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Detected by [`EthConfig::validate`](crate::EthConfig::validate) before
/// the platform is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// GPIO does not exist, is input-only, or belongs to the RMII data path
    InvalidGpio,
    /// The same GPIO is assigned to more than one signal
    PinConflict,
    /// Static netmask is not a contiguous prefix
    InvalidNetmask,
    /// Static IP address is unspecified, broadcast, or multicast
    InvalidStaticAddress,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::InvalidGpio => "invalid GPIO assignment",
            ConfigError::PinConflict => "GPIO assigned twice",
            ConfigError::InvalidNetmask => "netmask is not contiguous",
            ConfigError::InvalidStaticAddress => "invalid static IP address",
        }
    }
}

// =============================================================================
// Platform Errors
// =============================================================================

/// Status code reported by the vendor networking framework.
///
/// The code is kept verbatim (`esp_err_t` on ESP-IDF) so it can be looked up
/// in the vendor documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlatformError {
    code: i32,
}

impl PlatformError {
    /// Generic failure
    pub const FAIL: Self = Self::new(-1);
    /// Out of memory
    pub const NO_MEM: Self = Self::new(0x101);
    /// Invalid argument
    pub const INVALID_ARG: Self = Self::new(0x102);
    /// Invalid state
    pub const INVALID_STATE: Self = Self::new(0x103);
    /// Requested resource not found
    pub const NOT_FOUND: Self = Self::new(0x105);

    /// Wrap a raw vendor status code
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    /// Raw vendor status code
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Returns a human-readable description for well-known codes
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self.code {
            -1 => "generic failure",
            0x101 => "out of memory",
            0x102 => "invalid argument",
            0x103 => "invalid state",
            0x105 => "not found",
            _ => "vendor error",
        }
    }
}

impl core::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({:#x})", self.as_str(), self.code)
    }
}

// =============================================================================
// Bring-Up Steps
// =============================================================================

/// Bring-up step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpStep {
    /// Create the network-interface object
    CreateInterface,
    /// Configure MAC/PHY and install the combined driver
    InstallDriver,
    /// Attach the driver to the TCP/IP stack
    AttachStack,
    /// Register the link event handler
    RegisterLinkHandler,
    /// Register the IP event handler
    RegisterIpHandler,
    /// Read the hardware address from the driver
    ReadMacAddress,
    /// Stop the DHCP client (static addressing only)
    StopDhcpClient,
    /// Assign the static address triple (static addressing only)
    SetStaticAddress,
    /// Start the driver state machine
    StartDriver,
}

impl core::fmt::Display for BringUpStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BringUpStep {
    /// Returns a human-readable description of the step
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BringUpStep::CreateInterface => "create interface",
            BringUpStep::InstallDriver => "install driver",
            BringUpStep::AttachStack => "attach to stack",
            BringUpStep::RegisterLinkHandler => "register link handler",
            BringUpStep::RegisterIpHandler => "register IP handler",
            BringUpStep::ReadMacAddress => "read MAC address",
            BringUpStep::StopDhcpClient => "stop DHCP client",
            BringUpStep::SetStaticAddress => "set static address",
            BringUpStep::StartDriver => "start driver",
        }
    }
}

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Event handler registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Every handler slot is taken
    Full,
}

impl core::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DispatchError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DispatchError::Full => "no free handler slot",
        }
    }
}

impl From<DispatchError> for PlatformError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::Full => PlatformError::NO_MEM,
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match EthInterface::bring_up(platform, config, &STATE) {
///     Err(Error::Config(ConfigError::InvalidGpio)) => { /* fix wiring */ }
///     Err(Error::BringUp { step: BringUpStep::StartDriver, cause }) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration rejected
    Config(ConfigError),
    /// A bring-up step failed; everything created before it was released
    BringUp {
        /// Failing step
        step: BringUpStep,
        /// Vendor status code
        cause: PlatformError,
    },
    /// Stopping the driver failed during teardown
    Shutdown(PlatformError),
}

impl Error {
    /// Build a bring-up error for `step`
    pub const fn bring_up(step: BringUpStep, cause: PlatformError) -> Self {
        Error::BringUp { step, cause }
    }

    /// The failing bring-up step, if this is a bring-up error
    pub const fn step(&self) -> Option<BringUpStep> {
        match self {
            Error::BringUp { step, .. } => Some(*step),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::BringUp { step, cause } => write!(f, "bring-up: {step}: {cause}"),
            Error::Shutdown(e) => write!(f, "shutdown: {e}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// Result type alias for interface operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration validation
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for vendor framework calls
pub type PlatformResult<T> = core::result::Result<T, PlatformError>;

// =============================================================================
// Unit Tests
// =============================================================================
