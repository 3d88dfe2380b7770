//! Error types for the LAN8720 Ethernet adapter
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Invalid pin or PHY address assignments
//! - [`PlatformError`]: Error codes reported by the platform driver stack
//! - [`SetupError`]: A fatal failure during adapter bring-up
//! - [`TeardownError`]: A failure while releasing adapter resources
//! - [`EventError`]: An event that could not be decoded by the link monitor
//!
//! Setup failures are never handed back to the caller of the constructor.
//! They are reported through a panic, mirroring the abort-on-error checks of
//! the underlying driver stack.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors detected while resolving an [`AdapterConfig`]
///
/// [`AdapterConfig`]: crate::AdapterConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// PHY address is neither auto-detect (`-1`) nor in `0..=31`
    InvalidPhyAddress,
    /// MDC or MDIO is not an output-capable GPIO
    InvalidSmiPin,
    /// MDC and MDIO are routed to the same GPIO
    SmiPinConflict,
    /// MDC or MDIO collides with a fixed RMII data or clock pin
    ReservedPin,
    /// PHY reset line is not an output-capable GPIO
    InvalidResetPin,
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
            ConfigError::InvalidSmiPin => "SMI pin is not output-capable",
            ConfigError::SmiPinConflict => "MDC and MDIO share a GPIO",
            ConfigError::ReservedPin => "SMI pin collides with a fixed RMII pin",
            ConfigError::InvalidResetPin => "PHY reset pin is not output-capable",
        }
    }
}

// =============================================================================
// Platform Errors
// =============================================================================

/// Error code reported by the platform driver stack
///
/// The code space follows the `esp_err_t` convention: `0` is success and is
/// never stored here, `-1` is a generic failure, and `0x101..` are the
/// common named codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlatformError(i32);

impl PlatformError {
    /// Generic failure
    pub const FAIL: Self = Self(-1);
    /// Out of memory
    pub const NO_MEM: Self = Self(0x101);
    /// Invalid argument
    pub const INVALID_ARG: Self = Self(0x102);
    /// Invalid state for the requested operation
    pub const INVALID_STATE: Self = Self(0x103);
    /// Requested resource not found
    pub const NOT_FOUND: Self = Self(0x105);
    /// Operation timed out
    pub const TIMEOUT: Self = Self(0x107);

    /// Wrap a raw platform error code
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The raw platform error code
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            -1 => "failure",
            0x101 => "out of memory",
            0x102 => "invalid argument",
            0x103 => "invalid state",
            0x105 => "not found",
            0x107 => "timed out",
            _ => "platform error",
        }
    }
}

impl core::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({:#x})", self.as_str(), self.0)
    }
}

// =============================================================================
// Setup Errors
// =============================================================================

/// The bring-up step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupStep {
    /// Resolving and validating the MAC/PHY configuration
    ResolveConfig,
    /// Installing the default protocol handlers on the interface
    DefaultHandlers,
    /// Installing the Ethernet driver
    InstallDriver,
    /// Attaching the driver glue to the interface
    AttachNetif,
    /// Subscribing to the Ethernet event channel
    SubscribeEthernet,
    /// Subscribing to the IP got-address event
    SubscribeIp,
    /// Starting the driver
    StartDriver,
}

impl SetupStep {
    /// Returns a human-readable name of the step
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SetupStep::ResolveConfig => "resolve config",
            SetupStep::DefaultHandlers => "install default handlers",
            SetupStep::InstallDriver => "install driver",
            SetupStep::AttachNetif => "attach netif glue",
            SetupStep::SubscribeEthernet => "subscribe ethernet events",
            SetupStep::SubscribeIp => "subscribe ip events",
            SetupStep::StartDriver => "start driver",
        }
    }
}

/// Why a bring-up step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupCause {
    /// The configuration was rejected before touching the platform
    Config(ConfigError),
    /// The platform rejected the call
    Platform(PlatformError),
}

impl core::fmt::Display for SetupCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SetupCause::Config(e) => write!(f, "config: {e}"),
            SetupCause::Platform(e) => write!(f, "platform: {e}"),
        }
    }
}

/// Fatal failure during adapter bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupError {
    /// Step that failed
    pub step: SetupStep,
    /// Underlying cause
    pub cause: SetupCause,
}

impl SetupError {
    /// A platform call failed during `step`
    #[must_use]
    pub const fn platform(step: SetupStep, error: PlatformError) -> Self {
        Self {
            step,
            cause: SetupCause::Platform(error),
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        Self {
            step: SetupStep::ResolveConfig,
            cause: SetupCause::Config(e),
        }
    }
}

impl core::fmt::Display for SetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} failed: {}", self.step.as_str(), self.cause)
    }
}

// =============================================================================
// Teardown Errors
// =============================================================================

/// The teardown step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TeardownStep {
    /// Stopping the driver
    StopDriver,
    /// Removing the IP event subscription
    UnsubscribeIp,
    /// Removing the Ethernet event subscription
    UnsubscribeEthernet,
    /// Deleting the netif glue
    DeleteGlue,
    /// Uninstalling the driver
    UninstallDriver,
}

impl TeardownStep {
    /// Returns a human-readable name of the step
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TeardownStep::StopDriver => "stop driver",
            TeardownStep::UnsubscribeIp => "unsubscribe ip events",
            TeardownStep::UnsubscribeEthernet => "unsubscribe ethernet events",
            TeardownStep::DeleteGlue => "delete netif glue",
            TeardownStep::UninstallDriver => "uninstall driver",
        }
    }
}

/// Failure while releasing adapter resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TeardownError {
    /// Step that failed
    pub step: TeardownStep,
    /// Platform error code
    pub cause: PlatformError,
}

impl core::fmt::Display for TeardownError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} failed: {}", self.step.as_str(), self.cause)
    }
}

// =============================================================================
// Event Errors
// =============================================================================

/// An event the link monitor recognized but could not decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// Payload shape does not match the (channel, id) pair
    PayloadMismatch,
    /// The driver refused the hardware address query
    AddressQuery(PlatformError),
}

impl core::fmt::Display for EventError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EventError::PayloadMismatch => f.write_str("payload does not match event"),
            EventError::AddressQuery(e) => write!(f, "hardware address query: {e}"),
        }
    }
}

impl From<PlatformError> for EventError {
    fn from(e: PlatformError) -> Self {
        EventError::AddressQuery(e)
    }
}

/// Result type alias for configuration resolution
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for platform calls
pub type PlatformResult<T> = core::result::Result<T, PlatformError>;

/// Result type alias for event decoding
pub type EventResult<T> = core::result::Result<T, EventError>;

// =============================================================================
// Unit Tests
// =============================================================================
