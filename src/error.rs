//! Error types for Ethernet interface bring-up
//!
//! Errors are organized by domain for better diagnostics:
//! - [`IoError`]: PHY bus and event delivery failures
//! - [`ConfigError`]: Invalid configuration or unsupported link modes
//! - [`DriverError`]: Vendor MAC driver and IP stack failures during bring-up
//! - [`ResolveError`]: Address and default-route resolution failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most operations.

// =============================================================================
// I/O Errors
// =============================================================================

/// PHY bus and event delivery errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// PHY register read/write failed (PHY unreachable or bus fault)
    Bus,
    /// Operation timed out
    Timeout,
    /// Event queue has no free slot
    QueueFull,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Bus => "PHY bus error",
            IoError::Timeout => "operation timed out",
            IoError::QueueFull => "event queue full",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// These errors mean the request itself cannot be honored, independent of
/// the hardware state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// Invalid PHY register address (must be 0-31)
    InvalidRegister,
    /// Requested speed/duplex combination is not supported by the PHY
    UnsupportedLinkMode,
    /// Address string could not be parsed
    InvalidAddress,
    /// Netmask is not a contiguous prefix
    InvalidNetmask,
    /// PHY identifier does not match the expected model
    PhyIdMismatch,
    /// GPIO configuration error (reset pin)
    GpioError,
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
            ConfigError::InvalidRegister => "invalid PHY register",
            ConfigError::UnsupportedLinkMode => "unsupported speed/duplex",
            ConfigError::InvalidAddress => "invalid IPv4 address",
            ConfigError::InvalidNetmask => "invalid netmask",
            ConfigError::PhyIdMismatch => "unexpected PHY identifier",
            ConfigError::GpioError => "GPIO configuration error",
        }
    }
}

// =============================================================================
// Driver Errors
// =============================================================================

/// Vendor driver and IP stack errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// MAC driver handle construction failed
    InitFailed,
    /// MAC driver refused to start
    StartFailed,
    /// DHCP hostname could not be set
    HostnameSetFailed,
    /// DHCP client could not be stopped or started
    DhcpControlFailed,
    /// Static address could not be assigned
    AddressAssignFailed,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DriverError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DriverError::InitFailed => "driver init failed",
            DriverError::StartFailed => "driver start failed",
            DriverError::HostnameSetFailed => "failed to set hostname",
            DriverError::DhcpControlFailed => "DHCP client control failed",
            DriverError::AddressAssignFailed => "failed to assign address",
        }
    }
}

// =============================================================================
// Resolution Errors
// =============================================================================

/// Address and route resolution errors
///
/// Each cause is distinct so the caller can log precisely what was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResolveError {
    /// Interface enumeration returned nothing
    NoInterfacesFound,
    /// Routing table has no default route
    NoDefaultRoute,
    /// Interface owning the default route has no IPv4 address
    AddressLookupFailed,
    /// No address assigned yet
    NotAvailable,
}

impl core::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResolveError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResolveError::NoInterfacesFound => "no interfaces found",
            ResolveError::NoDefaultRoute => "no default route",
            ResolveError::AddressLookupFailed => "interface address lookup failed",
            ResolveError::NotAvailable => "IP configuration not available",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Io(IoError::Bus)) => { /* PHY unreachable */ }
///     Err(Error::Resolve(ResolveError::NoDefaultRoute)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// I/O error
    Io(IoError),
    /// Configuration error
    Config(ConfigError),
    /// Driver error
    Driver(DriverError),
    /// Resolution error
    Resolve(ResolveError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Driver(e) => write!(f, "driver: {}", e.as_str()),
            Error::Resolve(e) => write!(f, "resolve: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

impl From<ResolveError> for Error {
    fn from(e: ResolveError) -> Self {
        Error::Resolve(e)
    }
}

/// Result type alias for most operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration validation
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for address resolution
pub type ResolveResult<T> = core::result::Result<T, ResolveError>;

// =============================================================================
// Unit Tests
// =============================================================================
