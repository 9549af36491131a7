//! Configuration types for Ethernet interface bring-up
//!
//! Everything the bring-up sequence needs is passed in explicitly through
//! [`EthConfig`]; nothing is read from ambient storage.

use core::net::Ipv4Addr;

use crate::error::{ConfigError, ConfigResult};
use crate::phy::PhyModel;

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkSpeed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// Desired PHY configuration
///
/// Passed by value into [`PhyDriver::apply`](crate::phy::PhyDriver::apply).
/// With `autoneg` set, `speed` and `duplex` still land in the control
/// register and act as the parallel-detect fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyOptions {
    /// Enable auto-negotiation
    pub autoneg: bool,
    /// Configured speed
    pub speed: LinkSpeed,
    /// Configured duplex
    pub duplex: Duplex,
}

impl PhyOptions {
    /// Auto-negotiation with a 100 Mbps full duplex baseline
    pub const AUTO: Self = Self::new(true, LinkSpeed::Mbps100, Duplex::Full);

    /// Create new options
    pub const fn new(autoneg: bool, speed: LinkSpeed, duplex: Duplex) -> Self {
        Self {
            autoneg,
            speed,
            duplex,
        }
    }

    /// Forced speed/duplex with auto-negotiation disabled
    pub const fn forced(speed: LinkSpeed, duplex: Duplex) -> Self {
        Self::new(false, speed, duplex)
    }
}

impl Default for PhyOptions {
    fn default() -> Self {
        Self::AUTO
    }
}

/// Clock mode for the RMII reference clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RmiiClockMode {
    /// External 50MHz clock input on specified GPIO
    ExternalInput {
        /// GPIO number for clock input (typically GPIO0)
        gpio: u8,
    },
    /// Internal 50MHz clock output on specified GPIO
    InternalOutput {
        /// GPIO number for clock output (GPIO0, GPIO16 or GPIO17 on ESP32)
        gpio: u8,
    },
}

impl Default for RmiiClockMode {
    fn default() -> Self {
        RmiiClockMode::ExternalInput { gpio: 0 }
    }
}

/// What to do when the DHCP hostname cannot be set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostnamePolicy {
    /// Log a warning and continue bring-up
    #[default]
    BestEffort,
    /// Abort bring-up with [`DriverError::HostnameSetFailed`](crate::DriverError::HostnameSetFailed)
    Fatal,
}

/// Requested static address triple
///
/// An unspecified address or netmask means the interface is DHCP-managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StaticIpConfig {
    /// Interface address
    pub address: Ipv4Addr,
    /// Network mask
    pub netmask: Ipv4Addr,
    /// Default gateway (may be unspecified)
    pub gateway: Ipv4Addr,
}

impl StaticIpConfig {
    /// No static configuration (DHCP)
    pub const NONE: Self = Self::new(
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::UNSPECIFIED,
    );

    /// Create a static triple
    pub const fn new(address: Ipv4Addr, netmask: Ipv4Addr, gateway: Ipv4Addr) -> Self {
        Self {
            address,
            netmask,
            gateway,
        }
    }

    /// Parse the triple from dotted-quad strings
    ///
    /// Empty strings stand for "not set" and parse as `0.0.0.0`, matching
    /// how configuration storage leaves unset fields.
    pub fn parse(address: &str, netmask: &str, gateway: &str) -> ConfigResult<Self> {
        Ok(Self::new(
            parse_ipv4(address)?,
            parse_ipv4(netmask)?,
            parse_ipv4(gateway)?,
        ))
    }
}

impl Default for StaticIpConfig {
    fn default() -> Self {
        Self::NONE
    }
}

fn parse_ipv4(s: &str) -> ConfigResult<Ipv4Addr> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Ipv4Addr::UNSPECIFIED);
    }
    s.parse().map_err(|_| ConfigError::InvalidAddress)
}

/// Ethernet interface configuration
///
/// # Example
///
/// ```ignore
/// let config = EthConfig::new()
///     .with_phy_addr(1)
///     .with_smi_pins(23, 18)
///     .with_static_ip(StaticIpConfig::new(
///         Ipv4Addr::new(192, 0, 2, 5),
///         Ipv4Addr::new(255, 255, 255, 0),
///         Ipv4Addr::new(192, 0, 2, 1),
///     ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EthConfig<'a> {
    /// Ethernet enabled; when false bring-up succeeds without touching hardware
    pub enable: bool,
    /// PHY model attached to the MAC
    pub phy_model: PhyModel,
    /// PHY bus address (0-31)
    pub phy_addr: u8,
    /// MDC GPIO number
    pub mdc_gpio: u8,
    /// MDIO GPIO number
    pub mdio_gpio: u8,
    /// PHY reset GPIO, if wired
    pub phy_reset_gpio: Option<u8>,
    /// RMII reference clock selection, if the platform needs one
    pub clock_mode: Option<RmiiClockMode>,
    /// Desired PHY link options (register-accessible PHYs only)
    pub phy_opts: PhyOptions,
    /// Requested static addressing
    pub static_ip: StaticIpConfig,
    /// Hostname announced by the DHCP client
    pub dhcp_hostname: Option<&'a str>,
    /// DNS server to configure
    pub nameserver: Option<Ipv4Addr>,
    /// Handling of hostname failures
    pub hostname_policy: HostnamePolicy,
}

impl EthConfig<'_> {
    /// Create a default configuration (enabled, LAN87x0 at address 0, DHCP)
    pub const fn new() -> Self {
        Self {
            enable: true,
            phy_model: PhyModel::Lan87x0,
            phy_addr: 0,
            mdc_gpio: 23,
            mdio_gpio: 18,
            phy_reset_gpio: None,
            clock_mode: None,
            phy_opts: PhyOptions::AUTO,
            static_ip: StaticIpConfig::NONE,
            dhcp_hostname: None,
            nameserver: None,
            hostname_policy: HostnamePolicy::BestEffort,
        }
    }

    /// A disabled configuration
    pub const fn disabled() -> Self {
        Self::new().with_enable(false)
    }

    /// Set the enable flag
    #[must_use]
    pub const fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Set the PHY model
    #[must_use]
    pub const fn with_phy_model(mut self, model: PhyModel) -> Self {
        self.phy_model = model;
        self
    }

    /// Set the PHY bus address
    #[must_use]
    pub const fn with_phy_addr(mut self, addr: u8) -> Self {
        self.phy_addr = addr;
        self
    }

    /// Set the MDC/MDIO pins
    #[must_use]
    pub const fn with_smi_pins(mut self, mdc_gpio: u8, mdio_gpio: u8) -> Self {
        self.mdc_gpio = mdc_gpio;
        self.mdio_gpio = mdio_gpio;
        self
    }

    /// Set the PHY reset GPIO
    #[must_use]
    pub const fn with_phy_reset_gpio(mut self, gpio: u8) -> Self {
        self.phy_reset_gpio = Some(gpio);
        self
    }

    /// Set the RMII clock mode
    #[must_use]
    pub const fn with_clock_mode(mut self, mode: RmiiClockMode) -> Self {
        self.clock_mode = Some(mode);
        self
    }

    /// Set the PHY link options
    #[must_use]
    pub const fn with_phy_opts(mut self, opts: PhyOptions) -> Self {
        self.phy_opts = opts;
        self
    }

    /// Set the hostname failure policy
    #[must_use]
    pub const fn with_hostname_policy(mut self, policy: HostnamePolicy) -> Self {
        self.hostname_policy = policy;
        self
    }

    /// Set a static address triple
    #[must_use]
    pub const fn with_static_ip(mut self, static_ip: StaticIpConfig) -> Self {
        self.static_ip = static_ip;
        self
    }

    /// Set the DNS server
    #[must_use]
    pub const fn with_nameserver(mut self, nameserver: Ipv4Addr) -> Self {
        self.nameserver = Some(nameserver);
        self
    }
}

impl<'a> EthConfig<'a> {
    /// Set the DHCP hostname
    #[must_use]
    pub const fn with_dhcp_hostname(mut self, hostname: &'a str) -> Self {
        self.dhcp_hostname = Some(hostname);
        self
    }
}

impl Default for EthConfig<'_> {
    fn default() -> Self {
        Self::new()
    }
}
