//! Per-platform interface bring-up
//!
//! Each platform composes the same steps out of the vendor MAC driver and
//! IP stack it is handed:
//!
//! 1. `MacDriver::init` with the pins and PHY address from the config
//! 2. PHY options, where the PHY registers are reachable (STM32 only)
//! 3. Addressing: hostname for DHCP, or stop DHCP then assign the static triple
//! 4. `MacDriver::start`
//! 5. One summary log line
//!
//! Any failure aborts the sequence and the interface is never started.
//!
//! | Backend | Platform | PHY access |
//! |---------|----------|------------|
//! | [`EspBackend`] | ESP32 | vendor driver owns the PHY |
//! | [`StmBackend`] | STM32 | [`Lan87xx`](crate::phy::Lan87xx) over MDIO |
//! | `HostBackend` | Linux/Unix (feature `std`) | none; reads the OS configuration |

pub mod esp;
#[cfg(feature = "std")]
pub mod host;
pub mod stm;

pub use esp::{EspBackend, EspEventBase, EspEventCode};
#[cfg(feature = "std")]
pub use host::HostBackend;
pub use stm::StmBackend;

use core::net::Ipv4Addr;

use crate::config::{EthConfig, HostnamePolicy, RmiiClockMode};
use crate::error::{DriverError, Result, ResolveResult};
use crate::net::{AddressMode, InterfaceId, IpInfo, NetEvent};
use crate::phy::PhyModel;

// =============================================================================
// Platform Identity
// =============================================================================

/// Platform variant a backend implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Platform {
    /// ESP32 with the vendor Ethernet driver
    Esp32,
    /// STM32 with a register-accessible PHY
    Stm32,
    /// Desktop host, configuration read from the OS
    Host,
}

impl Platform {
    /// Short name for logs
    pub const fn name(self) -> &'static str {
        match self {
            Platform::Esp32 => "esp32",
            Platform::Stm32 => "stm32",
            Platform::Host => "host",
        }
    }
}

/// Result of a successful bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceHandle {
    /// Interface tag used on events
    pub id: InterfaceId,
    /// Platform that brought the interface up
    pub platform: Platform,
    /// MAC address reported by the driver
    pub mac: [u8; 6],
    /// PHY attached, if known
    pub phy: Option<PhyModel>,
}

// =============================================================================
// Vendor Collaborators
// =============================================================================

/// Parameters handed to the vendor MAC driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacParams {
    /// PHY model
    pub phy_model: PhyModel,
    /// PHY bus address
    pub phy_addr: u8,
    /// MDC GPIO number
    pub mdc_gpio: u8,
    /// MDIO GPIO number
    pub mdio_gpio: u8,
    /// PHY reset GPIO
    pub phy_reset_gpio: Option<u8>,
    /// RMII reference clock selection
    pub clock_mode: Option<RmiiClockMode>,
}

impl MacParams {
    /// Extract the driver parameters from a configuration
    pub const fn from_config(config: &EthConfig<'_>) -> Self {
        Self {
            phy_model: config.phy_model,
            phy_addr: config.phy_addr,
            mdc_gpio: config.mdc_gpio,
            mdio_gpio: config.mdio_gpio,
            phy_reset_gpio: config.phy_reset_gpio,
            clock_mode: config.clock_mode,
        }
    }
}

/// Vendor MAC driver
///
/// Implementations wrap the platform SDK (pin-mux, clocking, DMA). Failures
/// should be reported as [`DriverError::InitFailed`] or
/// [`DriverError::StartFailed`].
pub trait MacDriver {
    /// Construct the driver handle and configure pins
    fn init(&mut self, params: &MacParams) -> Result<()>;

    /// Hardware address
    fn mac_address(&self) -> [u8; 6];

    /// Enable the interface
    fn start(&mut self) -> Result<()>;
}

/// Vendor IP stack adapter
pub trait IpStack {
    /// Hostname announced by the DHCP client
    fn set_hostname(&mut self, hostname: &str) -> Result<()>;

    /// Stop the DHCP client
    fn stop_dhcp(&mut self) -> Result<()>;

    /// Assign an address triple
    fn set_ip_info(&mut self, info: &IpInfo) -> Result<()>;

    /// Configure a DNS server
    fn set_dns(&mut self, server: Ipv4Addr) -> Result<()>;

    /// Currently assigned configuration, `None` before any assignment
    fn ip_info(&self) -> Option<IpInfo>;
}

/// A platform's bring-up strategy
pub trait NetifBackend {
    /// Platform variant
    const PLATFORM: Platform;

    /// Run the bring-up sequence for an enabled configuration
    fn bring_up(&mut self, config: &EthConfig<'_>) -> Result<InterfaceHandle>;

    /// Current address configuration of interface `instance`
    ///
    /// [`ResolveError::NotAvailable`](crate::ResolveError::NotAvailable)
    /// until an address has been assigned.
    fn ip_info(&mut self, instance: u8) -> ResolveResult<IpInfo>;

    /// Sample the platform for a status change
    ///
    /// The change stays pending, and is reported again by the next `poll`,
    /// until it is passed to [`commit`](Self::commit). Interrupt-driven
    /// platforms deliver events through their vendor dispatcher instead and
    /// keep the default.
    fn poll(&mut self) -> Result<Option<NetEvent>> {
        Ok(None)
    }

    /// Record that `event` from [`poll`](Self::poll) was delivered
    fn commit(&mut self, _event: &NetEvent) {}
}

// =============================================================================
// Shared Steps
// =============================================================================

/// Log a fatal bring-up step and pass the error on
pub(crate) fn fail(params: &MacParams, step: &str, err: crate::Error) -> crate::Error {
    log::error!(
        "Eth {} PHY @ {}: {step} failed: {err}",
        params.phy_model.name(),
        params.phy_addr
    );
    err
}

/// Run the common bring-up sequence
///
/// `configure_phy` runs between driver init and addressing; platforms
/// without PHY register access pass a no-op.
pub(crate) fn bring_up_sequence<M, I, F>(
    platform: Platform,
    mac: &mut M,
    ip: &mut I,
    config: &EthConfig<'_>,
    configure_phy: F,
) -> Result<InterfaceHandle>
where
    M: MacDriver,
    I: IpStack,
    F: FnOnce(&MacParams) -> Result<()>,
{
    let params = MacParams::from_config(config);
    log::info!(
        "Eth init: {} PHY @ {} ({})",
        params.phy_model.name(),
        params.phy_addr,
        platform.name()
    );

    mac.init(&params).map_err(|e| fail(&params, "driver init", e))?;
    configure_phy(&params).map_err(|e| fail(&params, "PHY setup", e))?;
    let mode = configure_addressing(ip, config).map_err(|e| fail(&params, "addressing", e))?;
    mac.start().map_err(|e| fail(&params, "start", e))?;

    let handle = InterfaceHandle {
        id: InterfaceId::ethernet(0),
        platform,
        mac: mac.mac_address(),
        phy: Some(params.phy_model),
    };
    log_summary(&handle, &params, &mode);
    Ok(handle)
}

/// Apply the addressing policy to the IP stack
///
/// DHCP mode only announces the hostname. Static mode stops the DHCP
/// client before assigning the triple, so a lease can never overwrite it.
pub(crate) fn configure_addressing<I: IpStack>(
    ip: &mut I,
    config: &EthConfig<'_>,
) -> Result<AddressMode> {
    let mode = AddressMode::resolve(&config.static_ip)?;

    match mode {
        AddressMode::Dhcp => {
            if let Some(hostname) = config.dhcp_hostname
                && let Err(err) = ip.set_hostname(hostname)
            {
                match config.hostname_policy {
                    HostnamePolicy::Fatal => return Err(DriverError::HostnameSetFailed.into()),
                    HostnamePolicy::BestEffort => {
                        log::warn!("Eth: failed to set hostname {hostname}: {err}");
                    }
                }
            }
        }
        AddressMode::Static(info) => {
            ip.stop_dhcp()?;
            ip.set_ip_info(&info)?;
        }
    }

    if let Some(server) = config.nameserver {
        ip.set_dns(server)?;
    }

    Ok(mode)
}

/// Assigned address, or `NotAvailable`
pub(crate) fn assigned<I: IpStack>(ip: &I, instance: u8) -> ResolveResult<IpInfo> {
    if instance != 0 {
        return Err(crate::ResolveError::NotAvailable);
    }
    ip.ip_info()
        .filter(IpInfo::is_assigned)
        .ok_or(crate::ResolveError::NotAvailable)
}

/// Bring-up summary line
pub(crate) fn log_summary(handle: &InterfaceHandle, params: &MacParams, mode: &AddressMode) {
    let [a, b, c, d, e, f] = handle.mac;
    let phy = handle.phy.map_or("-", PhyModel::name);
    match mode {
        AddressMode::Dhcp => log::info!(
            "ETH: MAC {a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{f:02x}; PHY: {phy} @ {}; IP: DHCP",
            params.phy_addr
        ),
        AddressMode::Static(info) => log::info!(
            "ETH: MAC {a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{f:02x}; PHY: {phy} @ {}; IP: {}/{}, GW: {}",
            params.phy_addr,
            info.address,
            info.netmask,
            info.gateway
        ),
    }
}
