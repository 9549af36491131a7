//! ESP32 backend
//!
//! The vendor Ethernet driver owns the PHY: it is only told the model and
//! address, and link changes arrive through the vendor event dispatcher.
//! [`EspEventCode`] maps those raw ids onto typed events.

use crate::config::EthConfig;
use crate::error::{Result, ResolveResult};
use crate::net::IpInfo;

use super::{
    InterfaceHandle, IpStack, MacDriver, NetifBackend, Platform, assigned, bring_up_sequence,
};

// =============================================================================
// Vendor Event Codes
// =============================================================================

/// Vendor event base an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EspEventBase {
    /// `ETH_EVENT`
    Eth,
    /// `IP_EVENT`
    Ip,
}

/// Vendor dispatcher events relevant to a wired interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EspEventCode {
    /// `ETHERNET_EVENT_START`
    Start,
    /// `ETHERNET_EVENT_STOP`
    Stop,
    /// `ETHERNET_EVENT_CONNECTED`
    Connected,
    /// `ETHERNET_EVENT_DISCONNECTED`
    Disconnected,
    /// `IP_EVENT_ETH_GOT_IP`
    GotIp,
}

impl EspEventCode {
    /// Map a raw `(base, id)` pair; ids outside this set yield `None`
    pub const fn from_raw(base: EspEventBase, id: i32) -> Option<Self> {
        match (base, id) {
            (EspEventBase::Eth, 0) => Some(EspEventCode::Start),
            (EspEventBase::Eth, 1) => Some(EspEventCode::Stop),
            (EspEventBase::Eth, 2) => Some(EspEventCode::Connected),
            (EspEventBase::Eth, 3) => Some(EspEventCode::Disconnected),
            (EspEventBase::Ip, 4) => Some(EspEventCode::GotIp),
            _ => None,
        }
    }
}

// =============================================================================
// Backend
// =============================================================================

/// ESP32 bring-up over the vendor driver
#[derive(Debug)]
pub struct EspBackend<M, I> {
    mac: M,
    ip: I,
}

impl<M: MacDriver, I: IpStack> EspBackend<M, I> {
    /// Create a backend from the vendor driver and IP stack adapters
    pub const fn new(mac: M, ip: I) -> Self {
        Self { mac, ip }
    }

    /// MAC driver
    pub fn mac(&self) -> &M {
        &self.mac
    }

    /// IP stack adapter
    pub fn ip_stack(&self) -> &I {
        &self.ip
    }

    /// Mutable IP stack adapter
    pub fn ip_stack_mut(&mut self) -> &mut I {
        &mut self.ip
    }

    /// Address carried by a `GotIp` event
    pub(crate) fn acquired(&self) -> Option<IpInfo> {
        self.ip.ip_info().filter(IpInfo::is_assigned)
    }
}

impl<M: MacDriver, I: IpStack> NetifBackend for EspBackend<M, I> {
    const PLATFORM: Platform = Platform::Esp32;

    fn bring_up(&mut self, config: &EthConfig<'_>) -> Result<InterfaceHandle> {
        bring_up_sequence(Self::PLATFORM, &mut self.mac, &mut self.ip, config, |_| Ok(()))
    }

    fn ip_info(&mut self, instance: u8) -> ResolveResult<IpInfo> {
        assigned(&self.ip, instance)
    }
}
