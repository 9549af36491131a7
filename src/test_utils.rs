//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing PHY negotiation
//! and interface bring-up on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use core::net::Ipv4Addr;
use std::collections::{HashMap, HashSet};
use std::string::{String, ToString};
use std::vec::Vec;

use crate::backend::{IpStack, MacDriver, MacParams};
use crate::config::{Duplex, LinkSpeed};
use crate::error::{DriverError, IoError, Result};
use crate::hal::mdio::MdioBus;
use crate::internal::phy_regs::lan87xx::{pscsr, reg};
use crate::internal::phy_regs::standard::{bmcr, bmsr, phy_reg};
use crate::net::IpInfo;

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing PHY drivers without hardware
///
/// This allows setting up expected register values and verifying writes.
/// The soft reset bit self-clears like on real hardware.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.setup_lan8742a(0);
/// mdio.simulate_link_up(0, LinkSpeed::Mbps100, Duplex::Full);
///
/// let mut phy = Lan87xx::new(0, PhyModel::Lan8742a);
/// assert!(phy.status(&mut mdio).unwrap().link_up);
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (phy_addr, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// Registers whose reads fail
    failing: RefCell<HashSet<(u8, u8)>>,
    /// Whether the bus should report as busy
    busy: RefCell<bool>,
    /// Number of register reads
    reads: RefCell<usize>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.registers.borrow().get(&(phy_addr, reg_addr)).copied()
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    /// Number of reads issued so far, failed ones included
    pub fn read_count(&self) -> usize {
        *self.reads.borrow()
    }

    /// Make reads of one register fail with a bus error
    pub fn fail_reads(&self, phy_addr: u8, reg_addr: u8) {
        self.failing.borrow_mut().insert((phy_addr, reg_addr));
    }

    /// Set the busy flag
    pub fn set_busy(&self, busy: bool) {
        *self.busy.borrow_mut() = busy;
    }

    /// Setup for a LAN8742A PHY: link down, BCR at the auto-negotiation default
    pub fn setup_lan8742a(&self, phy_addr: u8) {
        self.set_register(phy_addr, phy_reg::PHYIDR1, 0x0007);
        self.set_register(phy_addr, phy_reg::PHYIDR2, 0xC131);
        self.setup_common(phy_addr);
    }

    /// Setup for a LAN8720A PHY
    pub fn setup_lan8720a(&self, phy_addr: u8) {
        self.set_register(phy_addr, phy_reg::PHYIDR1, 0x0007);
        self.set_register(phy_addr, phy_reg::PHYIDR2, 0xC0F1);
        self.setup_common(phy_addr);
    }

    fn setup_common(&self, phy_addr: u8) {
        let bmsr_value = bmsr::TX_FD_CAPABLE
            | bmsr::TX_HD_CAPABLE
            | bmsr::T10_FD_CAPABLE
            | bmsr::T10_HD_CAPABLE
            | bmsr::AN_ABILITY;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_value);
        self.set_register(
            phy_addr,
            phy_reg::BMCR,
            bmcr::SPEED_100 | bmcr::AN_ENABLE | bmcr::DUPLEX_FULL,
        );
        self.set_register(phy_addr, reg::PSCSR, 0x0000);
    }

    /// Simulate the link coming up with a negotiated speed/duplex
    pub fn simulate_link_up(&self, phy_addr: u8, speed: LinkSpeed, duplex: Duplex) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val |= bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);

        let mut pscsr_val = pscsr::AUTODONE;
        pscsr_val |= match speed {
            LinkSpeed::Mbps100 => pscsr::SI_SPEED_100,
            LinkSpeed::Mbps10 => pscsr::SI_SPEED_10,
        };
        if duplex == Duplex::Full {
            pscsr_val |= pscsr::SI_DUPLEX_FULL;
        }
        self.set_register(phy_addr, reg::PSCSR, pscsr_val);
    }

    /// Simulate link going down
    pub fn simulate_link_down(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val &= !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE);
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);
        self.set_register(phy_addr, reg::PSCSR, 0x0000);
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        *self.reads.borrow_mut() += 1;
        if self.failing.borrow().contains(&(phy_addr, reg_addr)) {
            return Err(IoError::Bus.into());
        }
        // Return from register map (default 0 if not set)
        Ok(self.get_register(phy_addr, reg_addr).unwrap_or(0))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));

        let stored = if reg_addr == phy_reg::BMCR {
            value & !bmcr::RESET
        } else {
            value
        };
        self.set_register(phy_addr, reg_addr, stored);

        Ok(())
    }

    fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Mock Reset Pin
// =============================================================================

/// Output pin recording every level it is driven to
#[derive(Debug, Default)]
pub struct MockResetPin {
    levels: Vec<bool>,
    fail: bool,
}

impl MockResetPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pin whose every operation fails
    pub fn failing() -> Self {
        Self {
            levels: Vec::new(),
            fail: true,
        }
    }

    /// Levels driven so far (`true` = high)
    pub fn levels(&self) -> Vec<bool> {
        self.levels.clone()
    }

    fn drive(&mut self, high: bool) -> core::result::Result<(), embedded_hal::digital::ErrorKind> {
        if self.fail {
            return Err(embedded_hal::digital::ErrorKind::Other);
        }
        self.levels.push(high);
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockResetPin {
    type Error = embedded_hal::digital::ErrorKind;
}

impl embedded_hal::digital::OutputPin for MockResetPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(true)
    }
}

// =============================================================================
// Mock MAC Driver
// =============================================================================

/// Call recorded by [`MockMac`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacCall {
    Init(MacParams),
    Start,
}

/// Vendor MAC driver double
#[derive(Debug)]
pub struct MockMac {
    calls: Vec<MacCall>,
    mac: [u8; 6],
    fail_init: bool,
    fail_start: bool,
}

impl MockMac {
    pub const MAC: [u8; 6] = [0x02, 0x00, 0x5E, 0x10, 0x20, 0x30];

    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            mac: Self::MAC,
            fail_init: false,
            fail_start: false,
        }
    }

    pub fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<MacCall> {
        self.calls.clone()
    }

    pub fn started(&self) -> bool {
        self.calls.contains(&MacCall::Start)
    }
}

impl Default for MockMac {
    fn default() -> Self {
        Self::new()
    }
}

impl MacDriver for MockMac {
    fn init(&mut self, params: &MacParams) -> Result<()> {
        self.calls.push(MacCall::Init(*params));
        if self.fail_init {
            return Err(DriverError::InitFailed.into());
        }
        Ok(())
    }

    fn mac_address(&self) -> [u8; 6] {
        self.mac
    }

    fn start(&mut self) -> Result<()> {
        if self.fail_start {
            return Err(DriverError::StartFailed.into());
        }
        self.calls.push(MacCall::Start);
        Ok(())
    }
}

// =============================================================================
// Mock IP Stack
// =============================================================================

/// Call recorded by [`MockIpStack`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpCall {
    SetHostname(String),
    StopDhcp,
    SetIpInfo(IpInfo),
    SetDns(Ipv4Addr),
}

/// IP stack double
#[derive(Debug, Default)]
pub struct MockIpStack {
    calls: Vec<IpCall>,
    info: Option<IpInfo>,
    fail_hostname: bool,
    fail_assign: bool,
}

impl MockIpStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_hostname(&mut self) {
        self.fail_hostname = true;
    }

    pub fn fail_assign(&mut self) {
        self.fail_assign = true;
    }

    /// Simulate a DHCP lease arriving
    pub fn lease(&mut self, info: IpInfo) {
        self.info = Some(info);
    }

    pub fn calls(&self) -> Vec<IpCall> {
        self.calls.clone()
    }
}

impl IpStack for MockIpStack {
    fn set_hostname(&mut self, hostname: &str) -> Result<()> {
        self.calls.push(IpCall::SetHostname(hostname.to_string()));
        if self.fail_hostname {
            return Err(DriverError::HostnameSetFailed.into());
        }
        Ok(())
    }

    fn stop_dhcp(&mut self) -> Result<()> {
        self.calls.push(IpCall::StopDhcp);
        Ok(())
    }

    fn set_ip_info(&mut self, info: &IpInfo) -> Result<()> {
        self.calls.push(IpCall::SetIpInfo(*info));
        if self.fail_assign {
            return Err(DriverError::AddressAssignFailed.into());
        }
        self.info = Some(*info);
        Ok(())
    }

    fn set_dns(&mut self, server: Ipv4Addr) -> Result<()> {
        self.calls.push(IpCall::SetDns(server));
        Ok(())
    }

    fn ip_info(&self) -> Option<IpInfo> {
        self.info
    }
}

// =============================================================================
// Test Assertions
// =============================================================================

/// Assert that a register was written with a specific value
#[macro_export]
macro_rules! assert_reg_written {
    ($mdio:expr, $phy:expr, $reg:expr, $value:expr) => {
        let writes = $mdio.get_writes();
        assert!(
            writes
                .iter()
                .any(|w| w.0 == $phy && w.1 == $reg && w.2 == $value),
            "Expected write to PHY {} reg {} with value 0x{:04X}, but got: {:?}",
            $phy,
            $reg,
            $value,
            writes
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0, 4).unwrap(), 0);

        mdio.set_register(0, 4, 0x1234);
        assert_eq!(mdio.read(0, 4).unwrap(), 0x1234);

        mdio.write(0, 4, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 4).unwrap(), 0x5678);

        assert_eq!(mdio.get_writes(), std::vec![(0, 4, 0x5678)]);
        mdio.clear_writes();
        assert!(mdio.get_writes().is_empty());
    }

    #[test]
    fn mock_mdio_reset_self_clears() {
        let mut mdio = MockMdioBus::new();
        mdio.write(1, phy_reg::BMCR, bmcr::RESET | bmcr::AN_ENABLE).unwrap();
        assert_eq!(mdio.read(1, phy_reg::BMCR).unwrap(), bmcr::AN_ENABLE);
    }

    #[test]
    fn mock_mdio_failing_register() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_reads(0, reg::PSCSR);
        assert!(mdio.read(0, reg::PSCSR).is_err());
        assert!(mdio.read(0, phy_reg::BMSR).is_ok());
        assert!(mdio.read(1, reg::PSCSR).is_ok());
    }

    #[test]
    fn mock_mdio_busy_flag() {
        let mdio = MockMdioBus::new();
        assert!(!mdio.is_busy());
        mdio.set_busy(true);
        assert!(mdio.is_busy());
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0); // Less than 1ms

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1_000_000);
        assert_eq!(delay.total_ms(), 1);
    }

    #[test]
    fn mock_mdio_link_simulation() {
        let mut mdio = MockMdioBus::new();
        mdio.setup_lan8720a(0);

        let bmsr_val = mdio.read(0, phy_reg::BMSR).unwrap();
        assert!(bmsr_val & bmsr::LINK_STATUS == 0);

        mdio.simulate_link_up(0, LinkSpeed::Mbps100, Duplex::Full);
        assert!(mdio.read(0, phy_reg::BMSR).unwrap() & bmsr::LINK_STATUS != 0);
        assert_eq!(
            mdio.read(0, reg::PSCSR).unwrap(),
            pscsr::AUTODONE | pscsr::SI_SPEED_100 | pscsr::SI_DUPLEX_FULL
        );

        mdio.simulate_link_down(0);
        assert!(mdio.read(0, phy_reg::BMSR).unwrap() & bmsr::LINK_STATUS == 0);
        assert_eq!(mdio.read(0, reg::PSCSR).unwrap(), 0);
    }
}
