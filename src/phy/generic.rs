//! Generic PHY Driver Trait
//!
//! This module defines the common interface for register-accessible PHYs
//! and the snapshot types the negotiation layer reports, based on the
//! IEEE 802.3 Clause 22 standard registers.

use embedded_hal::delay::DelayNs;

use crate::config::{Duplex, LinkSpeed, PhyOptions};
use crate::error::Result;
use crate::hal::mdio::MdioBus;

// =============================================================================
// PHY Models
// =============================================================================

/// Known PHY chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyModel {
    /// Microchip/SMSC LAN8710/LAN8720 family
    #[default]
    Lan87x0,
    /// Microchip LAN8742A
    Lan8742a,
    /// Texas Instruments TLK110
    Tlk110,
}

impl PhyModel {
    /// Display name used in bring-up logs
    pub const fn name(self) -> &'static str {
        match self {
            PhyModel::Lan87x0 => "LAN87x0",
            PhyModel::Lan8742a => "LAN8742a",
            PhyModel::Tlk110 => "TLK110",
        }
    }

    /// Expected `(PHYIDR1 << 16) | PHYIDR2` with the revision nibble cleared
    pub const fn id(self) -> u32 {
        use crate::internal::phy_regs::lan87xx::phy_id;
        match self {
            PhyModel::Lan87x0 => phy_id::LAN8720A,
            PhyModel::Lan8742a => phy_id::LAN8742A,
            PhyModel::Tlk110 => 0x2000_A210,
        }
    }

    /// Check an identifier read from the PHY
    pub const fn matches_id(self, id: u32) -> bool {
        use crate::internal::phy_regs::lan87xx::phy_id;
        (id & phy_id::MASK) == self.id()
    }
}

// =============================================================================
// Status Snapshot
// =============================================================================

/// Outcome of an auto-negotiation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutonegResult {
    /// Auto-negotiation finished
    pub complete: bool,
    /// Negotiated speed
    pub speed: LinkSpeed,
    /// Negotiated duplex
    pub duplex: Duplex,
}

impl AutonegResult {
    /// Value reported while negotiation has not completed
    pub const INCOMPLETE: Self = Self {
        complete: false,
        speed: LinkSpeed::Mbps10,
        duplex: Duplex::Half,
    };
}

impl Default for AutonegResult {
    fn default() -> Self {
        Self::INCOMPLETE
    }
}

/// Point-in-time PHY status
///
/// `opts` is what the control register is configured for; `autoneg` is
/// what the link actually negotiated. The two regularly disagree, e.g.
/// when the partner only supports a lower speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyStatus {
    /// Link is up
    pub link_up: bool,
    /// Configured intent
    pub opts: PhyOptions,
    /// Negotiated outcome
    pub autoneg: AutonegResult,
}

/// Negotiation state of a PHY session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NegotiationState {
    /// No options applied yet
    #[default]
    Unconfigured,
    /// Options applied, no negotiation requested
    Configured,
    /// Negotiation restarted, not finished
    NegotiationPending,
    /// Negotiation finished
    NegotiationComplete,
}

// =============================================================================
// PHY Capabilities
// =============================================================================

/// PHY hardware capabilities
///
/// Indicates what features the PHY chip supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyCapabilities {
    /// Supports 100BASE-TX Full Duplex
    pub speed_100_fd: bool,
    /// Supports 100BASE-TX Half Duplex
    pub speed_100_hd: bool,
    /// Supports 10BASE-T Full Duplex
    pub speed_10_fd: bool,
    /// Supports 10BASE-T Half Duplex
    pub speed_10_hd: bool,
    /// Supports auto-negotiation
    pub auto_negotiation: bool,
}

impl PhyCapabilities {
    /// Default 10/100 Mbps PHY capabilities
    pub const fn standard_10_100() -> Self {
        Self {
            speed_100_fd: true,
            speed_100_hd: true,
            speed_10_fd: true,
            speed_10_hd: true,
            auto_negotiation: true,
        }
    }

    /// Check whether a speed/duplex combination is supported
    pub const fn supports(&self, speed: LinkSpeed, duplex: Duplex) -> bool {
        match (speed, duplex) {
            (LinkSpeed::Mbps100, Duplex::Full) => self.speed_100_fd,
            (LinkSpeed::Mbps100, Duplex::Half) => self.speed_100_hd,
            (LinkSpeed::Mbps10, Duplex::Full) => self.speed_10_fd,
            (LinkSpeed::Mbps10, Duplex::Half) => self.speed_10_hd,
        }
    }
}

// =============================================================================
// PHY Driver Trait
// =============================================================================

/// Trait for register-accessible PHY drivers
///
/// One driver instance is one exclusive session with one PHY: every method
/// takes `&mut self` plus the bus, and nothing here locks. Callers must not
/// share a PHY between owners.
pub trait PhyDriver {
    /// PHY address (0-31)
    fn address(&self) -> u8;

    /// PHY model
    fn model(&self) -> PhyModel;

    /// Current negotiation state
    fn state(&self) -> NegotiationState;

    /// Read and verify the PHY identity and capabilities
    fn probe<M: MdioBus>(&mut self, mdio: &mut M) -> Result<PhyCapabilities>;

    /// Apply link options
    ///
    /// Performs a read-modify-write of the control register. When no bit
    /// changes, nothing is written. After a write the call blocks for the
    /// settling delay so that the next status read is valid.
    fn apply<M: MdioBus, D: DelayNs>(
        &mut self,
        mdio: &mut M,
        delay: &mut D,
        opts: PhyOptions,
    ) -> Result<()>;

    /// Set the auto-negotiation restart bit; does not wait for completion
    fn restart_autoneg<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()>;

    /// Read a status snapshot
    ///
    /// A bus error on any of the registers fails the whole query.
    fn status<M: MdioBus>(&mut self, mdio: &mut M) -> Result<PhyStatus>;
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
pub mod ieee802_3 {
    use super::*;
    use crate::internal::phy_regs::standard::{bmcr, phy_reg};
    use crate::phy::regs::Bsr;

    /// Perform soft reset via BMCR
    pub fn soft_reset<M: MdioBus>(mdio: &mut M, phy_addr: u8, max_attempts: u32) -> Result<()> {
        mdio.write(phy_addr, phy_reg::BMCR, bmcr::RESET)?;

        // Reset bit self-clears
        for _ in 0..max_attempts {
            let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
            if (bmcr_val & bmcr::RESET) == 0 {
                return Ok(());
            }
        }

        // Some PHYs are slow to clear the bit; not treated as a failure
        log::warn!("PHY @ {phy_addr}: reset bit still set after {max_attempts} polls");
        Ok(())
    }

    /// Read PHY ID from PHYIDR1 and PHYIDR2
    pub fn read_phy_id<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
        let id1 = mdio.read(phy_addr, phy_reg::PHYIDR1)? as u32;
        let id2 = mdio.read(phy_addr, phy_reg::PHYIDR2)? as u32;
        Ok((id1 << 16) | id2)
    }

    /// Read capabilities from BMSR
    pub fn read_capabilities<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<PhyCapabilities> {
        let bsr = Bsr::from_bits(mdio.read(phy_addr, phy_reg::BMSR)?);
        Ok(bsr.capabilities())
    }
}
