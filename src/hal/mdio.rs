//! MDIO (Management Data Input/Output) HAL
//!
//! The PHY register driver: raw 16-bit register reads and writes on a
//! PHY reached over the MDIO bus. No bit interpretation happens here.
//!
//! The bus is implemented by the platform (the vendor HAL's
//! `ReadPHYRegister`/`WritePHYRegister` pair, or a MAC's SMI block).
//! Implementations have no internal locking; one owner per bus.

use crate::error::{ConfigError, Result};

// =============================================================================
// MDIO Constants
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// A failed transfer should be reported as
/// [`IoError::Bus`](crate::IoError::Bus).
///
/// After writing a control register the PHY needs time to re-stabilize;
/// callers must delay before trusting subsequent status reads.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;

    /// Check if the MDIO bus is busy
    fn is_busy(&self) -> bool {
        false
    }
}

impl<M: MdioBus + ?Sized> MdioBus for &mut M {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        (**self).read(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        (**self).write(phy_addr, reg_addr, value)
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }
}

/// Validate PHY and register addresses against the 5-bit MDIO fields
///
/// Bus implementations call this before starting a transfer.
pub const fn check_address(phy_addr: u8, reg_addr: u8) -> core::result::Result<(), ConfigError> {
    if phy_addr > MAX_PHY_ADDR {
        return Err(ConfigError::InvalidPhyAddress);
    }
    if reg_addr > MAX_REG_ADDR {
        return Err(ConfigError::InvalidRegister);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
