//! LAN87xx Vendor-Specific Register Definitions
//!
//! Register definitions shared by the Microchip/SMSC LAN8720A and LAN8742A
//! 10/100 PHYs. Both parts expose the same PHY Special Control/Status
//! register layout, which is where the negotiated speed and duplex live.
//!
//! # References
//!
//! - LAN8720A Datasheet (DS00002165)
//! - LAN8742A Datasheet (DS00001989)

/// PHY identifier constants
pub mod phy_id {
    /// LAN8720A identifier (PHYIDR1 = 0x0007, PHYIDR2 = 0xC0Fx)
    pub const LAN8720A: u32 = 0x0007_C0F0;
    /// LAN8742A identifier (PHYIDR1 = 0x0007, PHYIDR2 = 0xC13x)
    pub const LAN8742A: u32 = 0x0007_C130;
    /// PHY ID mask (ignores revision bits)
    pub const MASK: u32 = 0xFFFF_FFF0;
}

/// Internal timing constants
pub mod timing {
    /// Settling delay after a control register change, in milliseconds
    pub const CONFIG_SETTLE_MS: u32 = 500;
    /// Maximum soft reset polling iterations
    pub const RESET_MAX_ATTEMPTS: u32 = 1000;
    /// Hardware reset pulse duration in microseconds (minimum 100µs per datasheet)
    pub const RESET_PULSE_US: u32 = 200;
    /// Hardware reset recovery time in microseconds (minimum 800µs per datasheet)
    pub const RESET_RECOVERY_US: u32 = 1000;
}

/// Vendor-specific register addresses
pub mod reg {
    /// PHY Special Control/Status Register
    pub const PSCSR: u8 = 31;
}

/// PHY Special Control/Status Register (31) bits
pub mod pscsr {
    /// AUTODONE - Auto-negotiation done (read-only)
    pub const AUTODONE: u16 = 1 << 12;
    /// Speed indication: full duplex
    pub const SI_DUPLEX_FULL: u16 = 1 << 4;
    /// Speed indication: 100BASE-TX
    pub const SI_SPEED_100: u16 = 1 << 3;
    /// Speed indication: 10BASE-T
    #[cfg(test)]
    pub const SI_SPEED_10: u16 = 1 << 2;
}
