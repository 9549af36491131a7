//! Typed views of the negotiation registers
//!
//! Each wrapper holds the raw 16-bit register value and exposes named
//! accessors, so speed/duplex/autoneg bits are never combined by hand.
//! `bits()` returns the exact value to put back on the wire.

use crate::config::{Duplex, LinkSpeed, PhyOptions};
use crate::internal::phy_regs::lan87xx::pscsr;
use crate::internal::phy_regs::standard::{bmcr, bmsr};

use super::generic::{AutonegResult, PhyCapabilities};

// =============================================================================
// Basic Control Register
// =============================================================================

/// Basic Control Register (BCR / BMCR, register 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bcr(u16);

impl Bcr {
    /// Wrap a raw register value
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw register value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Configured speed
    pub const fn speed(self) -> LinkSpeed {
        if self.0 & bmcr::SPEED_100 != 0 {
            LinkSpeed::Mbps100
        } else {
            LinkSpeed::Mbps10
        }
    }

    /// Configured duplex
    pub const fn duplex(self) -> Duplex {
        if self.0 & bmcr::DUPLEX_FULL != 0 {
            Duplex::Full
        } else {
            Duplex::Half
        }
    }

    /// Auto-negotiation enabled
    pub const fn autoneg_enabled(self) -> bool {
        self.0 & bmcr::AN_ENABLE != 0
    }

    /// Soft reset still in progress
    pub const fn reset_pending(self) -> bool {
        self.0 & bmcr::RESET != 0
    }

    /// Set the speed bit
    #[must_use]
    pub const fn with_speed(self, speed: LinkSpeed) -> Self {
        match speed {
            LinkSpeed::Mbps100 => Self(self.0 | bmcr::SPEED_100),
            LinkSpeed::Mbps10 => Self(self.0 & !bmcr::SPEED_100),
        }
    }

    /// Set the duplex bit
    #[must_use]
    pub const fn with_duplex(self, duplex: Duplex) -> Self {
        match duplex {
            Duplex::Full => Self(self.0 | bmcr::DUPLEX_FULL),
            Duplex::Half => Self(self.0 & !bmcr::DUPLEX_FULL),
        }
    }

    /// Set the auto-negotiation enable bit
    #[must_use]
    pub const fn with_autoneg(self, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | bmcr::AN_ENABLE)
        } else {
            Self(self.0 & !bmcr::AN_ENABLE)
        }
    }

    /// Set the self-clearing auto-negotiation restart bit
    #[must_use]
    pub const fn with_autoneg_restart(self) -> Self {
        Self(self.0 | bmcr::AN_RESTART)
    }

    /// Apply all three option fields at once
    #[must_use]
    pub const fn with_options(self, opts: PhyOptions) -> Self {
        self.with_speed(opts.speed)
            .with_duplex(opts.duplex)
            .with_autoneg(opts.autoneg)
    }

    /// Decode the configured intent
    pub const fn options(self) -> PhyOptions {
        PhyOptions::new(self.autoneg_enabled(), self.speed(), self.duplex())
    }
}

// =============================================================================
// Basic Status Register
// =============================================================================

/// Basic Status Register (BSR / BMSR, register 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bsr(u16);

impl Bsr {
    /// Wrap a raw register value
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw register value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Link is up
    pub const fn link_up(self) -> bool {
        self.0 & bmsr::LINK_STATUS != 0
    }

    /// Standard auto-negotiation complete bit
    pub const fn autoneg_complete(self) -> bool {
        self.0 & bmsr::AN_COMPLETE != 0
    }

    /// Supported modes advertised by the PHY itself
    pub const fn capabilities(self) -> PhyCapabilities {
        PhyCapabilities {
            speed_100_fd: self.0 & bmsr::TX_FD_CAPABLE != 0,
            speed_100_hd: self.0 & bmsr::TX_HD_CAPABLE != 0,
            speed_10_fd: self.0 & bmsr::T10_FD_CAPABLE != 0,
            speed_10_hd: self.0 & bmsr::T10_HD_CAPABLE != 0,
            auto_negotiation: self.0 & bmsr::AN_ABILITY != 0,
        }
    }
}

// =============================================================================
// PHY Special Control/Status Register
// =============================================================================

/// PHY Special Control/Status Register (register 31, LAN87xx)
///
/// Holds the outcome of the last auto-negotiation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pscsr(u16);

impl Pscsr {
    /// Wrap a raw register value
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw register value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Auto-negotiation done
    pub const fn autodone(self) -> bool {
        self.0 & pscsr::AUTODONE != 0
    }

    /// Negotiated speed indication
    pub const fn speed(self) -> LinkSpeed {
        if self.0 & pscsr::SI_SPEED_100 != 0 {
            LinkSpeed::Mbps100
        } else {
            LinkSpeed::Mbps10
        }
    }

    /// Negotiated duplex indication
    pub const fn duplex(self) -> Duplex {
        if self.0 & pscsr::SI_DUPLEX_FULL != 0 {
            Duplex::Full
        } else {
            Duplex::Half
        }
    }

    /// Decode the negotiated outcome
    ///
    /// The speed indication bits are only meaningful once AUTODONE is set,
    /// so an unfinished cycle always decodes to [`AutonegResult::INCOMPLETE`].
    pub const fn autoneg_result(self) -> AutonegResult {
        if !self.autodone() {
            return AutonegResult::INCOMPLETE;
        }
        AutonegResult {
            complete: true,
            speed: self.speed(),
            duplex: self.duplex(),
        }
    }
}
