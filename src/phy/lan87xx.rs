//! LAN87xx PHY Driver
//!
//! Driver for the Microchip/SMSC LAN8720A and LAN8742A 10/100 Ethernet
//! PHYs. Both parts report the negotiated speed and duplex in the PHY
//! Special Control/Status register (31), which is what [`Lan87xx::status`]
//! decodes.
//!
//! # PHY Address
//!
//! The address is strapped by the PHYAD0 pin: address 0 when tied low,
//! address 1 when tied high. WT32-ETH01 boards strap address 1, Nucleo
//! boards address 0.
//!
//! # Example
//!
//! ```ignore
//! use ph_eth_netif::phy::{Lan87xx, PhyDriver, PhyModel};
//! use ph_eth_netif::PhyOptions;
//!
//! let mut phy = Lan87xx::new(0, PhyModel::Lan8742a);
//! phy.probe(&mut mdio)?;
//! phy.apply(&mut mdio, &mut delay, PhyOptions::AUTO)?;
//! phy.restart_autoneg(&mut mdio)?;
//!
//! let status = phy.status(&mut mdio)?;
//! if status.link_up && status.autoneg.complete {
//!     // negotiated status.autoneg.speed / status.autoneg.duplex
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::PhyOptions;
use crate::error::{ConfigError, Result};
use crate::hal::mdio::MdioBus;
use crate::internal::phy_regs::lan87xx::{reg, timing};
use crate::internal::phy_regs::standard::phy_reg;

use super::generic::{
    NegotiationState, PhyCapabilities, PhyDriver, PhyModel, PhyStatus, ieee802_3,
};
use super::regs::{Bcr, Bsr, Pscsr};

/// LAN87xx PHY Driver
///
/// Holds the per-session negotiation state. Capabilities are unknown until
/// [`probe`](PhyDriver::probe) has run; before that, forced modes are not
/// checked against the PHY.
#[derive(Debug)]
pub struct Lan87xx {
    /// PHY address (0-31)
    addr: u8,
    /// Expected chip
    model: PhyModel,
    /// Negotiation state
    state: NegotiationState,
    /// Capabilities captured by `probe`
    capabilities: Option<PhyCapabilities>,
}

impl Lan87xx {
    /// Create a new driver
    ///
    /// # Arguments
    /// * `addr` - PHY address (typically 0 or 1)
    /// * `model` - Expected PHY model
    pub const fn new(addr: u8, model: PhyModel) -> Self {
        Self {
            addr,
            model,
            state: NegotiationState::Unconfigured,
            capabilities: None,
        }
    }

    /// Capabilities read during `probe`, if it has run
    pub const fn capabilities(&self) -> Option<PhyCapabilities> {
        self.capabilities
    }

    /// Soft reset via the control register
    ///
    /// The PHY returns to its strap defaults, so the session goes back to
    /// `Unconfigured`.
    pub fn soft_reset<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        ieee802_3::soft_reset(mdio, self.addr, timing::RESET_MAX_ATTEMPTS)?;
        self.state = NegotiationState::Unconfigured;
        Ok(())
    }

    /// Pulse the active-low reset pin
    ///
    /// # Timing
    /// - Reset pulse: 200µs (minimum 100µs per datasheet)
    /// - Recovery time: 1ms (minimum 800µs per datasheet)
    pub fn hardware_reset<P: OutputPin, D: DelayNs>(
        &mut self,
        reset_pin: &mut P,
        delay: &mut D,
    ) -> Result<()> {
        reset_pin.set_low().map_err(|_| ConfigError::GpioError)?;
        delay.delay_us(timing::RESET_PULSE_US);

        reset_pin.set_high().map_err(|_| ConfigError::GpioError)?;
        delay.delay_us(timing::RESET_RECOVERY_US);

        self.state = NegotiationState::Unconfigured;
        Ok(())
    }

    fn read_bcr<M: MdioBus>(&self, mdio: &mut M) -> Result<Bcr> {
        Ok(Bcr::from_bits(mdio.read(self.addr, phy_reg::BMCR)?))
    }
}

impl PhyDriver for Lan87xx {
    fn address(&self) -> u8 {
        self.addr
    }

    fn model(&self) -> PhyModel {
        self.model
    }

    fn state(&self) -> NegotiationState {
        self.state
    }

    fn probe<M: MdioBus>(&mut self, mdio: &mut M) -> Result<PhyCapabilities> {
        let id = ieee802_3::read_phy_id(mdio, self.addr)?;
        if !self.model.matches_id(id) {
            log::error!(
                "{} @ {}: unexpected PHY id {id:#010x}",
                self.model.name(),
                self.addr
            );
            return Err(ConfigError::PhyIdMismatch.into());
        }

        let caps = ieee802_3::read_capabilities(mdio, self.addr)?;
        self.capabilities = Some(caps);
        log::debug!("{} @ {}: rev {}", self.model.name(), self.addr, id & 0x0F);
        Ok(caps)
    }

    fn apply<M: MdioBus, D: DelayNs>(
        &mut self,
        mdio: &mut M,
        delay: &mut D,
        opts: PhyOptions,
    ) -> Result<()> {
        if !opts.autoneg
            && let Some(caps) = self.capabilities
            && !caps.supports(opts.speed, opts.duplex)
        {
            log::error!(
                "{} @ {}: forced {:?}/{:?} not supported",
                self.model.name(),
                self.addr,
                opts.speed,
                opts.duplex
            );
            return Err(ConfigError::UnsupportedLinkMode.into());
        }

        let current = self.read_bcr(mdio)?;
        let wanted = current.with_options(opts);

        if wanted == current {
            if self.state == NegotiationState::Unconfigured {
                self.state = NegotiationState::Configured;
            }
            return Ok(());
        }

        mdio.write(self.addr, phy_reg::BMCR, wanted.bits())?;
        delay.delay_ms(timing::CONFIG_SETTLE_MS);

        self.state = NegotiationState::Configured;
        log::debug!(
            "{} @ {}: BCR {:#06x} -> {:#06x}",
            self.model.name(),
            self.addr,
            current.bits(),
            wanted.bits()
        );
        Ok(())
    }

    fn restart_autoneg<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        let bcr = self.read_bcr(mdio)?.with_autoneg_restart();
        mdio.write(self.addr, phy_reg::BMCR, bcr.bits())?;
        self.state = NegotiationState::NegotiationPending;
        Ok(())
    }

    fn status<M: MdioBus>(&mut self, mdio: &mut M) -> Result<PhyStatus> {
        let bsr = Bsr::from_bits(mdio.read(self.addr, phy_reg::BMSR)?);
        let bcr = self.read_bcr(mdio)?;
        let pscsr = Pscsr::from_bits(mdio.read(self.addr, reg::PSCSR)?);

        let autoneg = pscsr.autoneg_result();
        self.state = match (self.state, autoneg.complete) {
            (NegotiationState::NegotiationPending, true) => NegotiationState::NegotiationComplete,
            (NegotiationState::NegotiationComplete, false) => NegotiationState::NegotiationPending,
            (state, _) => state,
        };

        Ok(PhyStatus {
            link_up: bsr.link_up(),
            opts: bcr.options(),
            autoneg,
        })
    }
}
