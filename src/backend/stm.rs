//! STM32 backend
//!
//! The PHY registers are reachable over MDIO, so link options are applied
//! by [`Lan87xx`] during bring-up and link changes are discovered by
//! polling the PHY status.

use embedded_hal::delay::DelayNs;

use crate::config::EthConfig;
use crate::error::{Result, ResolveResult};
use crate::hal::mdio::MdioBus;
use crate::net::{IpInfo, NetEvent};
use crate::phy::{Lan87xx, PhyDriver};

use super::{
    InterfaceHandle, IpStack, MacDriver, NetifBackend, Platform, assigned, bring_up_sequence,
};

/// STM32 bring-up with a register-accessible PHY
#[derive(Debug)]
pub struct StmBackend<M, I, B, D> {
    mac: M,
    ip: I,
    mdio: B,
    delay: D,
    phy: Option<Lan87xx>,
    link_up: bool,
    reported_ip: Option<IpInfo>,
}

impl<M, I, B, D> StmBackend<M, I, B, D>
where
    M: MacDriver,
    I: IpStack,
    B: MdioBus,
    D: DelayNs,
{
    /// Create a backend; the PHY is attached during bring-up
    pub const fn new(mac: M, ip: I, mdio: B, delay: D) -> Self {
        Self {
            mac,
            ip,
            mdio,
            delay,
            phy: None,
            link_up: false,
            reported_ip: None,
        }
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

    /// MDIO bus
    pub fn mdio(&self) -> &B {
        &self.mdio
    }

    /// Attached PHY, once brought up
    pub fn phy(&self) -> Option<&Lan87xx> {
        self.phy.as_ref()
    }
}

impl<M, I, B, D> NetifBackend for StmBackend<M, I, B, D>
where
    M: MacDriver,
    I: IpStack,
    B: MdioBus,
    D: DelayNs,
{
    const PLATFORM: Platform = Platform::Stm32;

    fn bring_up(&mut self, config: &EthConfig<'_>) -> Result<InterfaceHandle> {
        let opts = config.phy_opts;
        let mdio = &mut self.mdio;
        let delay = &mut self.delay;
        let mut configured = None;

        let handle =
            bring_up_sequence(Self::PLATFORM, &mut self.mac, &mut self.ip, config, |params| {
                let mut phy = Lan87xx::new(params.phy_addr, params.phy_model);
                phy.probe(mdio)?;
                phy.apply(mdio, delay, opts)?;
                if opts.autoneg {
                    phy.restart_autoneg(mdio)?;
                }
                configured = Some(phy);
                Ok(())
            })?;

        self.phy = configured;
        self.link_up = false;
        self.reported_ip = None;
        Ok(handle)
    }

    fn ip_info(&mut self, instance: u8) -> ResolveResult<IpInfo> {
        assigned(&self.ip, instance)
    }

    fn poll(&mut self) -> Result<Option<NetEvent>> {
        let Some(phy) = self.phy.as_mut() else {
            return Ok(None);
        };

        let status = phy.status(&mut self.mdio)?;
        if status.link_up != self.link_up {
            if status.link_up {
                log::info!(
                    "Eth link up: {:?} {:?}",
                    status.autoneg.speed,
                    status.autoneg.duplex
                );
                return Ok(Some(NetEvent::Connected));
            }
            log::info!("Eth link down");
            return Ok(Some(NetEvent::Disconnected));
        }

        match self.ip.ip_info().filter(IpInfo::is_assigned) {
            Some(info) if self.link_up && self.reported_ip != Some(info) => {
                Ok(Some(NetEvent::IpAcquired(info)))
            }
            Some(_) => Ok(None),
            None => {
                // Lease lost; the next one is reported even if identical
                self.reported_ip = None;
                Ok(None)
            }
        }
    }

    fn commit(&mut self, event: &NetEvent) {
        match *event {
            NetEvent::Connected => self.link_up = true,
            NetEvent::Disconnected => {
                self.link_up = false;
                self.reported_ip = None;
            }
            NetEvent::IpAcquired(info) => self.reported_ip = Some(info),
        }
    }
}
