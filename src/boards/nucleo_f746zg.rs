//! NUCLEO-F746ZG board configuration (STM32F746 + LAN8742A).
//!
//! The SMI and RMII pins are fixed by the MAC on this part, so the pin
//! numbers here are the pin index within their port and only serve the
//! bring-up summary.

use crate::config::EthConfig;
use crate::phy::PhyModel;

/// NUCLEO-F746ZG board constants and configuration.
pub struct NucleoF746zg;

impl NucleoF746zg {
    /// PHY model fitted on the board.
    pub const PHY_MODEL: PhyModel = PhyModel::Lan8742a;

    /// PHY address (PHYAD0 strapped LOW).
    pub const PHY_ADDR: u8 = 0;

    /// MDC on PC1.
    pub const MDC_PIN: u8 = 1;

    /// MDIO on PA2.
    pub const MDIO_PIN: u8 = 2;

    /// Board name.
    pub const BOARD_NAME: &'static str = "NUCLEO-F746ZG";

    /// Interface configuration for this board (DHCP, autonegotiation).
    ///
    /// The PHY drives the 50 MHz reference clock, so no clock mode is set.
    #[must_use]
    pub const fn eth_config() -> EthConfig<'static> {
        EthConfig::new()
            .with_phy_model(Self::PHY_MODEL)
            .with_phy_addr(Self::PHY_ADDR)
            .with_smi_pins(Self::MDC_PIN, Self::MDIO_PIN)
    }
}
