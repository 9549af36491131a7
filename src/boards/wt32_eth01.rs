//! WT32-ETH01 board configuration (ESP32 + LAN8720A).
//!
//! The vendor driver owns the PHY on this board; only the model, address
//! and wiring below are handed to it.

use crate::config::{EthConfig, RmiiClockMode};
use crate::phy::PhyModel;

/// WT32-ETH01 board constants and configuration.
pub struct Wt32Eth01;

impl Wt32Eth01 {
    // =========================================================================
    // PHY
    // =========================================================================

    /// PHY model fitted on the board.
    pub const PHY_MODEL: PhyModel = PhyModel::Lan87x0;

    /// PHY address (PHYAD0 is pulled HIGH on WT32-ETH01).
    pub const PHY_ADDR: u8 = 1;

    /// PHY reset GPIO (not connected).
    pub const PHY_RST_GPIO: Option<u8> = None;

    // =========================================================================
    // SMI (MDIO) Pins
    // =========================================================================

    /// MDC (Management Data Clock) GPIO.
    pub const MDC_GPIO: u8 = 23;

    /// MDIO (Management Data I/O) GPIO.
    pub const MDIO_GPIO: u8 = 18;

    // =========================================================================
    // Clock
    // =========================================================================

    /// Reference clock input GPIO (50 MHz from external oscillator).
    pub const REF_CLK_GPIO: u8 = 0;

    /// Oscillator enable GPIO; must be driven HIGH before bring-up.
    pub const CLK_EN_GPIO: u8 = 16;

    /// Board name.
    pub const BOARD_NAME: &'static str = "WT32-ETH01";

    /// Check if a PHY ID matches the fitted LAN8720A.
    #[inline]
    pub const fn is_valid_phy_id(id: u32) -> bool {
        Self::PHY_MODEL.matches_id(id)
    }

    /// Interface configuration for this board (DHCP, autonegotiation).
    #[must_use]
    pub const fn eth_config() -> EthConfig<'static> {
        EthConfig::new()
            .with_phy_model(Self::PHY_MODEL)
            .with_phy_addr(Self::PHY_ADDR)
            .with_smi_pins(Self::MDC_GPIO, Self::MDIO_GPIO)
            .with_clock_mode(RmiiClockMode::ExternalInput {
                gpio: Self::REF_CLK_GPIO,
            })
    }
}
