//! Ethernet PHY link negotiation
//!
//! This module provides the [`PhyDriver`] trait and the LAN87xx driver used
//! by platforms that expose PHY registers directly (the STM32 backend).
//! Platforms whose vendor stack owns the PHY never touch this layer.
//!
//! # Architecture
//!
//! The PHY layer talks to hardware only through [`MdioBus`](crate::hal::MdioBus)
//! and `embedded_hal` delays, so every path can be driven from a mock bus.
//!
//! ```text
//! Unconfigured --apply--> Configured --restart_autoneg--> NegotiationPending
//!                                                          |        ^
//!                                              AUTODONE set|        |AUTODONE clear
//!                                                          v        |
//!                                                    NegotiationComplete
//! ```
//!
//! Link up/down is sampled independently of the negotiation state.
//!
//! # Supported PHY Chips
//!
//! - [`Lan87xx`]: Microchip/SMSC LAN8720A and LAN8742A

pub mod generic;
pub mod lan87xx;
pub mod regs;

pub use generic::{
    AutonegResult, NegotiationState, PhyCapabilities, PhyDriver, PhyModel, PhyStatus, ieee802_3,
};
pub use lan87xx::Lan87xx;
pub use regs::{Bcr, Bsr, Pscsr};
