//! PHY Register Definitions
//!
//! Register definitions for PHY devices accessed via MDIO.
//!
//! - [`standard`] - IEEE 802.3 Clause 22 standard PHY registers (0-15)
//! - [`lan87xx`] - LAN8720A/LAN8742A vendor-specific registers (16-31)

pub mod lan87xx;
pub mod standard;
