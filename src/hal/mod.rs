//! Hardware Abstraction Layer
//!
//! - [`mdio`]: MDIO/SMI bus for PHY register access
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL (e.g., `esp_hal::delay::Delay`).

pub mod mdio;

pub use mdio::{MAX_PHY_ADDR, MAX_REG_ADDR, MdioBus, check_address};
