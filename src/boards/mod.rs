//! Board presets
//!
//! Each board type bundles the PHY model, bus address and wiring of a
//! common Ethernet board into a ready [`EthConfig`](crate::config::EthConfig).
//!
//! # Supported Boards
//!
//! - WT32-ETH01 (ESP32 + LAN8720A, external 50 MHz oscillator)
//! - NUCLEO-F746ZG (STM32F746 + LAN8742A)

pub mod nucleo_f746zg;
pub mod wt32_eth01;

pub use nucleo_f746zg::NucleoF746zg;
pub use wt32_eth01::Wt32Eth01;
