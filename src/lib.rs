//! Wired Ethernet interface bring-up
//!
//! A `no_std` crate that takes a wired Ethernet port from power-on to an
//! addressed network interface: PHY link negotiation over MDIO, static or
//! DHCP address configuration, and an ordered stream of typed link events.
//!
//! # Architecture
//!
//! 1. **PHY Layer** ([`phy`], [`hal`]): IEEE 802.3 register access and the
//!    LAN87xx negotiation state machine
//! 2. **Network Layer** ([`net`]): default-route and address resolution,
//!    link events and their ordering
//! 3. **Platform Layer** ([`backend`]): one bring-up backend per platform
//!    (ESP32 vendor driver, STM32 with MDIO, desktop host)
//! 4. **Orchestrator** ([`netif`]): [`Netif`] drives a backend and forwards
//!    its events to an [`EventSink`]
//!
//! # Supported PHY Chips
//!
//! - [`PhyModel::Lan87x0`]: Microchip/SMSC LAN8710A/LAN8720A
//! - [`PhyModel::Lan8742a`]: Microchip LAN8742A
//! - [`PhyModel::Tlk110`]: TI TLK110 (vendor-driver platforms only)
//!
//! # Features
//!
//! - `std`: Host backend reading the OS routing table
//! - `defmt`: Enable defmt formatting for public types
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `critical-section`: Enable the ISR-safe `SharedEventQueue`
//! - `async`: Enable `SharedEventQueue::receive_async`
//!
//! # Example
//!
//! ```ignore
//! use ph_eth_netif::{EventQueue, Netif, StmBackend};
//! use ph_eth_netif::boards::NucleoF746zg;
//!
//! let mut events: EventQueue<8> = EventQueue::new();
//! let backend = StmBackend::new(mac, ip_stack, mdio, delay);
//! let mut netif = Netif::new(backend, &mut events);
//!
//! netif.bring_up(&NucleoF746zg::eth_config())?;
//!
//! loop {
//!     netif.poll()?;
//!     // drain `events` ...
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

#[cfg(feature = "std")]
extern crate std;

// =============================================================================
// Modules
// =============================================================================

pub mod backend;
pub mod boards;
pub mod config;
pub mod error;
pub mod hal;
pub mod net;
pub mod netif;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{
    Duplex, EthConfig, HostnamePolicy, LinkSpeed, PhyOptions, RmiiClockMode, StaticIpConfig,
};
pub use error::{
    ConfigError, ConfigResult, DriverError, Error, IoError, ResolveError, ResolveResult, Result,
};
pub use netif::Netif;

pub use backend::{
    EspBackend, InterfaceHandle, IpStack, MacDriver, MacParams, NetifBackend, Platform,
    StmBackend,
};
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use backend::HostBackend;

pub use net::{
    AddressMode, EventQueue, EventSink, InterfaceEvent, InterfaceId, InterfaceState, IpInfo,
    NetEvent, RouteEntry,
};

// Re-export PHY types
pub use phy::{AutonegResult, Lan87xx, NegotiationState, PhyDriver, PhyModel, PhyStatus};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedEventQueue;
