//! Address policy, route lookup and link events
//!
//! - [`route`]: default route lookup over route-table text
//! - [`ip`]: static vs. DHCP addressing and current-configuration discovery
//! - [`event`]: typed events, ordering gate and event queue

pub mod event;
pub mod ip;
pub mod route;

pub use event::{
    EventQueue, EventSink, InterfaceEvent, InterfaceId, InterfaceKind, InterfaceState,
    LinkEventGate, NetEvent,
};
pub use ip::{AddressMode, InterfaceAddress, IpInfo, lookup_address, netmask_prefix, resolve_current};
pub use route::{RouteEntry, find_default_route, parse_route_line};
