//! Host backend
//!
//! Nothing is brought up on a desktop host; the interface already exists.
//! The "current configuration" is that of whichever interface owns the
//! default route in the kernel routing table, whatever instance is asked
//! for.

#![allow(clippy::std_instead_of_alloc)]

use std::fs;
use std::path::{Path, PathBuf};
use std::string::String;
use std::vec::Vec;

use core::net::Ipv4Addr;

use crate::config::EthConfig;
use crate::error::{ResolveError, ResolveResult, Result};
use crate::net::{InterfaceAddress, InterfaceId, IpInfo, find_default_route, lookup_address};

use super::{InterfaceHandle, NetifBackend, Platform};

/// Kernel routing table
pub const DEFAULT_ROUTE_TABLE: &str = "/proc/net/route";

/// Device used when the routing table has no default route
pub const LOOPBACK_DEVICE: &str = "lo";

/// One IPv4 address of a host interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInterface {
    /// Interface name
    pub name: String,
    /// Assigned address
    pub address: Ipv4Addr,
    /// Network mask
    pub netmask: Ipv4Addr,
}

impl HostInterface {
    fn as_borrowed(&self) -> InterfaceAddress<'_> {
        InterfaceAddress {
            name: &self.name,
            address: self.address,
            netmask: self.netmask,
        }
    }
}

/// Source of host interface addresses
pub trait InterfaceSource {
    /// All IPv4 addresses, in enumeration order
    fn interfaces(&self) -> ResolveResult<Vec<HostInterface>>;
}

/// Interface enumeration through `getifaddrs`
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

#[cfg(unix)]
impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> ResolveResult<Vec<HostInterface>> {
        let addrs = nix::ifaddrs::getifaddrs().map_err(|e| {
            log::error!("Cannot get interfaces: {e}");
            ResolveError::NoInterfacesFound
        })?;

        Ok(addrs
            .filter_map(|ifa| {
                let address = ifa.address.as_ref()?.as_sockaddr_in()?.ip();
                let netmask = ifa.netmask.as_ref()?.as_sockaddr_in()?.ip();
                Some(HostInterface {
                    name: ifa.interface_name,
                    address,
                    netmask,
                })
            })
            .collect())
    }
}

/// Host backend over the OS routing table
#[derive(Debug, Clone)]
pub struct HostBackend<S> {
    route_table: PathBuf,
    fallback_device: Option<String>,
    source: S,
}

#[cfg(unix)]
impl HostBackend<SystemInterfaces> {
    /// Backend reading `/proc/net/route` and the system interfaces
    pub fn new() -> Self {
        Self::with_source(SystemInterfaces)
    }
}

#[cfg(unix)]
impl Default for HostBackend<SystemInterfaces> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: InterfaceSource> HostBackend<S> {
    /// Backend over a custom interface source
    pub fn with_source(source: S) -> Self {
        Self {
            route_table: PathBuf::from(DEFAULT_ROUTE_TABLE),
            fallback_device: Some(String::from(LOOPBACK_DEVICE)),
            source,
        }
    }

    /// Read routes from another file
    #[must_use]
    pub fn with_route_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.route_table = path.into();
        self
    }

    /// Device to use without a default route; `None` reports `NoDefaultRoute`
    #[must_use]
    pub fn with_fallback_device(mut self, device: Option<&str>) -> Self {
        self.fallback_device = device.map(String::from);
        self
    }

    /// Routing table path
    pub fn route_table(&self) -> &Path {
        &self.route_table
    }

    fn read_route_table(&self) -> String {
        fs::read_to_string(&self.route_table).unwrap_or_else(|e| {
            log::error!("Could not open {}: {e}", self.route_table.display());
            String::new()
        })
    }
}

impl<S: InterfaceSource> NetifBackend for HostBackend<S> {
    const PLATFORM: Platform = Platform::Host;

    fn bring_up(&mut self, _config: &EthConfig<'_>) -> Result<InterfaceHandle> {
        log::info!("Eth: host interface, configuration read from the OS");
        Ok(InterfaceHandle {
            id: InterfaceId::ethernet(0),
            platform: Self::PLATFORM,
            mac: [0; 6],
            phy: None,
        })
    }

    fn ip_info(&mut self, _instance: u8) -> ResolveResult<IpInfo> {
        let table = self.read_route_table();

        let (device, gateway) = match find_default_route(table.lines()) {
            Ok(route) => (route.device, route.gateway),
            Err(err) => match self.fallback_device.as_deref() {
                Some(device) => (device, Ipv4Addr::UNSPECIFIED),
                None => return Err(err),
            },
        };
        log::info!("External interface: {device}");

        let owned = self.source.interfaces()?;
        let interfaces: Vec<InterfaceAddress<'_>> =
            owned.iter().map(HostInterface::as_borrowed).collect();

        lookup_address(device, gateway, &interfaces).inspect_err(|e| {
            log::error!("Failed to get interface configuration: {e}");
        })
    }
}
