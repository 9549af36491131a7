//! smoltcp network stack integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! On targets where [smoltcp](https://docs.rs/smoltcp) is the IP stack, the
//! resolved addressing is pushed into an [`Interface`] and DHCPv4 leases
//! come back as [`IpInfo`].
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface};
//! use smoltcp::socket::dhcpv4;
//!
//! let config = Config::new(ethernet_address(&handle).into());
//! let mut iface = Interface::new(config, &mut device, now);
//!
//! if let Some(dhcpv4::Event::Configured(lease)) = dhcp.poll() {
//!     apply_ip_info(&mut iface, &dhcp_lease(&lease))?;
//! }
//! ```

use core::net::Ipv4Addr;

use smoltcp::iface::Interface;
use smoltcp::socket::dhcpv4;
use smoltcp::wire::{EthernetAddress, IpCidr, Ipv4Cidr};

use crate::backend::InterfaceHandle;
use crate::error::{ConfigError, IoError, Result};
use crate::net::{IpInfo, NetEvent};

/// MAC of a brought-up interface as a smoltcp hardware address
pub fn ethernet_address(handle: &InterfaceHandle) -> EthernetAddress {
    EthernetAddress(handle.mac)
}

/// Replace the interface address and default route
///
/// An unassigned `info` removes both, as after a lost DHCP lease.
pub fn apply_ip_info(iface: &mut Interface, info: &IpInfo) -> Result<()> {
    if !info.is_assigned() {
        iface.update_ip_addrs(|addrs| addrs.clear());
        iface.routes_mut().remove_default_ipv4_route();
        return Ok(());
    }

    let prefix = info.prefix_len().ok_or(ConfigError::InvalidNetmask)?;
    let cidr = IpCidr::Ipv4(Ipv4Cidr::new(info.address, prefix));

    let mut pushed = true;
    iface.update_ip_addrs(|addrs| {
        addrs.clear();
        pushed = addrs.push(cidr).is_ok();
    });
    if !pushed {
        return Err(ConfigError::InvalidAddress.into());
    }

    if info.gateway.is_unspecified() {
        iface.routes_mut().remove_default_ipv4_route();
    } else {
        iface
            .routes_mut()
            .add_default_ipv4_route(info.gateway)
            .map_err(|_| IoError::QueueFull)?;
    }

    log::debug!("smoltcp: {}/{prefix} via {}", info.address, info.gateway);
    Ok(())
}

/// Addressing carried by a DHCPv4 lease
pub fn dhcp_lease(config: &dhcpv4::Config<'_>) -> IpInfo {
    IpInfo::new(
        config.address.address(),
        config.address.netmask(),
        config.router.unwrap_or(Ipv4Addr::UNSPECIFIED),
    )
}

/// First DNS server offered with a lease
pub fn dhcp_dns_server(config: &dhcpv4::Config<'_>) -> Option<Ipv4Addr> {
    config.dns_servers.first().copied()
}

/// Map a DHCPv4 socket event onto an interface event
///
/// A lost lease has no event of its own; the link state is unchanged.
pub fn dhcp_event(event: &dhcpv4::Event<'_>) -> Option<NetEvent> {
    match event {
        dhcpv4::Event::Configured(config) => Some(NetEvent::IpAcquired(dhcp_lease(config))),
        dhcpv4::Event::Deconfigured => None,
    }
}
