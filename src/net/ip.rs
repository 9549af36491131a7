//! IP configuration resolution
//!
//! Two questions are answered here: should the interface be configured
//! statically or by DHCP, and what is the current configuration of the
//! interface that owns the default route.

use core::net::Ipv4Addr;

use crate::config::StaticIpConfig;
use crate::error::{ConfigError, ConfigResult, ResolveError, ResolveResult};

use super::route::find_default_route;

/// IPv4 interface configuration
///
/// An unspecified `address` means the interface is DHCP-driven and has no
/// lease yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IpInfo {
    /// Interface address
    pub address: Ipv4Addr,
    /// Network mask
    pub netmask: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
}

impl IpInfo {
    /// All-zero configuration
    pub const UNSPECIFIED: Self = Self::new(
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::UNSPECIFIED,
    );

    /// Create a new configuration
    pub const fn new(address: Ipv4Addr, netmask: Ipv4Addr, gateway: Ipv4Addr) -> Self {
        Self {
            address,
            netmask,
            gateway,
        }
    }

    /// An address has been assigned
    pub const fn is_assigned(&self) -> bool {
        !self.address.is_unspecified()
    }

    /// Prefix length of the netmask, `None` if it is not contiguous
    pub const fn prefix_len(&self) -> Option<u8> {
        netmask_prefix(self.netmask)
    }
}

impl Default for IpInfo {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

/// Prefix length of a contiguous netmask
pub const fn netmask_prefix(netmask: Ipv4Addr) -> Option<u8> {
    let bits = netmask.to_bits();
    let ones = bits.leading_ones();
    // Everything after the leading ones must be zero
    match bits.checked_shl(ones) {
        Some(rest) if rest != 0 => None,
        _ => Some(ones as u8),
    }
}

/// How the interface gets its address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    /// DHCP client stays enabled
    Dhcp,
    /// Static triple, applied verbatim
    Static(IpInfo),
}

impl AddressMode {
    /// Decide between static and DHCP addressing
    ///
    /// An unspecified address or netmask selects DHCP. Otherwise the triple
    /// is used exactly as given; the only check is that the netmask is a
    /// contiguous prefix.
    pub fn resolve(config: &StaticIpConfig) -> ConfigResult<Self> {
        if config.address.is_unspecified() || config.netmask.is_unspecified() {
            return Ok(AddressMode::Dhcp);
        }
        if netmask_prefix(config.netmask).is_none() {
            return Err(ConfigError::InvalidNetmask);
        }
        Ok(AddressMode::Static(IpInfo::new(
            config.address,
            config.netmask,
            config.gateway,
        )))
    }

    /// Static addressing selected
    pub const fn is_static(&self) -> bool {
        matches!(self, AddressMode::Static(_))
    }
}

/// One IPv4 address assigned to a named interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddress<'a> {
    /// Interface name
    pub name: &'a str,
    /// Assigned address
    pub address: Ipv4Addr,
    /// Network mask
    pub netmask: Ipv4Addr,
}

/// Configuration of `device`, reporting `gateway` as its gateway
///
/// The first IPv4 address found on `device` is used.
pub fn lookup_address(
    device: &str,
    gateway: Ipv4Addr,
    interfaces: &[InterfaceAddress<'_>],
) -> ResolveResult<IpInfo> {
    if interfaces.is_empty() {
        return Err(ResolveError::NoInterfacesFound);
    }

    interfaces
        .iter()
        .find(|ifa| ifa.name == device)
        .map(|ifa| IpInfo::new(ifa.address, ifa.netmask, gateway))
        .ok_or(ResolveError::AddressLookupFailed)
}

/// Current configuration of the interface owning the default route
///
/// The gateway always comes from the route table, never from the
/// interface enumeration.
pub fn resolve_current<'a, I>(
    route_lines: I,
    interfaces: &[InterfaceAddress<'_>],
) -> ResolveResult<IpInfo>
where
    I: IntoIterator<Item = &'a str>,
{
    let route = find_default_route(route_lines)?;
    lookup_address(route.device, route.gateway, interfaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn triple(a: &str, m: &str, g: &str) -> StaticIpConfig {
        StaticIpConfig::new(ip(a), ip(m), ip(g))
    }

    #[test]
    fn unspecified_address_or_netmask_is_dhcp() {
        let cases = [
            triple("0.0.0.0", "0.0.0.0", "0.0.0.0"),
            triple("0.0.0.0", "255.255.255.0", "192.0.2.1"),
            triple("192.0.2.5", "0.0.0.0", "192.0.2.1"),
        ];
        for case in cases {
            assert_eq!(AddressMode::resolve(&case), Ok(AddressMode::Dhcp));
        }
    }

    #[test]
    fn static_triple_is_verbatim() {
        let config = triple("192.0.2.5", "255.255.255.0", "192.0.2.1");
        let mode = AddressMode::resolve(&config).unwrap();
        assert_eq!(
            mode,
            AddressMode::Static(IpInfo::new(config.address, config.netmask, config.gateway))
        );
        assert!(mode.is_static());

        // No gateway is fine
        let config = triple("10.1.2.3", "255.0.0.0", "0.0.0.0");
        assert_eq!(
            AddressMode::resolve(&config),
            Ok(AddressMode::Static(IpInfo::new(ip("10.1.2.3"), ip("255.0.0.0"), Ipv4Addr::UNSPECIFIED)))
        );
    }

    #[test]
    fn non_contiguous_netmask_rejected() {
        let config = triple("192.0.2.5", "255.0.255.0", "192.0.2.1");
        assert_eq!(AddressMode::resolve(&config), Err(ConfigError::InvalidNetmask));
    }

    #[test]
    fn netmask_prefix_lengths() {
        assert_eq!(netmask_prefix(ip("255.255.255.0")), Some(24));
        assert_eq!(netmask_prefix(ip("255.255.255.255")), Some(32));
        assert_eq!(netmask_prefix(ip("255.255.240.0")), Some(20));
        assert_eq!(netmask_prefix(ip("0.0.0.0")), Some(0));
        assert_eq!(netmask_prefix(ip("255.255.0.255")), None);
    }

    #[test]
    fn is_assigned() {
        assert!(!IpInfo::UNSPECIFIED.is_assigned());
        assert!(IpInfo::new(ip("192.0.2.5"), ip("255.255.255.0"), ip("0.0.0.0")).is_assigned());
    }

    const ROUTES: [&str; 4] = [
        "Iface Destination Gateway Flags RefCnt Use Metric Mask MTU Window IRTT",
        "eth2 0000A8C0 00000000 0001 0 0 0 00FFFFFF 0 0 0",
        "eth1 00000000 0102A8C0 0003 0 0 100 00000000 0 0 0",
        "eth0 00000000 FE01A8C0 0003 0 0 0 00000000 0 0 0",
    ];

    fn interfaces() -> [InterfaceAddress<'static>; 3] {
        [
            InterfaceAddress {
                name: "eth0",
                address: ip("192.168.1.10"),
                netmask: ip("255.255.255.0"),
            },
            InterfaceAddress {
                name: "eth1",
                address: ip("192.168.2.50"),
                netmask: ip("255.255.255.0"),
            },
            InterfaceAddress {
                name: "eth1",
                address: ip("172.16.0.1"),
                netmask: ip("255.255.0.0"),
            },
        ]
    }

    #[test]
    fn current_uses_first_address_of_route_device() {
        let info = resolve_current(ROUTES, &interfaces()).unwrap();
        assert_eq!(info.address, ip("192.168.2.50"));
        assert_eq!(info.netmask, ip("255.255.255.0"));
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn current_gateway_from_route_table() {
        let info = resolve_current(ROUTES, &interfaces()).unwrap();
        assert_eq!(info.gateway, ip("192.168.2.1"));
    }

    #[test]
    fn current_errors_are_distinct() {
        assert_eq!(
            resolve_current(ROUTES, &[]),
            Err(ResolveError::NoInterfacesFound)
        );
        assert_eq!(
            resolve_current(ROUTES[..2].iter().copied(), &interfaces()),
            Err(ResolveError::NoDefaultRoute)
        );
        assert_eq!(
            resolve_current(["wlan0 00000000 0102A8C0"], &interfaces()),
            Err(ResolveError::AddressLookupFailed)
        );
    }
}
