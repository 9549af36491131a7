//! Default route lookup over `/proc/net/route`-format text
//!
//! ```text
//! Iface  Destination  Gateway   Flags  RefCnt  Use  Metric  Mask      ...
//! eth0   00000000     0102A8C0  0003   0       0    0       00000000  ...
//! ```
//!
//! Address columns are the kernel's host-order hex dump of a network-order
//! address, so they decode through the native byte order.

use core::net::Ipv4Addr;

use crate::error::{ResolveError, ResolveResult};

/// One parsed route-table line, borrowing the device name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry<'a> {
    /// Interface name
    pub device: &'a str,
    /// Destination network
    pub destination: Ipv4Addr,
    /// Next hop
    pub gateway: Ipv4Addr,
}

impl RouteEntry<'_> {
    /// Destination `00000000`
    pub fn is_default(&self) -> bool {
        self.destination.is_unspecified()
    }
}

/// Decode one 8-digit hex address column
pub fn parse_hex_addr(field: &str) -> Option<Ipv4Addr> {
    if field.len() != 8 || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let raw = u32::from_str_radix(field, 16).ok()?;
    Some(Ipv4Addr::from(raw.to_ne_bytes()))
}

/// Parse a single line
///
/// Returns `None` for the header and for lines missing the device,
/// destination or gateway column.
pub fn parse_route_line(line: &str) -> Option<RouteEntry<'_>> {
    let mut fields = line.split_ascii_whitespace();
    let device = fields.next()?;
    let destination = parse_hex_addr(fields.next()?)?;
    let gateway = parse_hex_addr(fields.next()?)?;

    Some(RouteEntry {
        device,
        destination,
        gateway,
    })
}

/// Find the first default route
///
/// Lines are scanned in order and scanning stops at the first match, so a
/// later default route with a better metric is never considered.
pub fn find_default_route<'a, I>(lines: I) -> ResolveResult<RouteEntry<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(parse_route_line)
        .find(RouteEntry::is_default)
        .ok_or(ResolveError::NoDefaultRoute)
}
