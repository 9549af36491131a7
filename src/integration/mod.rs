//! External stack integrations
//!
//! - **smoltcp** (`smoltcp`): push resolved addressing into an
//!   `smoltcp::iface::Interface` and turn DHCPv4 leases into [`IpInfo`]
//!   (requires the `smoltcp` feature)
//!
//! [`IpInfo`]: crate::net::IpInfo

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{apply_ip_info, dhcp_dns_server, dhcp_event, dhcp_lease, ethernet_address};
