//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! The platform stack owns DHCP; applications that also run a smoltcp
//! interface on top of the port can mirror what it reports. This module
//! converts the adapter's event data into smoltcp wire types and applies a
//! got-address event to an [`Interface`].
//!
//! # Features
//!
//! This module is only available when the `smoltcp` feature is enabled in Cargo.toml:
//! ```toml
//! [dependencies]
//! ph-esp32-lan8720 = { version = "0.1", features = ["smoltcp"] }
//! ```

use smoltcp::iface::Interface;
use smoltcp::wire::{EthernetAddress, HardwareAddress, IpCidr, Ipv4Address, Ipv4Cidr};

use crate::event::{IpInfo, MacAddr};

/// Failure applying address settings to an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApplyError {
    /// Netmask is not a contiguous prefix
    InvalidNetmask,
    /// The interface has no room for another address
    AddressTableFull,
    /// The interface's route table is full
    RouteTableFull,
}

impl core::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ApplyError::InvalidNetmask => "netmask is not a prefix",
            ApplyError::AddressTableFull => "interface address table full",
            ApplyError::RouteTableFull => "interface route table full",
        })
    }
}

impl From<MacAddr> for EthernetAddress {
    fn from(mac: MacAddr) -> Self {
        EthernetAddress(mac.0)
    }
}

impl From<MacAddr> for HardwareAddress {
    fn from(mac: MacAddr) -> Self {
        HardwareAddress::Ethernet(mac.into())
    }
}

impl IpInfo {
    /// Address and prefix as a CIDR block
    ///
    /// # Errors
    ///
    /// [`ApplyError::InvalidNetmask`] if the netmask has holes.
    pub fn cidr(&self) -> Result<Ipv4Cidr, ApplyError> {
        Ipv4Cidr::from_netmask(self.ip, self.netmask).map_err(|_| ApplyError::InvalidNetmask)
    }

    /// Gateway, unless the stack reported none (`0.0.0.0`)
    #[must_use]
    pub fn default_route(&self) -> Option<Ipv4Address> {
        (!self.gateway.is_unspecified()).then_some(self.gateway)
    }
}

/// Replace the interface's IPv4 address and default route with `info`
///
/// # Errors
///
/// See [`ApplyError`]. The interface is left untouched on a netmask error.
pub fn apply_ip_info(iface: &mut Interface, info: &IpInfo) -> Result<(), ApplyError> {
    let cidr = IpCidr::Ipv4(info.cidr()?);

    let mut pushed = Ok(());
    iface.update_ip_addrs(|addrs| {
        addrs.retain(|addr| !matches!(addr, IpCidr::Ipv4(_)));
        pushed = addrs.push(cidr).map_err(|_| ApplyError::AddressTableFull);
    });
    pushed?;

    let routes = iface.routes_mut();
    match info.default_route() {
        Some(gateway) => {
            routes
                .add_default_ipv4_route(gateway)
                .map_err(|_| ApplyError::RouteTableFull)?;
        }
        None => {
            routes.remove_default_ipv4_route();
        }
    }
    Ok(())
}
