//! Platform events and their decoded form
//!
//! The platform dispatcher hands the link monitor a [`RawEvent`]: a channel,
//! an integer event id and a payload whose meaning depends on the pair. The
//! monitor decodes it exactly once into a [`LinkEvent`], logs it and drops
//! it. Nothing here is retained between events.

use core::fmt;
use core::net::Ipv4Addr;

use crate::error::{EventError, EventResult};
use crate::platform::EthPlatform;

/// Event ids on the Ethernet channel
pub mod eth_event {
    /// Driver started
    pub const START: i32 = 0;
    /// Driver stopped
    pub const STOP: i32 = 1;
    /// Link came up
    pub const CONNECTED: i32 = 2;
    /// Link went down
    pub const DISCONNECTED: i32 = 3;
}

/// Event ids on the IP channel
pub mod ip_event {
    /// Station interface got an address
    pub const STA_GOT_IP: i32 = 0;
    /// Station interface lost its address
    pub const STA_LOST_IP: i32 = 1;
    /// Ethernet interface got an address
    pub const ETH_GOT_IP: i32 = 4;
    /// Ethernet interface lost its address
    pub const ETH_LOST_IP: i32 = 5;
}

/// Log tag used for Ethernet channel lines
pub const ETH_LOG_TAG: &str = "lan8720::eth";
/// Log tag used for IP channel lines
pub const IP_LOG_TAG: &str = "lan8720::ip";

// =============================================================================
// Raw Events
// =============================================================================

/// Named source of platform events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventChannel {
    /// Ethernet driver events
    Ethernet,
    /// IP stack events
    Ip,
    /// Any other event base, by name
    Other(&'static str),
}

impl EventChannel {
    /// The platform's name for this event base
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventChannel::Ethernet => "ETH_EVENT",
            EventChannel::Ip => "IP_EVENT",
            EventChannel::Other(name) => name,
        }
    }
}

/// Which ids on a channel a subscription receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventFilter {
    /// Every event on the channel
    Any,
    /// A single event id
    Id(i32),
}

impl EventFilter {
    /// Whether an event with `id` passes the filter
    #[must_use]
    pub const fn matches(self, id: i32) -> bool {
        match self {
            EventFilter::Any => true,
            EventFilter::Id(wanted) => wanted == id,
        }
    }
}

/// Event data as delivered by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventPayload<D> {
    /// No data attached
    None,
    /// Ethernet events carry the driver handle that raised them
    Driver(D),
    /// Got-address events carry the interface's new IP settings
    IpInfo(IpInfo),
}

/// An undecoded event from the platform dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawEvent<D> {
    /// Event source
    pub channel: EventChannel,
    /// Event id within the channel
    pub id: i32,
    /// Data whose layout depends on `(channel, id)`
    pub payload: EventPayload<D>,
}

impl<D> RawEvent<D> {
    /// An Ethernet channel event carrying the driver handle
    pub const fn ethernet(id: i32, driver: D) -> Self {
        Self {
            channel: EventChannel::Ethernet,
            id,
            payload: EventPayload::Driver(driver),
        }
    }

    /// The Ethernet got-address event
    pub const fn got_ip(info: IpInfo) -> Self {
        Self {
            channel: EventChannel::Ip,
            id: ip_event::ETH_GOT_IP,
            payload: EventPayload::IpInfo(info),
        }
    }
}

// =============================================================================
// Decoded Events
// =============================================================================

/// 6-byte Ethernet hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Raw address bytes
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// IPv4 settings reported with a got-address event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpInfo {
    /// Assigned interface address
    pub ip: Ipv4Addr,
    /// Subnet mask
    pub netmask: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
}

#[cfg(feature = "defmt")]
impl defmt::Format for IpInfo {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(
            f,
            "IpInfo {{ ip: {=[u8; 4]}, netmask: {=[u8; 4]}, gateway: {=[u8; 4]} }}",
            self.ip.octets(),
            self.netmask.octets(),
            self.gateway.octets()
        );
    }
}

/// A recognized event, decoded from its raw form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Driver started
    Started,
    /// Driver stopped
    Stopped,
    /// Link up, with the interface's hardware address
    Connected(MacAddr),
    /// Link down
    Disconnected,
    /// DHCP (or static) address assigned
    GotAddress(IpInfo),
}

impl LinkEvent {
    /// Decode a raw event
    ///
    /// Returns `Ok(None)` for (channel, id) pairs the adapter does not
    /// handle. A `Connected` event queries the driver that raised it for its
    /// hardware address.
    ///
    /// # Errors
    ///
    /// [`EventError::PayloadMismatch`] if a recognized pair arrives with the
    /// wrong payload shape, [`EventError::AddressQuery`] if the hardware
    /// address cannot be read.
    pub fn decode<P>(platform: &P, raw: &RawEvent<P::Driver>) -> EventResult<Option<Self>>
    where
        P: EthPlatform + ?Sized,
    {
        let event = match (raw.channel, raw.id) {
            (EventChannel::Ethernet, eth_event::CONNECTED) => match raw.payload {
                EventPayload::Driver(driver) => LinkEvent::Connected(platform.mac_address(driver)?),
                _ => return Err(EventError::PayloadMismatch),
            },
            (EventChannel::Ethernet, eth_event::DISCONNECTED) => LinkEvent::Disconnected,
            (EventChannel::Ethernet, eth_event::START) => LinkEvent::Started,
            (EventChannel::Ethernet, eth_event::STOP) => LinkEvent::Stopped,
            (EventChannel::Ip, ip_event::ETH_GOT_IP) => match raw.payload {
                EventPayload::IpInfo(info) => LinkEvent::GotAddress(info),
                _ => return Err(EventError::PayloadMismatch),
            },
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Log tag for this event's channel
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            LinkEvent::GotAddress(_) => IP_LOG_TAG,
            _ => ETH_LOG_TAG,
        }
    }
}

impl fmt::Display for LinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkEvent::Started => f.write_str("Ethernet Started"),
            LinkEvent::Stopped => f.write_str("Ethernet Stopped"),
            LinkEvent::Connected(mac) => write!(f, "Ethernet Link Up\nEthernet HW Addr {mac}"),
            LinkEvent::Disconnected => f.write_str("Ethernet Link Down"),
            LinkEvent::GotAddress(info) => write!(
                f,
                "Ethernet IP Address: {}, Netmask: {}, Gateway: {}",
                info.ip, info.netmask, info.gateway
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;
    use crate::test_utils::{DriverId, MockPlatform};

    fn info() -> IpInfo {
        IpInfo {
            ip: Ipv4Addr::new(192, 168, 1, 50),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(192, 168, 1, 1),
        }
    }

    #[test]
    fn mac_addr_format() {
        assert_eq!(format!("{}", MacAddr([0, 1, 2, 3, 4, 5])), "00:01:02:03:04:05");
        assert_eq!(
            format!("{}", MacAddr([0xDE, 0xAD, 0xBE, 0xEF, 0x0A, 0xFF])),
            "de:ad:be:ef:0a:ff"
        );
    }

    #[test]
    fn mac_addr_format_edge_bytes() {
        let cases: [([u8; 6], &str); 4] = [
            ([0x00; 6], "00:00:00:00:00:00"),
            ([0xFF; 6], "ff:ff:ff:ff:ff:ff"),
            ([0x02, 0x00, 0x00, 0x12, 0x34, 0x56], "02:00:00:12:34:56"),
            ([0x24, 0x0A, 0xC4, 0x9B, 0x0F, 0x10], "24:0a:c4:9b:0f:10"),
        ];
        for (bytes, expected) in cases {
            assert_eq!(format!("{}", MacAddr::from(bytes)), expected);
        }
    }

    #[test]
    fn display_messages() {
        assert_eq!(format!("{}", LinkEvent::Started), "Ethernet Started");
        assert_eq!(format!("{}", LinkEvent::Stopped), "Ethernet Stopped");
        assert_eq!(format!("{}", LinkEvent::Disconnected), "Ethernet Link Down");
        assert_eq!(
            format!("{}", LinkEvent::Connected(MacAddr([0, 1, 2, 3, 4, 5]))),
            "Ethernet Link Up\nEthernet HW Addr 00:01:02:03:04:05"
        );
        assert_eq!(
            format!("{}", LinkEvent::GotAddress(info())),
            "Ethernet IP Address: 192.168.1.50, Netmask: 255.255.255.0, Gateway: 192.168.1.1"
        );
    }

    #[test]
    fn tags_follow_channel() {
        assert_eq!(LinkEvent::Started.tag(), ETH_LOG_TAG);
        assert_eq!(LinkEvent::GotAddress(info()).tag(), IP_LOG_TAG);
    }

    #[test]
    fn decode_recognized_pairs() {
        let platform = MockPlatform::new();
        let driver = DriverId(1);
        platform.set_mac_address([0x24, 0x0A, 0xC4, 0, 0, 1]);

        let cases = [
            (RawEvent::ethernet(eth_event::START, driver), LinkEvent::Started),
            (RawEvent::ethernet(eth_event::STOP, driver), LinkEvent::Stopped),
            (RawEvent::ethernet(eth_event::DISCONNECTED, driver), LinkEvent::Disconnected),
            (
                RawEvent::ethernet(eth_event::CONNECTED, driver),
                LinkEvent::Connected(MacAddr([0x24, 0x0A, 0xC4, 0, 0, 1])),
            ),
            (RawEvent::got_ip(info()), LinkEvent::GotAddress(info())),
        ];
        for (raw, expected) in cases {
            assert_eq!(LinkEvent::decode(&platform, &raw), Ok(Some(expected)));
        }
    }

    #[test]
    fn decode_unrecognized_pairs() {
        let platform = MockPlatform::new();
        let unknown = [
            RawEvent::ethernet(42, DriverId(1)),
            RawEvent {
                channel: EventChannel::Ip,
                id: ip_event::STA_GOT_IP,
                payload: EventPayload::IpInfo(info()),
            },
            RawEvent {
                channel: EventChannel::Ip,
                id: ip_event::ETH_LOST_IP,
                payload: EventPayload::None,
            },
            RawEvent {
                channel: EventChannel::Other("WIFI_EVENT"),
                id: eth_event::CONNECTED,
                payload: EventPayload::Driver(DriverId(1)),
            },
        ];
        for raw in unknown {
            assert_eq!(LinkEvent::decode(&platform, &raw), Ok(None));
        }
        assert_eq!(platform.mac_queries(), 0);
    }

    #[test]
    fn decode_payload_mismatch() {
        let platform = MockPlatform::new();
        let connected = RawEvent::<DriverId> {
            channel: EventChannel::Ethernet,
            id: eth_event::CONNECTED,
            payload: EventPayload::None,
        };
        assert_eq!(
            LinkEvent::decode(&platform, &connected),
            Err(EventError::PayloadMismatch)
        );

        let got_ip = RawEvent {
            channel: EventChannel::Ip,
            id: ip_event::ETH_GOT_IP,
            payload: EventPayload::Driver(DriverId(1)),
        };
        assert_eq!(LinkEvent::decode(&platform, &got_ip), Err(EventError::PayloadMismatch));
    }

    #[test]
    fn decode_address_query_failure() {
        let platform = MockPlatform::new();
        platform.fail_mac_query(crate::PlatformError::INVALID_STATE);
        let raw = RawEvent::ethernet(eth_event::CONNECTED, DriverId(1));
        assert_eq!(
            LinkEvent::decode(&platform, &raw),
            Err(EventError::AddressQuery(crate::PlatformError::INVALID_STATE))
        );
    }

    #[test]
    fn filter_matches() {
        assert!(EventFilter::Any.matches(7));
        assert!(EventFilter::Id(4).matches(4));
        assert!(!EventFilter::Id(4).matches(5));
    }

    #[test]
    fn channel_names() {
        assert_eq!(EventChannel::Ethernet.name(), "ETH_EVENT");
        assert_eq!(EventChannel::Ip.name(), "IP_EVENT");
        assert_eq!(EventChannel::Other("WIFI_EVENT").name(), "WIFI_EVENT");
    }
}
