//! Platform driver stack interface
//!
//! The adapter does not drive the EMAC or the PHY itself. Everything below
//! the configuration structures is owned by the platform's Ethernet stack,
//! which the adapter reaches through [`EthPlatform`]:
//!
//! - network-interface factory and default protocol handlers
//! - MAC/PHY driver factories and the driver installer
//! - netif glue constructor
//! - event subscription registrar
//! - driver start/stop and the hardware address query
//! - the logging sink ([`LogSink`] supertrait)
//!
//! # Example Implementation
//!
//! ```ignore
//! struct EspIdf;
//!
//! impl EthPlatform for EspIdf {
//!     type Netif = *mut esp_netif_t;
//!     type Driver = esp_eth_handle_t;
//!     // ...
//!     fn install_driver(&mut self, config: DriverConfig<Self::Mac, Self::Phy>) -> PlatformResult<Self::Driver> {
//!         let raw = eth_config(config);
//!         let mut handle = core::ptr::null_mut();
//!         check(unsafe { esp_eth_driver_install(&raw, &mut handle) })?;
//!         Ok(handle)
//!     }
//! }
//! ```
//!
//! The dispatcher side of the contract: for every event that passes a
//! subscription's filter, the platform calls
//! [`LinkMonitor::on_event`](crate::LinkMonitor::on_event) with itself and the
//! raw event. It may do so from its own event task.

use crate::config::{DriverConfig, MacConfig, NetifConfig, PhyConfig};
use crate::error::PlatformResult;
use crate::event::{EventChannel, EventFilter, MacAddr};
use crate::log::LogSink;
use crate::monitor::LinkMonitor;

/// The consumed half of the platform's Ethernet driver stack
pub trait EthPlatform: LogSink {
    /// Network interface object
    type Netif;
    /// MAC driver instance, consumed by driver installation
    type Mac;
    /// PHY driver instance, consumed by driver installation
    type Phy;
    /// Installed driver handle
    type Driver: Copy;
    /// Glue linking a driver handle to a network interface
    type Glue;
    /// Event subscription handle
    type Subscription;

    /// Create a network interface
    fn new_netif(&mut self, config: &NetifConfig) -> Self::Netif;

    /// Install the default protocol handlers (DHCP, link-state plumbing)
    fn set_default_handlers(&mut self, netif: &mut Self::Netif) -> PlatformResult<()>;

    /// Create a MAC driver instance
    fn new_mac(&mut self, config: &MacConfig) -> Self::Mac;

    /// Create a PHY driver instance for the LAN8720
    fn new_phy(&mut self, config: &PhyConfig) -> Self::Phy;

    /// Install the Ethernet driver
    ///
    /// Takes ownership of the MAC and PHY instances; on failure the platform
    /// releases them.
    fn install_driver(&mut self, config: DriverConfig<Self::Mac, Self::Phy>) -> PlatformResult<Self::Driver>;

    /// Create the glue object for an installed driver
    fn new_glue(&mut self, driver: Self::Driver) -> Self::Glue;

    /// Attach the glue to a network interface
    fn attach(&mut self, netif: &mut Self::Netif, glue: &Self::Glue) -> PlatformResult<()>;

    /// Register `monitor` for events on `channel` that pass `filter`
    fn subscribe(
        &mut self,
        channel: EventChannel,
        filter: EventFilter,
        monitor: LinkMonitor,
    ) -> PlatformResult<Self::Subscription>;

    /// Start the driver; link negotiation proceeds asynchronously
    fn start(&mut self, driver: Self::Driver) -> PlatformResult<()>;

    /// Read the hardware address of the driver's MAC
    fn mac_address(&self, driver: Self::Driver) -> PlatformResult<MacAddr>;

    /// Stop the driver
    fn stop(&mut self, driver: Self::Driver) -> PlatformResult<()>;

    /// Remove an event subscription
    fn unsubscribe(&mut self, subscription: Self::Subscription) -> PlatformResult<()>;

    /// Detach and delete a glue object
    fn delete_glue(&mut self, glue: Self::Glue) -> PlatformResult<()>;

    /// Uninstall the driver, releasing its MAC and PHY instances
    fn uninstall_driver(&mut self, driver: Self::Driver) -> PlatformResult<()>;

    /// Destroy a network interface
    fn destroy_netif(&mut self, netif: Self::Netif);
}
