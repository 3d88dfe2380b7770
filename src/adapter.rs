//! Ethernet adapter
//!
//! [`EthernetAdapter`] owns one network interface, one netif glue object and
//! one installed driver for its whole life. Construction runs the platform
//! bring-up sequence in a fixed order; dropping the adapter runs it in
//! reverse.
//!
//! # Bring-up
//!
//! 1. Resolve the [`AdapterConfig`] into MAC and PHY configuration
//! 2. Create the network interface (default Ethernet settings)
//! 3. Install the default protocol handlers on it
//! 4. Create the MAC and PHY instances
//! 5. Install the driver
//! 6. Create the glue and attach it to the interface
//! 7. Subscribe the [`LinkMonitor`] to all Ethernet events and to the
//!    Ethernet got-address IP event
//! 8. Start the driver
//!
//! Any failure is fatal: whatever was already created is released in reverse
//! order and construction panics. A half-initialized adapter is never handed
//! out.
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_lan8720::EthernetAdapter;
//!
//! // MDC on GPIO23, MDIO on GPIO18, PHY reset on GPIO5, PHY at address 0
//! let eth = EthernetAdapter::with_pins(EspIdf, 23, 18, Some(5), 0, true);
//!
//! // Link events are now logged by the platform's event task:
//! //   lan8720::eth: Ethernet Started
//! //   lan8720::eth: Ethernet Link Up
//! //   Ethernet HW Addr 24:0a:c4:00:00:01
//! //   lan8720::ip: Ethernet IP Address: 192.168.1.50, Netmask: 255.255.255.0, Gateway: 192.168.1.1
//! ```

use crate::config::{AdapterConfig, DriverConfig, MacConfig, NetifConfig, PhyConfig};
use crate::error::{PlatformError, PlatformResult, SetupError, SetupStep, TeardownError, TeardownStep};
use crate::event::{ETH_LOG_TAG, EventChannel, EventFilter, MacAddr, ip_event};
use crate::monitor::LinkMonitor;
use crate::platform::EthPlatform;

// =============================================================================
// Owned Resources
// =============================================================================

/// Platform objects created during bring-up
///
/// Every handle sits in an `Option` and is taken when released, so releasing
/// twice, or releasing after a partial bring-up, only touches what is still
/// alive.
pub(crate) struct Resources<P: EthPlatform> {
    netif: Option<P::Netif>,
    driver: Option<P::Driver>,
    glue: Option<P::Glue>,
    eth_subscription: Option<P::Subscription>,
    ip_subscription: Option<P::Subscription>,
    started: bool,
}

impl<P: EthPlatform> Resources<P> {
    const fn empty() -> Self {
        Self {
            netif: None,
            driver: None,
            glue: None,
            eth_subscription: None,
            ip_subscription: None,
            started: false,
        }
    }

    /// Release everything in reverse bring-up order
    ///
    /// Each step runs even if an earlier one failed. The first failure is
    /// returned.
    fn release(&mut self, platform: &mut P) -> Result<(), TeardownError> {
        let mut first: Option<TeardownError> = None;
        let mut note = |step: TeardownStep, result: PlatformResult<()>| {
            if let Err(cause) = result {
                first.get_or_insert(TeardownError { step, cause });
            }
        };

        if core::mem::take(&mut self.started)
            && let Some(driver) = self.driver
        {
            note(TeardownStep::StopDriver, platform.stop(driver));
        }
        if let Some(subscription) = self.ip_subscription.take() {
            note(TeardownStep::UnsubscribeIp, platform.unsubscribe(subscription));
        }
        if let Some(subscription) = self.eth_subscription.take() {
            note(TeardownStep::UnsubscribeEthernet, platform.unsubscribe(subscription));
        }
        if let Some(glue) = self.glue.take() {
            note(TeardownStep::DeleteGlue, platform.delete_glue(glue));
        }
        if let Some(driver) = self.driver.take() {
            note(TeardownStep::UninstallDriver, platform.uninstall_driver(driver));
        }
        if let Some(netif) = self.netif.take() {
            platform.destroy_netif(netif);
        }

        first.map_or(Ok(()), Err)
    }
}

/// Result of running the bring-up sequence
pub(crate) enum SetupOutcome<P: EthPlatform> {
    /// Every step succeeded and `driver` is started
    Ready {
        driver: P::Driver,
        resources: Resources<P>,
    },
    /// A step failed; `partial` holds whatever had been created
    Failed {
        error: SetupError,
        partial: Resources<P>,
    },
}

/// Run the bring-up sequence without deciding what a failure means
pub(crate) fn setup<P: EthPlatform>(platform: &mut P, config: &AdapterConfig) -> SetupOutcome<P> {
    let mut resources = Resources::empty();
    match bring_up(platform, config, &mut resources) {
        Ok(driver) => SetupOutcome::Ready { driver, resources },
        Err(error) => SetupOutcome::Failed {
            error,
            partial: resources,
        },
    }
}

fn bring_up<P: EthPlatform>(
    platform: &mut P,
    config: &AdapterConfig,
    resources: &mut Resources<P>,
) -> Result<P::Driver, SetupError> {
    let fail = |step: SetupStep| move |e: PlatformError| SetupError::platform(step, e);

    let (mac_config, phy_config) = config.resolve()?;

    let netif = resources
        .netif
        .insert(platform.new_netif(&NetifConfig::ethernet_default()));
    platform
        .set_default_handlers(netif)
        .map_err(fail(SetupStep::DefaultHandlers))?;

    let mac = platform.new_mac(&mac_config);
    let phy = platform.new_phy(&phy_config);
    let driver = platform
        .install_driver(DriverConfig::new(mac, phy))
        .map_err(fail(SetupStep::InstallDriver))?;
    resources.driver = Some(driver);

    let glue = resources.glue.insert(platform.new_glue(driver));
    platform
        .attach(netif, glue)
        .map_err(fail(SetupStep::AttachNetif))?;

    let monitor = LinkMonitor::new(config.verbose);
    resources.eth_subscription = Some(
        platform
            .subscribe(EventChannel::Ethernet, EventFilter::Any, monitor)
            .map_err(fail(SetupStep::SubscribeEthernet))?,
    );
    resources.ip_subscription = Some(
        platform
            .subscribe(EventChannel::Ip, EventFilter::Id(ip_event::ETH_GOT_IP), monitor)
            .map_err(fail(SetupStep::SubscribeIp))?,
    );

    platform.start(driver).map_err(fail(SetupStep::StartDriver))?;
    resources.started = true;

    Ok(driver)
}

// =============================================================================
// Adapter
// =============================================================================

/// A running LAN8720 Ethernet port
pub struct EthernetAdapter<P: EthPlatform> {
    platform: P,
    driver: P::Driver,
    monitor: LinkMonitor,
    resources: Resources<P>,
}

impl<P: EthPlatform> EthernetAdapter<P> {
    /// Bring the port up
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid or any platform step fails,
    /// after releasing whatever had already been created.
    pub fn new(mut platform: P, config: AdapterConfig) -> Self {
        match setup(&mut platform, &config) {
            SetupOutcome::Ready { driver, resources } => Self {
                platform,
                driver,
                monitor: LinkMonitor::new(config.verbose),
                resources,
            },
            SetupOutcome::Failed { error, mut partial } => {
                if let Err(e) = partial.release(&mut platform) {
                    platform.warn(ETH_LOG_TAG, format_args!("rollback after failed setup: {e}"));
                }
                panic!("ethernet setup: {error}");
            }
        }
    }

    /// Bring the port up from board pin assignments on top of the default
    /// MAC/PHY templates
    ///
    /// # Panics
    ///
    /// See [`EthernetAdapter::new`].
    pub fn with_pins(platform: P, mdc: u8, mdio: u8, reset: Option<u8>, phy_addr: i32, verbose: bool) -> Self {
        Self::new(platform, AdapterConfig::from_pins(mdc, mdio, reset, phy_addr, verbose))
    }

    /// Bring the port up from prebuilt MAC and PHY configuration
    ///
    /// # Panics
    ///
    /// See [`EthernetAdapter::new`].
    pub fn with_configs(platform: P, mac: MacConfig, phy: PhyConfig, verbose: bool) -> Self {
        Self::new(platform, AdapterConfig::from_configs(mac, phy, verbose))
    }

    /// Whether link and address events are logged
    pub const fn verbose(&self) -> bool {
        self.monitor.is_verbose()
    }

    /// The event observer registered with the platform
    pub const fn monitor(&self) -> LinkMonitor {
        self.monitor
    }

    /// Installed driver handle
    ///
    /// Valid for the adapter's whole life; [`EthernetAdapter::shutdown`]
    /// consumes the adapter.
    pub const fn driver(&self) -> P::Driver {
        self.driver
    }

    /// Hardware address of the port
    ///
    /// # Errors
    ///
    /// Whatever the driver reports.
    pub fn mac_address(&self) -> PlatformResult<MacAddr> {
        self.platform.mac_address(self.driver)
    }

    /// The platform the adapter was built on
    pub const fn platform(&self) -> &P {
        &self.platform
    }

    /// Tear the port down and report the first failure
    ///
    /// Dropping the adapter does the same but can only log the failure.
    ///
    /// # Errors
    ///
    /// The first [`TeardownError`]; later steps still ran.
    pub fn shutdown(mut self) -> Result<(), TeardownError> {
        self.resources.release(&mut self.platform)
    }
}

impl<P: EthPlatform> Drop for EthernetAdapter<P> {
    fn drop(&mut self) {
        if let Err(e) = self.resources.release(&mut self.platform) {
            self.platform.warn(ETH_LOG_TAG, format_args!("teardown: {e}"));
        }
    }
}

impl<P: EthPlatform> core::fmt::Debug for EthernetAdapter<P>
where
    P::Driver: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EthernetAdapter")
            .field("driver", &self.driver)
            .field("verbose", &self.verbose())
            .finish_non_exhaustive()
    }
}
