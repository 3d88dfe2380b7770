//! Configuration types for the LAN8720 Ethernet adapter
//!
//! [`MacConfig`] and [`PhyConfig`] mirror the platform driver stack's MAC and
//! PHY configuration structures. Their `Default` impls are the stack's
//! documented templates; [`AdapterConfig`] either patches four fields of those
//! templates or carries fully prebuilt structures.

use crate::error::{ConfigError, ConfigResult};
use crate::event::ip_event;
use crate::gpio;

/// PHY address value that asks the driver to probe the SMI bus
pub const PHY_ADDR_AUTO: i32 = -1;

/// Highest addressable PHY on the SMI bus (5-bit field)
pub const MAX_PHY_ADDR: i32 = 31;

/// PHY interface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyInterface {
    /// Media Independent Interface
    Mii,
    /// Reduced Media Independent Interface
    #[default]
    Rmii,
}

/// Clock mode for RMII interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RmiiClockMode {
    /// External 50MHz clock input on specified GPIO
    ExternalInput {
        /// GPIO number for clock input (typically GPIO0)
        gpio: u8,
    },
    /// Internal 50MHz clock output on specified GPIO
    InternalOutput {
        /// GPIO number for clock output (GPIO16 or GPIO17)
        gpio: u8,
    },
}

impl RmiiClockMode {
    /// GPIO carrying the reference clock
    #[must_use]
    pub const fn gpio(self) -> u8 {
        match self {
            RmiiClockMode::ExternalInput { gpio } | RmiiClockMode::InternalOutput { gpio } => gpio,
        }
    }
}

impl Default for RmiiClockMode {
    fn default() -> Self {
        RmiiClockMode::ExternalInput {
            gpio: gpio::REF_CLK_GPIO,
        }
    }
}

// =============================================================================
// MAC Configuration
// =============================================================================

/// Software reset timeout of the MAC, in milliseconds
pub const DEFAULT_SW_RESET_TIMEOUT_MS: u32 = 100;
/// Stack size of the driver's receive task, in bytes
pub const DEFAULT_RX_TASK_STACK_SIZE: u32 = 2048;
/// Priority of the driver's receive task
pub const DEFAULT_RX_TASK_PRIO: u32 = 15;

/// MAC-side configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacConfig {
    /// Software reset timeout in milliseconds
    pub sw_reset_timeout_ms: u32,
    /// Receive task stack size in bytes
    pub rx_task_stack_size: u32,
    /// Receive task priority
    pub rx_task_prio: u32,
    /// SMI management data clock GPIO
    pub smi_mdc_gpio: u8,
    /// SMI management data I/O GPIO
    pub smi_mdio_gpio: u8,
    /// Driver-specific flags, passed through untouched
    pub flags: u32,
    /// Data interface towards the PHY
    pub interface: PhyInterface,
    /// RMII reference clock routing
    pub clock: RmiiClockMode,
}

impl MacConfig {
    /// The platform's default MAC configuration template
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sw_reset_timeout_ms: DEFAULT_SW_RESET_TIMEOUT_MS,
            rx_task_stack_size: DEFAULT_RX_TASK_STACK_SIZE,
            rx_task_prio: DEFAULT_RX_TASK_PRIO,
            smi_mdc_gpio: gpio::MDC_GPIO,
            smi_mdio_gpio: gpio::MDIO_GPIO,
            flags: 0,
            interface: PhyInterface::Rmii,
            clock: RmiiClockMode::ExternalInput {
                gpio: gpio::REF_CLK_GPIO,
            },
        }
    }

    /// Route the SMI bus to the given MDC and MDIO GPIOs
    #[must_use]
    pub const fn with_smi_pins(mut self, mdc: u8, mdio: u8) -> Self {
        self.smi_mdc_gpio = mdc;
        self.smi_mdio_gpio = mdio;
        self
    }

    /// Set the RMII reference clock routing
    #[must_use]
    pub const fn with_rmii_clock(mut self, clock: RmiiClockMode) -> Self {
        self.clock = clock;
        self
    }

    /// Set the receive task priority and stack size
    #[must_use]
    pub const fn with_rx_task(mut self, prio: u32, stack_size: u32) -> Self {
        self.rx_task_prio = prio;
        self.rx_task_stack_size = stack_size;
        self
    }

    /// Check the SMI routing against the ESP32 pin map
    pub fn validate(&self) -> ConfigResult<()> {
        let (mdc, mdio) = (self.smi_mdc_gpio, self.smi_mdio_gpio);
        if !gpio::is_output_capable(mdc) || !gpio::is_output_capable(mdio) {
            return Err(ConfigError::InvalidSmiPin);
        }
        if mdc == mdio {
            return Err(ConfigError::SmiPinConflict);
        }
        let clock = self.clock.gpio();
        if gpio::is_rmii_reserved(mdc) || gpio::is_rmii_reserved(mdio) || mdc == clock || mdio == clock {
            return Err(ConfigError::ReservedPin);
        }
        Ok(())
    }
}

impl Default for MacConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// PHY Configuration
// =============================================================================

/// PHY reset timeout, in milliseconds
pub const DEFAULT_PHY_RESET_TIMEOUT_MS: u32 = 100;
/// Auto-negotiation timeout, in milliseconds
pub const DEFAULT_AUTONEGO_TIMEOUT_MS: u32 = 4000;

/// PHY-side configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyConfig {
    /// SMI address of the PHY, or [`PHY_ADDR_AUTO`]
    pub phy_addr: i32,
    /// Reset timeout in milliseconds
    pub reset_timeout_ms: u32,
    /// Auto-negotiation timeout in milliseconds
    pub autonego_timeout_ms: u32,
    /// GPIO wired to the PHY's nRST line (`None` = soft reset only)
    pub reset_gpio: Option<u8>,
}

impl PhyConfig {
    /// The platform's default PHY configuration template
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phy_addr: PHY_ADDR_AUTO,
            reset_timeout_ms: DEFAULT_PHY_RESET_TIMEOUT_MS,
            autonego_timeout_ms: DEFAULT_AUTONEGO_TIMEOUT_MS,
            reset_gpio: Some(gpio::PHY_RESET_GPIO),
        }
    }

    /// Set the PHY's SMI address
    #[must_use]
    pub const fn with_address(mut self, phy_addr: i32) -> Self {
        self.phy_addr = phy_addr;
        self
    }

    /// Set the hardware reset GPIO
    #[must_use]
    pub const fn with_reset_gpio(mut self, reset_gpio: Option<u8>) -> Self {
        self.reset_gpio = reset_gpio;
        self
    }

    /// Whether the driver will probe for the PHY address
    #[must_use]
    pub const fn is_auto_address(&self) -> bool {
        self.phy_addr == PHY_ADDR_AUTO
    }

    /// Check the address range and reset pin
    pub fn validate(&self) -> ConfigResult<()> {
        if self.phy_addr != PHY_ADDR_AUTO && !(0..=MAX_PHY_ADDR).contains(&self.phy_addr) {
            return Err(ConfigError::InvalidPhyAddress);
        }
        match self.reset_gpio {
            Some(pin) if !gpio::is_output_capable(pin) || gpio::is_rmii_reserved(pin) => {
                Err(ConfigError::InvalidResetPin)
            }
            _ => Ok(()),
        }
    }
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Network Interface / Driver Configuration
// =============================================================================

/// Default network-interface settings for an Ethernet port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetifConfig {
    /// Unique interface key
    pub if_key: &'static str,
    /// Interface description
    pub if_desc: &'static str,
    /// Routing priority among interfaces (higher wins)
    pub route_prio: i32,
    /// Run a DHCP client on the interface
    pub dhcp_client: bool,
    /// Event id raised on the IP channel when an address is obtained
    pub got_ip_event: i32,
    /// Event id raised on the IP channel when the address is lost
    pub lost_ip_event: i32,
}

impl NetifConfig {
    /// The platform's default Ethernet interface settings
    #[must_use]
    pub const fn ethernet_default() -> Self {
        Self {
            if_key: "ETH_DEF",
            if_desc: "eth",
            route_prio: 50,
            dhcp_client: true,
            got_ip_event: ip_event::ETH_GOT_IP,
            lost_ip_event: ip_event::ETH_LOST_IP,
        }
    }
}

impl Default for NetifConfig {
    fn default() -> Self {
        Self::ethernet_default()
    }
}

/// Link status polling period used by the driver, in milliseconds
pub const DEFAULT_CHECK_LINK_PERIOD_MS: u32 = 2000;

/// MAC and PHY instances combined for driver installation
#[derive(Debug)]
pub struct DriverConfig<M, P> {
    /// MAC driver instance
    pub mac: M,
    /// PHY driver instance
    pub phy: P,
    /// Link status polling period in milliseconds
    pub check_link_period_ms: u32,
}

impl<M, P> DriverConfig<M, P> {
    /// Combine a MAC and PHY instance with the default link polling period
    pub const fn new(mac: M, phy: P) -> Self {
        Self {
            mac,
            phy,
            check_link_period_ms: DEFAULT_CHECK_LINK_PERIOD_MS,
        }
    }
}

// =============================================================================
// Adapter Configuration
// =============================================================================

/// How the MAC and PHY configuration is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wiring {
    /// Patch the default templates with four board-specific values
    Pins {
        /// SMI management data clock GPIO
        mdc: u8,
        /// SMI management data I/O GPIO
        mdio: u8,
        /// PHY reset GPIO (`None` = not connected)
        reset: Option<u8>,
        /// PHY SMI address, or [`PHY_ADDR_AUTO`]
        phy_addr: i32,
    },
    /// Use the given structures as they are
    Prebuilt {
        /// MAC configuration
        mac: MacConfig,
        /// PHY configuration
        phy: PhyConfig,
    },
}

/// Everything the adapter needs to bring the port up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdapterConfig {
    /// MAC/PHY configuration source
    pub wiring: Wiring,
    /// Log link and address events
    pub verbose: bool,
}

impl AdapterConfig {
    /// Piecewise configuration on top of the default templates
    #[must_use]
    pub const fn from_pins(mdc: u8, mdio: u8, reset: Option<u8>, phy_addr: i32, verbose: bool) -> Self {
        Self {
            wiring: Wiring::Pins {
                mdc,
                mdio,
                reset,
                phy_addr,
            },
            verbose,
        }
    }

    /// Prebuilt MAC and PHY configuration
    #[must_use]
    pub const fn from_configs(mac: MacConfig, phy: PhyConfig, verbose: bool) -> Self {
        Self {
            wiring: Wiring::Prebuilt { mac, phy },
            verbose,
        }
    }

    /// Resolve to the MAC and PHY configuration handed to the driver
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the PHY address or any pin assignment is
    /// not usable on the ESP32.
    pub fn resolve(&self) -> ConfigResult<(MacConfig, PhyConfig)> {
        let (mac, phy) = match self.wiring {
            Wiring::Pins {
                mdc,
                mdio,
                reset,
                phy_addr,
            } => (
                MacConfig::new().with_smi_pins(mdc, mdio),
                PhyConfig::new().with_address(phy_addr).with_reset_gpio(reset),
            ),
            Wiring::Prebuilt { mac, phy } => (mac, phy),
        };
        phy.validate()?;
        mac.validate()?;
        Ok((mac, phy))
    }
}
