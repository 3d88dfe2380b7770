//! WT32-ETH01 board configuration (ESP32 + LAN8720A).
//!
//! This module provides constants and helpers for the WT32-ETH01 board so
//! bring-up code does not have to repeat its wiring. The PHY has no reset line
//! on this board. Its 50 MHz oscillator is gated by GPIO16; the adapter does
//! not drive that pin, so the platform must enable the oscillator before the
//! driver starts.

use crate::{AdapterConfig, MacConfig, PhyConfig, RmiiClockMode};

/// WT32-ETH01 board configuration constants and helpers.
pub struct Wt32Eth01;

impl Wt32Eth01 {
    // =========================================================================
    // PHY Configuration
    // =========================================================================

    /// PHY address (PHYAD0 is pulled HIGH on WT32-ETH01).
    pub const PHY_ADDR: i32 = 1;

    /// PHY reset GPIO (None = not connected, use soft reset).
    pub const PHY_RST_GPIO: Option<u8> = None;

    // =========================================================================
    // SMI (MDIO) Pins
    // =========================================================================

    /// MDC (Management Data Clock) GPIO.
    pub const MDC_GPIO: u8 = 23;

    /// MDIO (Management Data I/O) GPIO.
    pub const MDIO_GPIO: u8 = 18;

    // =========================================================================
    // Clock Configuration
    // =========================================================================

    /// Reference clock input GPIO (50 MHz from external oscillator).
    pub const REF_CLK_GPIO: u8 = 0;

    // =========================================================================
    // Configuration
    // =========================================================================

    /// MAC configuration: default template with the board's SMI pins and
    /// external reference clock on GPIO0.
    #[must_use]
    pub const fn mac_config() -> MacConfig {
        MacConfig::new()
            .with_smi_pins(Self::MDC_GPIO, Self::MDIO_GPIO)
            .with_rmii_clock(RmiiClockMode::ExternalInput {
                gpio: Self::REF_CLK_GPIO,
            })
    }

    /// PHY configuration: address 1, no hardware reset line.
    #[must_use]
    pub const fn phy_config() -> PhyConfig {
        PhyConfig::new()
            .with_address(Self::PHY_ADDR)
            .with_reset_gpio(Self::PHY_RST_GPIO)
    }

    /// Adapter configuration for this board.
    #[must_use]
    pub const fn adapter_config(verbose: bool) -> AdapterConfig {
        AdapterConfig::from_configs(Self::mac_config(), Self::phy_config(), verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EthernetAdapter;
    use crate::test_utils::{Call, MockPlatform};

    #[test]
    fn board_config_resolves() {
        let (mac, phy) = Wt32Eth01::adapter_config(true).resolve().unwrap();
        assert_eq!(mac.smi_mdc_gpio, 23);
        assert_eq!(mac.smi_mdio_gpio, 18);
        assert_eq!(mac.clock, RmiiClockMode::ExternalInput { gpio: 0 });
        assert_eq!(phy.phy_addr, 1);
        assert_eq!(phy.reset_gpio, None);
    }

    #[test]
    fn board_config_matches_piecewise() {
        let piecewise = AdapterConfig::from_pins(
            Wt32Eth01::MDC_GPIO,
            Wt32Eth01::MDIO_GPIO,
            Wt32Eth01::PHY_RST_GPIO,
            Wt32Eth01::PHY_ADDR,
            true,
        );
        assert_eq!(piecewise.resolve(), Wt32Eth01::adapter_config(true).resolve());
    }

    #[test]
    fn board_brings_up() {
        let platform = MockPlatform::new();
        let handle = platform.clone();
        let _adapter = EthernetAdapter::new(platform, Wt32Eth01::adapter_config(false));
        assert!(handle.calls().contains(&Call::NewPhy(Wt32Eth01::phy_config())));
    }
}
