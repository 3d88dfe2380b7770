//! ESP32 GPIO assignments relevant to the Ethernet adapter
//!
//! The ESP32 EMAC uses **dedicated internal routing** for its RMII data
//! interface. Those pins are fixed and must not be handed to the SMI bus or
//! the PHY reset line.
//!
//! # ESP32 RMII Pin Assignments
//!
//! | Signal   | GPIO | Direction | Notes |
//! |----------|------|-----------|-------|
//! | TXD0     | 19   | Output    | Fixed internal routing |
//! | TXD1     | 22   | Output    | Fixed internal routing |
//! | TX_EN    | 21   | Output    | Fixed internal routing |
//! | RXD0     | 25   | Input     | Fixed internal routing |
//! | RXD1     | 26   | Input     | Fixed internal routing |
//! | CRS_DV   | 27   | Input     | Fixed internal routing |
//!
//! # SMI/MDIO Interface
//!
//! The SMI pins are routed through the GPIO matrix:
//! - **MDC** (clock): Default GPIO23
//! - **MDIO** (data): Default GPIO18
//!
//! GPIO34..=39 are input-only and can drive neither SMI line nor a reset.

/// EMAC TXD0 - GPIO19
pub const TXD0_GPIO: u8 = 19;
/// EMAC TXD1 - GPIO22
pub const TXD1_GPIO: u8 = 22;
/// EMAC TX_EN - GPIO21
pub const TX_EN_GPIO: u8 = 21;
/// EMAC RXD0 - GPIO25
pub const RXD0_GPIO: u8 = 25;
/// EMAC RXD1 - GPIO26
pub const RXD1_GPIO: u8 = 26;
/// EMAC CRS_DV - GPIO27
pub const CRS_DV_GPIO: u8 = 27;

/// EMAC REF_CLK external input - GPIO0
pub const REF_CLK_GPIO: u8 = 0;

/// Default MDC GPIO
pub const MDC_GPIO: u8 = 23;
/// Default MDIO GPIO
pub const MDIO_GPIO: u8 = 18;
/// Default PHY reset GPIO
pub const PHY_RESET_GPIO: u8 = 5;

/// Highest GPIO that can be driven as an output
pub const MAX_OUTPUT_GPIO: u8 = 33;

const RMII_DATA_PINS: [u8; 6] = [
    TXD0_GPIO,
    TXD1_GPIO,
    TX_EN_GPIO,
    RXD0_GPIO,
    RXD1_GPIO,
    CRS_DV_GPIO,
];

/// Whether `gpio` exists and can be driven as an output
#[inline]
pub const fn is_output_capable(gpio: u8) -> bool {
    // GPIO20, 24 and 28..=31 are not bonded out on the ESP32.
    gpio <= MAX_OUTPUT_GPIO && !matches!(gpio, 20 | 24 | 28..=31)
}

/// Whether `gpio` is taken by the fixed RMII data interface
#[inline]
pub const fn is_rmii_reserved(gpio: u8) -> bool {
    let mut i = 0;
    while i < RMII_DATA_PINS.len() {
        if RMII_DATA_PINS[i] == gpio {
            return true;
        }
        i += 1;
    }
    false
}
