//! Board-specific helpers and pin mappings.
//!
//! This module provides opinionated board configurations to reduce boilerplate
//! for common ESP32 + LAN8720 Ethernet boards.
//!
//! # Supported Boards
//!
//! - WT32-ETH01 (LAN8720A, external 50 MHz oscillator)

pub mod wt32_eth01;
