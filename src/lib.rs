//! ESP32 LAN8720 Ethernet Adapter
//!
//! A `no_std`, `no_alloc` convenience layer that brings up an ESP32 EMAC +
//! LAN8720 PHY through the platform's Ethernet driver stack and logs link and
//! address changes.
//!
//! # Architecture
//!
//! The crate is glue, not a driver. It is organized into:
//!
//! 1. **Configuration** ([`config`]): MAC/PHY templates, pin validation, board
//!    presets ([`boards`])
//! 2. **Adapter** ([`EthernetAdapter`]): the fixed bring-up sequence, rollback
//!    on failure and teardown on drop
//! 3. **Events** ([`event`], [`LinkMonitor`]): decoding platform events and
//!    turning them into status lines
//! 4. **Platform seam** ([`EthPlatform`], [`LogSink`]): everything the adapter
//!    consumes from the driver stack
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for public types and the `log::DefmtSink`
//! - `log`: Enable `log::FacadeSink`, which forwards status lines to the `log` crate
//! - `smoltcp`: Enable smoltcp conversions and address application
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_lan8720::{EthernetAdapter, boards::wt32_eth01::Wt32Eth01};
//!
//! // Piecewise: MDC, MDIO, PHY reset GPIO, PHY address, verbose
//! let eth = EthernetAdapter::with_pins(platform, 23, 18, Some(5), 0, true);
//!
//! // Or from a board preset
//! let eth = EthernetAdapter::new(platform, Wt32Eth01::adapter_config(true));
//! ```
//!
//! Setup failures abort: the constructor panics after releasing whatever it
//! had created. Dropping the adapter stops the driver and releases the
//! interface, glue, driver and both event subscriptions in reverse order.

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod boards;
pub mod config;
pub mod event;
pub mod gpio;
pub mod log;
pub mod platform;

mod adapter;
mod error;
mod monitor;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use adapter::EthernetAdapter;
pub use config::{
    AdapterConfig, DriverConfig, MacConfig, NetifConfig, PHY_ADDR_AUTO, PhyConfig, PhyInterface,
    RmiiClockMode, Wiring,
};
pub use error::{
    ConfigError, ConfigResult, EventError, EventResult, PlatformError, PlatformResult, SetupCause,
    SetupError, SetupStep, TeardownError, TeardownStep,
};
pub use event::{EventChannel, EventFilter, EventPayload, IpInfo, LinkEvent, MacAddr, RawEvent};
pub use crate::log::LogSink;
pub use monitor::LinkMonitor;
pub use platform::EthPlatform;
