//! Logging sink
//!
//! The adapter never formats into a buffer of its own; it hands the sink a
//! static tag and `core::fmt::Arguments`. On target the sink is typically the
//! platform's log facility. Two ready-made sinks are feature gated:
//!
//! - `FacadeSink` (`log`): forwards to the `log` crate with the tag as the
//!   record target, which is where ESP-IDF's Rust bindings route `ESP_LOG`
//! - `DefmtSink` (`defmt`): forwards to `defmt`, tag first

use core::fmt;

/// Destination for the adapter's status lines
pub trait LogSink {
    /// Informational line
    fn info(&self, tag: &'static str, args: fmt::Arguments<'_>);

    /// Something went wrong but the adapter carries on
    fn warn(&self, tag: &'static str, args: fmt::Arguments<'_>);
}

/// Sink that forwards to `defmt`
#[cfg(feature = "defmt")]
#[cfg_attr(docsrs, doc(cfg(feature = "defmt")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
impl LogSink for DefmtSink {
    fn info(&self, tag: &'static str, args: fmt::Arguments<'_>) {
        defmt::info!("{=str}: {}", tag, defmt::Display2Format(&args));
    }

    fn warn(&self, tag: &'static str, args: fmt::Arguments<'_>) {
        defmt::warn!("{=str}: {}", tag, defmt::Display2Format(&args));
    }
}

/// Sink that forwards to the `log` facade, using the tag as the record target
#[cfg(feature = "log")]
#[cfg_attr(docsrs, doc(cfg(feature = "log")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeSink;

#[cfg(feature = "log")]
impl LogSink for FacadeSink {
    fn info(&self, tag: &'static str, args: fmt::Arguments<'_>) {
        ::log::info!(target: tag, "{args}");
    }

    fn warn(&self, tag: &'static str, args: fmt::Arguments<'_>) {
        ::log::warn!(target: tag, "{args}");
    }
}
