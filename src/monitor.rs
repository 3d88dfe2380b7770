//! Link monitor: the adapter's event callback
//!
//! The platform dispatcher invokes [`LinkMonitor::on_event`] for every event
//! that passes one of the adapter's two subscriptions. The monitor is a
//! `Copy` value holding only the verbosity flag, captured when the adapter is
//! built, so the dispatcher task can run it without touching adapter state.

use crate::event::{ETH_LOG_TAG, EventChannel, IP_LOG_TAG, LinkEvent, RawEvent};
use crate::platform::EthPlatform;

/// Observer for Ethernet and IP events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkMonitor {
    verbose: bool,
}

impl LinkMonitor {
    /// Create a monitor
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Whether recognized events are logged
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Handle one event from the dispatcher
    ///
    /// When verbose, each recognized (channel, id) pair produces exactly one
    /// log line; everything else produces none. When quiet, the event is not
    /// even decoded.
    pub fn on_event<P>(&self, platform: &P, event: &RawEvent<P::Driver>)
    where
        P: EthPlatform + ?Sized,
    {
        if !self.verbose {
            return;
        }

        match LinkEvent::decode(platform, event) {
            Ok(Some(link)) => platform.info(link.tag(), format_args!("{link}")),
            Ok(None) => {}
            Err(e) => platform.warn(
                channel_tag(event.channel),
                format_args!("dropping {} event {}: {e}", event.channel.name(), event.id),
            ),
        }
    }
}

fn channel_tag(channel: EventChannel) -> &'static str {
    match channel {
        EventChannel::Ip => IP_LOG_TAG,
        _ => ETH_LOG_TAG,
    }
}
