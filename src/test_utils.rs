//! Testing utilities and mock implementations
//!
//! This module provides a recording [`MockPlatform`] so the adapter's bring-up,
//! teardown and event handling can be exercised on the host without the
//! platform driver stack.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use core::fmt;
use std::collections::HashMap;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::config::{DriverConfig, MacConfig, NetifConfig, PhyConfig};
use crate::error::{PlatformError, PlatformResult};
use crate::event::{EventChannel, EventFilter, MacAddr, RawEvent};
use crate::log::LogSink;
use crate::monitor::LinkMonitor;
use crate::platform::EthPlatform;

// =============================================================================
// Handles
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetifId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlueId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockMac(pub MacConfig);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPhy(pub PhyConfig);

// =============================================================================
// Recorded Calls
// =============================================================================

/// A platform call, as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NewNetif(NetifConfig),
    SetDefaultHandlers(NetifId),
    NewMac(MacConfig),
    NewPhy(PhyConfig),
    InstallDriver {
        mac: MacConfig,
        phy: PhyConfig,
        check_link_period_ms: u32,
    },
    NewGlue(DriverId),
    Attach(NetifId, GlueId),
    Subscribe(EventChannel, EventFilter),
    Start(DriverId),
    Stop(DriverId),
    Unsubscribe(SubscriptionId),
    DeleteGlue(GlueId),
    UninstallDriver(DriverId),
    DestroyNetif(NetifId),
}

/// Platform operations that can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    DefaultHandlers,
    InstallDriver,
    Attach,
    SubscribeEthernet,
    SubscribeIp,
    Start,
    Stop,
    Unsubscribe,
    DeleteGlue,
    UninstallDriver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

// =============================================================================
// Mock Platform
// =============================================================================

#[derive(Debug)]
struct Subscription {
    id: SubscriptionId,
    channel: EventChannel,
    filter: EventFilter,
    monitor: LinkMonitor,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    calls: Vec<Call>,
    failures: HashMap<Op, PlatformError>,
    subscriptions: Vec<Subscription>,
    log: Vec<(LogLevel, &'static str, String)>,
    mac_address: MacAddr,
    mac_query_failure: Option<PlatformError>,
    mac_queries: Vec<DriverId>,
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self, op: Op) -> PlatformResult<()> {
        match self.failures.get(&op) {
            Some(err) => Err(*err),
            None => Ok(()),
        }
    }
}

/// Recording stand-in for the platform driver stack
///
/// Clones share state, so a test can keep a handle while the adapter owns the
/// platform (even across a panic).
///
/// # Example
///
/// ```ignore
/// let platform = MockPlatform::new();
/// let handle = platform.clone();
/// let adapter = EthernetAdapter::with_pins(platform, 23, 18, Some(5), 0, true);
/// handle.dispatch(RawEvent::ethernet(eth_event::START, adapter.driver()));
/// assert_eq!(handle.messages(), ["Ethernet Started"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    state: Rc<RefCell<State>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `op` fail with `err`
    pub fn fail_on(&self, op: Op, err: PlatformError) {
        self.state.borrow_mut().failures.insert(op, err);
    }

    /// Hardware address returned by the driver query
    pub fn set_mac_address(&self, bytes: [u8; 6]) {
        self.state.borrow_mut().mac_address = MacAddr(bytes);
    }

    /// Make the hardware address query fail
    pub fn fail_mac_query(&self, err: PlatformError) {
        self.state.borrow_mut().mac_query_failure = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn log_lines(&self) -> Vec<(LogLevel, &'static str, String)> {
        self.state.borrow().log.clone()
    }

    /// Just the text of every captured log line
    pub fn messages(&self) -> Vec<String> {
        self.state.borrow().log.iter().map(|(_, _, msg)| msg.clone()).collect()
    }

    pub fn mac_queries(&self) -> usize {
        self.state.borrow().mac_queries.len()
    }

    pub fn last_mac_query(&self) -> Option<DriverId> {
        self.state.borrow().mac_queries.last().copied()
    }

    pub fn subscription_count(&self) -> usize {
        self.state.borrow().subscriptions.len()
    }

    /// Deliver an event to every matching subscription, like the platform's
    /// event task would
    pub fn dispatch(&self, event: RawEvent<DriverId>) {
        let monitors: Vec<LinkMonitor> = self
            .state
            .borrow()
            .subscriptions
            .iter()
            .filter(|sub| sub.channel == event.channel && sub.filter.matches(event.id))
            .map(|sub| sub.monitor)
            .collect();

        for monitor in monitors {
            monitor.on_event(self, &event);
        }
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn push_log(&self, level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
        self.state
            .borrow_mut()
            .log
            .push((level, tag, args.to_string()));
    }
}

impl LogSink for MockPlatform {
    fn info(&self, tag: &'static str, args: fmt::Arguments<'_>) {
        self.push_log(LogLevel::Info, tag, args);
    }

    fn warn(&self, tag: &'static str, args: fmt::Arguments<'_>) {
        self.push_log(LogLevel::Warn, tag, args);
    }
}

impl EthPlatform for MockPlatform {
    type Netif = NetifId;
    type Mac = MockMac;
    type Phy = MockPhy;
    type Driver = DriverId;
    type Glue = GlueId;
    type Subscription = SubscriptionId;

    fn new_netif(&mut self, config: &NetifConfig) -> NetifId {
        self.record(Call::NewNetif(*config));
        NetifId(self.state.borrow_mut().next_id())
    }

    fn set_default_handlers(&mut self, netif: &mut NetifId) -> PlatformResult<()> {
        self.record(Call::SetDefaultHandlers(*netif));
        self.state.borrow().check(Op::DefaultHandlers)
    }

    fn new_mac(&mut self, config: &MacConfig) -> MockMac {
        self.record(Call::NewMac(*config));
        MockMac(*config)
    }

    fn new_phy(&mut self, config: &PhyConfig) -> MockPhy {
        self.record(Call::NewPhy(*config));
        MockPhy(*config)
    }

    fn install_driver(&mut self, config: DriverConfig<MockMac, MockPhy>) -> PlatformResult<DriverId> {
        self.record(Call::InstallDriver {
            mac: config.mac.0,
            phy: config.phy.0,
            check_link_period_ms: config.check_link_period_ms,
        });
        let mut state = self.state.borrow_mut();
        state.check(Op::InstallDriver)?;
        Ok(DriverId(state.next_id()))
    }

    fn new_glue(&mut self, driver: DriverId) -> GlueId {
        self.record(Call::NewGlue(driver));
        GlueId(self.state.borrow_mut().next_id())
    }

    fn attach(&mut self, netif: &mut NetifId, glue: &GlueId) -> PlatformResult<()> {
        self.record(Call::Attach(*netif, *glue));
        self.state.borrow().check(Op::Attach)
    }

    fn subscribe(
        &mut self,
        channel: EventChannel,
        filter: EventFilter,
        monitor: LinkMonitor,
    ) -> PlatformResult<SubscriptionId> {
        self.record(Call::Subscribe(channel, filter));
        let mut state = self.state.borrow_mut();
        let op = match channel {
            EventChannel::Ip => Op::SubscribeIp,
            _ => Op::SubscribeEthernet,
        };
        state.check(op)?;
        let id = SubscriptionId(state.next_id());
        state.subscriptions.push(Subscription {
            id,
            channel,
            filter,
            monitor,
        });
        Ok(id)
    }

    fn start(&mut self, driver: DriverId) -> PlatformResult<()> {
        self.record(Call::Start(driver));
        self.state.borrow().check(Op::Start)
    }

    fn mac_address(&self, driver: DriverId) -> PlatformResult<MacAddr> {
        let mut state = self.state.borrow_mut();
        state.mac_queries.push(driver);
        match state.mac_query_failure {
            Some(err) => Err(err),
            None => Ok(state.mac_address),
        }
    }

    fn stop(&mut self, driver: DriverId) -> PlatformResult<()> {
        self.record(Call::Stop(driver));
        self.state.borrow().check(Op::Stop)
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> PlatformResult<()> {
        self.record(Call::Unsubscribe(subscription));
        let mut state = self.state.borrow_mut();
        state.check(Op::Unsubscribe)?;
        state.subscriptions.retain(|sub| sub.id != subscription);
        Ok(())
    }

    fn delete_glue(&mut self, glue: GlueId) -> PlatformResult<()> {
        self.record(Call::DeleteGlue(glue));
        self.state.borrow().check(Op::DeleteGlue)
    }

    fn uninstall_driver(&mut self, driver: DriverId) -> PlatformResult<()> {
        self.record(Call::UninstallDriver(driver));
        self.state.borrow().check(Op::UninstallDriver)
    }

    fn destroy_netif(&mut self, netif: NetifId) {
        self.record(Call::DestroyNetif(netif));
    }
}
