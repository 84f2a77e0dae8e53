//! Core Snowflake allocator
//!
//! Split into modules for testability:
//! - `state` - Combined atomic state (timestamp + sequence)
//! - `time` - Clock sources
//! - `wait` - Spin-wait on sequence exhaustion
//! - `generate` - ID generation logic

mod generate;
mod state;
mod time;
mod wait;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::codec::{SnowflakeCodec, SnowflakeParts};
use crate::config::SnowflakeConfig;
use crate::node::{HostHash, NodeIdentity, NodeIdentitySource};

use state::State;
pub use time::{unix_time_ms, ManualClock, SystemClock, TimeSource};
use wait::spin_until_after;

/// Snowflake ID allocator with cache-line alignment.
///
/// One allocator owns one node identity and one generator state. Share it by
/// reference (e.g. behind an `Arc`); every method takes `&self`.
#[derive(Debug)]
#[repr(align(64))]
pub struct Snowflake<T = SystemClock> {
    // === Hot path fields ===
    pub(crate) state: AtomicU64,
    node_prefix: u64,
    pub(crate) max_seq: u16,
    ts_shift: u8,
    epoch: u64,
    clock: T,

    // === Cold path fields ===
    node: NodeIdentity,
    config: SnowflakeConfig,
    codec: SnowflakeCodec,
}

impl Snowflake<SystemClock> {
    /// Create with default configuration and a host-derived identity
    pub fn new() -> Self {
        Self::with_config(SnowflakeConfig::default())
    }

    /// Create with custom configuration and a host-derived identity
    pub fn with_config(config: SnowflakeConfig) -> Self {
        Self::with_source(config, &HostHash)
    }

    /// Create with custom configuration and identity source
    pub fn with_source(config: SnowflakeConfig, source: &dyn NodeIdentitySource) -> Self {
        Self::with_clock(config, source, SystemClock)
    }
}

impl Default for Snowflake<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Snowflake<T> {
    /// Create with custom configuration, identity source and clock
    pub fn with_clock(config: SnowflakeConfig, source: &dyn NodeIdentitySource, clock: T) -> Self {
        let node = NodeIdentity::resolve(&config, source);
        Self {
            state: AtomicU64::new(State::IDLE.raw()),
            node_prefix: Self::compute_node_prefix(node, &config),
            max_seq: config.max_sequence() as u16,
            ts_shift: config.timestamp_shift(),
            epoch: config.epoch(),
            clock,
            node,
            config,
            codec: SnowflakeCodec::new(config),
        }
    }

    #[inline(always)]
    fn compute_node_prefix(node: NodeIdentity, config: &SnowflakeConfig) -> u64 {
        ((node.datacenter_id() as u64) << config.datacenter_shift())
            | ((node.worker_id() as u64) << config.worker_shift())
    }

    pub fn node(&self) -> NodeIdentity {
        self.node
    }

    pub fn config(&self) -> &SnowflakeConfig {
        &self.config
    }

    pub fn codec(&self) -> &SnowflakeCodec {
        &self.codec
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Split an ID produced with this allocator's layout
    #[inline]
    pub fn decode(&self, id: u64) -> SnowflakeParts {
        self.codec.decode(id)
    }

    /// Timestamp of the most recently issued ID, `None` before the first one
    pub fn last_timestamp(&self) -> Option<u64> {
        let state = self.load_state();
        (!state.is_idle()).then(|| state.timestamp())
    }

    #[inline(always)]
    pub(crate) fn load_state(&self) -> State {
        State::from_raw(self.state.load(Ordering::Acquire))
    }

    #[inline(always)]
    pub(crate) fn now_ms(&self) -> u64 {
        self.clock.now_millis()
    }

    pub(crate) fn wait_next_millis(&self, from_ts: u64) -> u64 {
        spin_until_after(from_ts, self.config.spin_yield_every(), || self.now_ms())
    }

    /// `timestamp` must already be validated against the epoch
    #[inline(always)]
    pub(crate) fn assemble_id(&self, timestamp: u64, sequence: u16) -> u64 {
        ((timestamp - self.epoch) << self.ts_shift) | self.node_prefix | (sequence as u64)
    }
}
