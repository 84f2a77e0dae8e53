//! SnowflakeConfig builder for constructing configuration

use super::{SnowflakeConfig, SnowflakeConfigError};

/// Default configuration values
pub(super) const DEFAULT_EPOCH: u64 = 1546300800000; // January 1, 2019 UTC
pub(super) const DEFAULT_WORKER_BITS: u8 = 5;
pub(super) const DEFAULT_DATACENTER_BITS: u8 = 5;
pub(super) const DEFAULT_SEQUENCE_BITS: u8 = 12;
pub(super) const DEFAULT_SPIN_YIELD_EVERY: u32 = 16;

const MAX_NODE_FIELD_BITS: u8 = 5;
const MAX_SEQUENCE_BITS: u8 = 12;

/// Builder for SnowflakeConfig
#[derive(Debug)]
pub struct SnowflakeConfigBuilder {
    pub(super) epoch: u64,
    pub(super) worker_bits: u8,
    pub(super) datacenter_bits: u8,
    pub(super) sequence_bits: u8,
    pub(super) worker_id: Option<u64>,
    pub(super) datacenter_id: Option<u64>,
    pub(super) spin_yield_every: u32,
}

impl SnowflakeConfigBuilder {
    /// Create a new SnowflakeConfigBuilder with default values
    pub fn new() -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
            worker_bits: DEFAULT_WORKER_BITS,
            datacenter_bits: DEFAULT_DATACENTER_BITS,
            sequence_bits: DEFAULT_SEQUENCE_BITS,
            worker_id: None,
            datacenter_id: None,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
        }
    }

    /// Set the epoch in milliseconds since the Unix epoch.
    ///
    /// Must stay fixed for the lifetime of an ID space; changing it makes
    /// previously issued IDs decode to different instants.
    pub const fn epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Set the width of the worker id field (1-5)
    pub fn worker_bits(mut self, bits: u8) -> Result<Self, SnowflakeConfigError> {
        self.worker_bits = check_bits("worker_bits", bits, MAX_NODE_FIELD_BITS)?;
        Ok(self)
    }

    /// Set the width of the datacenter id field (1-5)
    pub fn datacenter_bits(mut self, bits: u8) -> Result<Self, SnowflakeConfigError> {
        self.datacenter_bits = check_bits("datacenter_bits", bits, MAX_NODE_FIELD_BITS)?;
        Ok(self)
    }

    /// Set the width of the per-millisecond sequence (1-12)
    pub fn sequence_bits(mut self, bits: u8) -> Result<Self, SnowflakeConfigError> {
        self.sequence_bits = check_bits("sequence_bits", bits, MAX_SEQUENCE_BITS)?;
        Ok(self)
    }

    /// Pin the worker id instead of deriving it.
    /// Out-of-range values are replaced by a random id when the allocator is built.
    pub const fn worker_id(mut self, id: u64) -> Self {
        self.worker_id = Some(id);
        self
    }

    /// Pin the datacenter id instead of deriving it.
    /// Out-of-range values are replaced by a random id when the allocator is built.
    pub const fn datacenter_id(mut self, id: u64) -> Self {
        self.datacenter_id = Some(id);
        self
    }

    /// Yield every N clock polls while waiting out an exhausted millisecond; 0 disables yielding
    pub const fn spin_yield_every(mut self, n: u32) -> Self {
        self.spin_yield_every = n;
        self
    }

    /// Build the final SnowflakeConfig
    pub fn build(self) -> SnowflakeConfig {
        SnowflakeConfig::from_builder(self)
    }
}

impl Default for SnowflakeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_bits(field: &'static str, bits: u8, max: u8) -> Result<u8, SnowflakeConfigError> {
    if !(1..=max).contains(&bits) {
        return Err(SnowflakeConfigError::InvalidBits { field, bits, max });
    }
    Ok(bits)
}
