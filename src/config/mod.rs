//! Configuration for the Snowflake allocator

mod builder;

use std::error::Error;
use std::fmt;

pub use builder::SnowflakeConfigBuilder;
use builder::{
    DEFAULT_DATACENTER_BITS, DEFAULT_EPOCH, DEFAULT_SEQUENCE_BITS, DEFAULT_SPIN_YIELD_EVERY,
    DEFAULT_WORKER_BITS,
};

/// Bits available to timestamp, datacenter, worker and sequence.
/// The top bit of a 64-bit ID is always zero.
pub const PAYLOAD_BITS: u8 = 63;

/// Errors related to `SnowflakeConfig` builder validation
#[derive(Debug, Clone, PartialEq)]
pub enum SnowflakeConfigError {
    /// Width of a field is outside `1..=max`
    InvalidBits {
        field: &'static str,
        bits: u8,
        max: u8,
    },
}

impl fmt::Display for SnowflakeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnowflakeConfigError::InvalidBits { field, bits, max } => {
                write!(f, "{} {} must be between 1 and {}", field, bits, max)
            }
        }
    }
}

impl Error for SnowflakeConfigError {}

/// Configuration for the Snowflake allocator
///
/// Layout, most significant bit first:
/// `0 | timestamp - epoch | datacenter_id | worker_id | sequence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnowflakeConfig {
    epoch: u64,
    worker_bits: u8,
    datacenter_bits: u8,
    sequence_bits: u8,
    worker_shift: u8,
    datacenter_shift: u8,
    timestamp_shift: u8,
    worker_mask: u64,
    datacenter_mask: u64,
    sequence_mask: u64,
    timestamp_mask: u64,
    worker_id: Option<u64>,
    datacenter_id: Option<u64>,
    spin_yield_every: u32,
}

impl SnowflakeConfig {
    /// Calculate mask for given number of bits
    #[inline]
    pub(crate) const fn calculate_mask(bits: u8) -> u64 {
        (1u64 << bits) - 1
    }

    fn new(epoch: u64, worker_bits: u8, datacenter_bits: u8, sequence_bits: u8) -> Self {
        let node_and_sequence = worker_bits + datacenter_bits + sequence_bits;
        Self {
            epoch,
            worker_bits,
            datacenter_bits,
            sequence_bits,
            worker_shift: sequence_bits,
            datacenter_shift: sequence_bits + worker_bits,
            timestamp_shift: node_and_sequence,
            worker_mask: Self::calculate_mask(worker_bits),
            datacenter_mask: Self::calculate_mask(datacenter_bits),
            sequence_mask: Self::calculate_mask(sequence_bits),
            timestamp_mask: Self::calculate_mask(PAYLOAD_BITS - node_and_sequence),
            worker_id: None,
            datacenter_id: None,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
        }
    }

    pub(crate) fn from_builder(b: SnowflakeConfigBuilder) -> Self {
        let mut cfg = Self::new(b.epoch, b.worker_bits, b.datacenter_bits, b.sequence_bits);
        cfg.worker_id = b.worker_id;
        cfg.datacenter_id = b.datacenter_id;
        cfg.spin_yield_every = b.spin_yield_every;
        cfg
    }

    /// Create a new configuration builder
    pub fn builder() -> SnowflakeConfigBuilder {
        SnowflakeConfigBuilder::new()
    }

    /// Reference instant, in milliseconds since the Unix epoch
    #[inline(always)]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[inline(always)]
    pub const fn worker_bits(&self) -> u8 {
        self.worker_bits
    }

    #[inline(always)]
    pub const fn datacenter_bits(&self) -> u8 {
        self.datacenter_bits
    }

    #[inline(always)]
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    #[inline(always)]
    pub const fn timestamp_bits(&self) -> u8 {
        PAYLOAD_BITS - self.timestamp_shift
    }

    #[inline(always)]
    pub const fn max_worker_id(&self) -> u64 {
        self.worker_mask
    }

    #[inline(always)]
    pub const fn max_datacenter_id(&self) -> u64 {
        self.datacenter_mask
    }

    #[inline(always)]
    pub const fn max_sequence(&self) -> u64 {
        self.sequence_mask
    }

    /// Largest `timestamp - epoch` offset the layout can hold
    #[inline(always)]
    pub const fn max_timestamp_offset(&self) -> u64 {
        self.timestamp_mask
    }

    /// Worker id override, if configured
    #[inline(always)]
    pub const fn worker_id(&self) -> Option<u64> {
        self.worker_id
    }

    /// Datacenter id override, if configured
    #[inline(always)]
    pub const fn datacenter_id(&self) -> Option<u64> {
        self.datacenter_id
    }

    #[inline(always)]
    pub const fn spin_yield_every(&self) -> u32 {
        self.spin_yield_every
    }

    #[inline(always)]
    pub(crate) const fn worker_shift(&self) -> u8 {
        self.worker_shift
    }

    #[inline(always)]
    pub(crate) const fn datacenter_shift(&self) -> u8 {
        self.datacenter_shift
    }

    #[inline(always)]
    pub(crate) const fn timestamp_shift(&self) -> u8 {
        self.timestamp_shift
    }
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_EPOCH,
            DEFAULT_WORKER_BITS,
            DEFAULT_DATACENTER_BITS,
            DEFAULT_SEQUENCE_BITS,
        )
    }
}
