//! Combined atomic state for last timestamp + sequence
//!
//! Packs a 52-bit absolute timestamp and 12-bit sequence into single u64 for lock-free CAS

/// Combined state: upper 52 bits = timestamp, lower 12 bits = sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State(u64);

impl State {
    /// Number of bits used for sequence
    pub const SEQ_BITS: u32 = 12;

    /// Mask to extract sequence from raw value
    pub const SEQ_MASK: u64 = (1 << Self::SEQ_BITS) - 1;

    /// No ID has been issued yet
    pub const IDLE: State = State(u64::MAX);

    /// Largest timestamp a non-idle state may hold
    pub const MAX_TIMESTAMP: u64 = (1 << (64 - Self::SEQ_BITS)) - 2;

    /// Create new state from timestamp and sequence
    #[inline(always)]
    pub const fn new(timestamp: u64, sequence: u16) -> Self {
        Self((timestamp << Self::SEQ_BITS) | (sequence as u64))
    }

    #[inline(always)]
    pub const fn is_idle(self) -> bool {
        self.0 == Self::IDLE.0
    }

    /// Extract timestamp from state
    #[inline(always)]
    pub const fn timestamp(self) -> u64 {
        self.0 >> Self::SEQ_BITS
    }

    /// Extract sequence from state
    #[inline(always)]
    pub const fn sequence(self) -> u16 {
        (self.0 & Self::SEQ_MASK) as u16
    }

    /// Get raw u64 value for atomic operations
    #[inline(always)]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Create state from raw u64 value
    #[inline(always)]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}
