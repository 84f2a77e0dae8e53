use thiserror::Error;

/// Represents errors that can occur while allocating or encoding IDs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeError {
    /// The clock reports a time earlier than the last timestamp handed out.
    /// The allocator state is left untouched.
    #[error(
        "Clock moved backwards by {delta} milliseconds (last {last_timestamp}, now {now}). Refusing to generate id"
    )]
    ClockMovedBackwards {
        last_timestamp: u64,
        now: u64,
        delta: u64,
    },
    /// Timestamp is before the epoch or past the last representable millisecond
    #[error("Timestamp {timestamp} is outside the range of epoch {epoch} (max offset {max})")]
    TimestampOutOfRange { timestamp: u64, epoch: u64, max: u64 },
    /// A component passed to the encoder does not fit its bit field
    #[error("{field} {value} is invalid. Maximum allowed value is {max}")]
    InvalidComponent {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

impl SnowflakeError {
    /// Whether the error is a clock regression
    pub fn is_clock_regression(&self) -> bool {
        matches!(self, SnowflakeError::ClockMovedBackwards { .. })
    }
}
