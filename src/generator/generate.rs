//! ID generation logic
//!
//! Every transition of the generator state is a single compare-and-swap, so
//! a successful CAS is the critical section: at most one caller claims a
//! given `(timestamp, sequence)` pair.

use std::sync::atomic::Ordering;

use tracing::{trace, warn};

use super::state::State;
use super::{Snowflake, TimeSource};
use crate::error::SnowflakeError;

impl<T: TimeSource> Snowflake<T> {
    /// Generate a new Snowflake ID.
    ///
    /// IDs from one allocator are strictly increasing. Fails with
    /// [`SnowflakeError::ClockMovedBackwards`] if the clock reads earlier
    /// than the last issued ID; the state is then left untouched and
    /// generation resumes once the clock catches up.
    #[inline]
    pub fn generate(&self) -> Result<u64, SnowflakeError> {
        // State first, then clock: a backward step seen here is real, not a race.
        let current = self.load_state();
        let now = self.now_ms();

        if let Some(id) = self.try_next(current, now)? {
            return Ok(id);
        }

        self.generate_slow_path()
    }

    /// Generate an ID as a (always positive) `i64`
    #[inline]
    pub fn generate_i64(&self) -> Result<i64, SnowflakeError> {
        self.generate().map(|id| id as i64)
    }

    /// Generate an ID in decimal string form
    pub fn generate_string(&self) -> Result<String, SnowflakeError> {
        self.generate().map(|id| id.to_string())
    }

    /// One attempt against a state snapshot; `Ok(None)` means another caller won the CAS
    fn try_next(&self, current: State, now: u64) -> Result<Option<u64>, SnowflakeError> {
        if current.is_idle() || now > current.timestamp() {
            return self.try_claim_millisecond(current, now);
        }

        if now < current.timestamp() {
            return Err(self.clock_regression(current.timestamp(), now));
        }

        if current.sequence() < self.max_seq {
            return Ok(self.try_increment_sequence(current));
        }

        trace!(
            timestamp = current.timestamp(),
            "sequence exhausted, waiting for next millisecond"
        );
        let next_ts = self.wait_next_millis(current.timestamp());
        self.try_claim_millisecond(current, next_ts)
    }

    /// Try to claim new millisecond with sequence 0
    #[inline]
    pub(crate) fn try_claim_millisecond(
        &self,
        current: State,
        new_ts: u64,
    ) -> Result<Option<u64>, SnowflakeError> {
        self.codec.timestamp_offset(new_ts)?;
        if new_ts > State::MAX_TIMESTAMP {
            return Err(SnowflakeError::TimestampOutOfRange {
                timestamp: new_ts,
                epoch: self.epoch,
                max: State::MAX_TIMESTAMP.saturating_sub(self.epoch),
            });
        }

        let new_state = State::new(new_ts, 0);
        Ok(self
            .cas_state(current, new_state)
            .then(|| self.assemble_id(new_ts, 0)))
    }

    /// Try to increment sequence within current millisecond
    #[inline]
    pub(crate) fn try_increment_sequence(&self, current: State) -> Option<u64> {
        let new_seq = current.sequence() + 1;
        let new_state = State::new(current.timestamp(), new_seq);
        self.cas_state(current, new_state)
            .then(|| self.assemble_id(current.timestamp(), new_seq))
    }

    /// Atomic compare-and-swap on state
    #[inline(always)]
    pub(crate) fn cas_state(&self, expected: State, new: State) -> bool {
        self.state
            .compare_exchange(expected.raw(), new.raw(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Slow path for contended generation
    #[cold]
    #[inline(never)]
    fn generate_slow_path(&self) -> Result<u64, SnowflakeError> {
        loop {
            let current = self.load_state();
            let now = self.now_ms();

            if let Some(id) = self.try_next(current, now)? {
                return Ok(id);
            }
        }
    }

    #[cold]
    fn clock_regression(&self, last_timestamp: u64, now: u64) -> SnowflakeError {
        let delta = last_timestamp - now;
        warn!(
            last_timestamp,
            now, delta, "clock moved backwards, refusing to generate id"
        );
        SnowflakeError::ClockMovedBackwards {
            last_timestamp,
            now,
            delta,
        }
    }
}
