//! Spin-wait for sequence exhaustion
//!
//! Re-polls the clock instead of sleeping so the wait ends as soon as the
//! next millisecond starts.

use std::thread;

/// Poll `get_time` until it reports a value past `from_timestamp`, and return it.
///
/// Yields the thread every `yield_every` polls; 0 never yields.
#[inline]
pub fn spin_until_after<F>(from_timestamp: u64, yield_every: u32, get_time: F) -> u64
where
    F: Fn() -> u64,
{
    let mut polls: u32 = 0;

    loop {
        let new_ts = get_time();
        if new_ts > from_timestamp {
            return new_ts;
        }

        std::hint::spin_loop();

        polls = polls.wrapping_add(1);
        if yield_every != 0 && polls % yield_every == 0 {
            thread::yield_now();
        }
    }
}
