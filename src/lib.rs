//! # snowflake-alloc
//!
//! A Snowflake-style 64-bit unique ID allocator.
//!
//! Each ID packs, most significant first: a zero sign bit, milliseconds
//! since a fixed epoch (41 bits by default), a 5-bit datacenter id, a 5-bit
//! worker id and a 12-bit per-millisecond sequence.
//!
//! - 📈 Time-sorted and strictly increasing per allocator
//! - 🔒 Thread-safe, lock-free state transitions
//! - ⏪ Refuses to issue IDs while the clock runs behind the last one
//! - 🌐 Pluggable node identity (explicit, environment, host hash, random)
//!
//! ```
//! use snowflake_alloc::{Explicit, Snowflake, SnowflakeConfig};
//!
//! let ids = Snowflake::with_source(SnowflakeConfig::default(), &Explicit::new(1, 2));
//! let id = ids.generate().unwrap();
//! let parts = ids.decode(id);
//! assert_eq!((parts.datacenter_id, parts.worker_id), (2, 1));
//! ```

#![forbid(unsafe_code)]

mod codec;
mod config;
mod error;
mod generator;
mod node;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use codec::{SnowflakeCodec, SnowflakeParts};
pub use config::{SnowflakeConfig, SnowflakeConfigBuilder, SnowflakeConfigError};
pub use error::SnowflakeError;
pub use generator::{unix_time_ms, ManualClock, Snowflake, SystemClock, TimeSource};
pub use node::{
    Chain, Environment, Explicit, HostHash, NodeIdentity, NodeIdentitySource, Random,
    DATACENTER_ID_VAR, WORKER_ID_VAR,
};
