//! Pluggable strategies for deriving a node identity

use std::env;

use rand::Rng;
use tracing::warn;

use super::host;

/// Default variable holding the worker id
pub const WORKER_ID_VAR: &str = "SNOWFLAKE_WORKER_ID";
/// Default variable holding the datacenter id
pub const DATACENTER_ID_VAR: &str = "SNOWFLAKE_DATACENTER_ID";

/// A source of candidate worker and datacenter ids.
///
/// `max` is the largest value the configured layout accepts. Returning
/// `None` means the source has nothing to offer and the resolver falls back
/// to a random id. Values above `max` are also replaced by a random id.
///
/// Implement this to plug in a coordinated source such as an id reserved in
/// an external registry.
///
/// # Example
///
/// ```
/// use snowflake_alloc::NodeIdentitySource;
///
/// struct Reserved(u64);
///
/// impl NodeIdentitySource for Reserved {
///     fn name(&self) -> &str {
///         "registry"
///     }
///     fn worker_id(&self, _max: u64) -> Option<u64> {
///         Some(self.0)
///     }
///     fn datacenter_id(&self, _max: u64) -> Option<u64> {
///         Some(0)
///     }
/// }
/// ```
pub trait NodeIdentitySource {
    /// Short label used in logs
    fn name(&self) -> &str;

    fn worker_id(&self, max: u64) -> Option<u64>;

    fn datacenter_id(&self, max: u64) -> Option<u64>;
}

/// Fixed ids supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explicit {
    pub worker_id: u64,
    pub datacenter_id: u64,
}

impl Explicit {
    pub const fn new(worker_id: u64, datacenter_id: u64) -> Self {
        Self {
            worker_id,
            datacenter_id,
        }
    }
}

impl NodeIdentitySource for Explicit {
    fn name(&self) -> &str {
        "explicit"
    }

    fn worker_id(&self, _max: u64) -> Option<u64> {
        Some(self.worker_id)
    }

    fn datacenter_id(&self, _max: u64) -> Option<u64> {
        Some(self.datacenter_id)
    }
}

/// Ids read from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    worker_var: String,
    datacenter_var: String,
}

impl Environment {
    /// Read from custom variable names
    pub fn new(worker_var: impl Into<String>, datacenter_var: impl Into<String>) -> Self {
        Self {
            worker_var: worker_var.into(),
            datacenter_var: datacenter_var.into(),
        }
    }

    fn read(var: &str) -> Option<u64> {
        let raw = env::var(var).ok()?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(var, value = %raw, error = %err, "ignoring unparsable node id");
                None
            }
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(WORKER_ID_VAR, DATACENTER_ID_VAR)
    }
}

impl NodeIdentitySource for Environment {
    fn name(&self) -> &str {
        "environment"
    }

    fn worker_id(&self, _max: u64) -> Option<u64> {
        Self::read(&self.worker_var)
    }

    fn datacenter_id(&self, _max: u64) -> Option<u64> {
        Self::read(&self.datacenter_var)
    }
}

/// Worker id hashed from the network hardware addresses, datacenter id
/// hashed from the hostname.
///
/// Best effort only: distinct hosts may hash to the same pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostHash;

impl NodeIdentitySource for HostHash {
    fn name(&self) -> &str {
        "host-hash"
    }

    fn worker_id(&self, max: u64) -> Option<u64> {
        host::hardware_addresses().map(|addrs| host::reduce(addrs, max))
    }

    fn datacenter_id(&self, max: u64) -> Option<u64> {
        host::hostname().map(|name| host::reduce(name, max))
    }
}

/// Uniformly random ids from the thread-local CSPRNG
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Random;

impl NodeIdentitySource for Random {
    fn name(&self) -> &str {
        "random"
    }

    fn worker_id(&self, max: u64) -> Option<u64> {
        Some(rand::rng().random_range(0..=max))
    }

    fn datacenter_id(&self, max: u64) -> Option<u64> {
        Some(rand::rng().random_range(0..=max))
    }
}

/// Tries each source in order; the first one with a value wins, per component
#[derive(Default)]
pub struct Chain {
    sources: Vec<Box<dyn NodeIdentitySource + Send + Sync>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower priority than those already added
    pub fn then<S>(mut self, source: S) -> Self
    where
        S: NodeIdentitySource + Send + Sync + 'static,
    {
        self.sources.push(Box::new(source));
        self
    }
}

impl NodeIdentitySource for Chain {
    fn name(&self) -> &str {
        "chain"
    }

    fn worker_id(&self, max: u64) -> Option<u64> {
        self.sources.iter().find_map(|s| s.worker_id(max))
    }

    fn datacenter_id(&self, max: u64) -> Option<u64> {
        self.sources.iter().find_map(|s| s.datacenter_id(max))
    }
}
