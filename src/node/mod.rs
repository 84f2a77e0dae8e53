//! Node identity: the `(datacenter_id, worker_id)` pair embedded in every ID
//!
//! Resolution never fails. For each component the configured override wins,
//! then the [`NodeIdentitySource`], then a random value. Anything outside the
//! layout's range is replaced by a random value.
//!
//! Derived identities are not coordinated across processes. Two hosts whose
//! hashes collide, or a restarted process re-deriving the same pair, share an
//! ID space. Use [`Explicit`] or a custom source where that matters.

mod host;
mod source;

use rand::Rng;
use tracing::{debug, warn};

use crate::config::SnowflakeConfig;

pub use source::{
    Chain, Environment, Explicit, HostHash, NodeIdentitySource, Random, DATACENTER_ID_VAR,
    WORKER_ID_VAR,
};

/// Worker and datacenter ids of one allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdentity {
    worker_id: u8,
    datacenter_id: u8,
}

impl NodeIdentity {
    /// Resolve the identity for `config` from `source`
    pub fn resolve(config: &SnowflakeConfig, source: &dyn NodeIdentitySource) -> Self {
        let max_worker = config.max_worker_id();
        let max_datacenter = config.max_datacenter_id();

        let worker_id = resolve_component(
            "worker_id",
            config.worker_id(),
            || source.worker_id(max_worker),
            max_worker,
            source.name(),
        );
        let datacenter_id = resolve_component(
            "datacenter_id",
            config.datacenter_id(),
            || source.datacenter_id(max_datacenter),
            max_datacenter,
            source.name(),
        );

        debug!(
            worker_id,
            datacenter_id,
            source = source.name(),
            "resolved node identity"
        );
        Self {
            worker_id,
            datacenter_id,
        }
    }

    #[inline(always)]
    pub const fn worker_id(&self) -> u8 {
        self.worker_id
    }

    #[inline(always)]
    pub const fn datacenter_id(&self) -> u8 {
        self.datacenter_id
    }
}

fn resolve_component<F>(
    field: &'static str,
    configured: Option<u64>,
    derive: F,
    max: u64,
    source: &str,
) -> u8
where
    F: FnOnce() -> Option<u64>,
{
    let candidate = match configured {
        Some(value) => Some((value, "config")),
        None => derive().map(|value| (value, source)),
    };

    match candidate {
        Some((value, _)) if value <= max => value as u8,
        Some((value, origin)) => {
            let replacement = random_id(max);
            warn!(
                field,
                value,
                max,
                origin,
                replacement,
                "node id out of range, using a random id"
            );
            replacement
        }
        None => {
            let replacement = random_id(max);
            warn!(
                field,
                source,
                replacement,
                "could not derive node id, using a random id"
            );
            replacement
        }
    }
}

fn random_id(max: u64) -> u8 {
    rand::rng().random_range(0..=max) as u8
}
