//! Server collections and their injection into request handlers.
//!
//! # Responsibilities
//! - Define the collaborator interfaces for the two server kinds
//! - Hold both collections behind `Arc` for lock-free shared reads
//! - Expose them to handlers through application state, not globals
//!
//! # Design Decisions
//! - Collections are immutable for the host's lifetime; the host only
//!   publishes what it was given
//! - `Arc<dyn ...>` handles preserve caller ownership: the caller keeps its
//!   clones and the host sees the same instances

use std::collections::BTreeMap;
use std::sync::Arc;

/// Identity of a primary server.
pub type ServerId = u16;

/// A primary backend server whose status is exposed through the API.
pub trait PrimaryServer: Send + Sync {
    /// Unique identifier of this server.
    fn id(&self) -> ServerId;

    /// Human-readable description (shown in listings).
    fn description(&self) -> String;

    /// Number of currently open connections.
    fn current_connections(&self) -> usize;

    /// Configured connection capacity.
    fn maximum_connections(&self) -> usize;
}

/// A gateway server through which clients discover and reach primaries.
pub trait GatewayServer: Send + Sync {
    /// Human-readable description (shown in listings).
    fn description(&self) -> String;

    /// Number of currently open connections.
    fn current_connections(&self) -> usize;

    /// Configured connection capacity.
    fn maximum_connections(&self) -> usize;
}

/// Fixed set of primary servers, keyed by identity.
pub type PrimaryServerSet = BTreeMap<ServerId, Arc<dyn PrimaryServer>>;

/// Sequence of gateway servers, in caller-supplied order.
pub type GatewaySequence = Vec<Arc<dyn GatewayServer>>;

/// Read-only view over both server collections.
///
/// Cloning is cheap (two `Arc` bumps); a clone lives inside the router state
/// so every handler resolves the same collections.
#[derive(Clone)]
pub struct ServerRegistry {
    primary: Arc<PrimaryServerSet>,
    gateways: Arc<GatewaySequence>,
}

impl ServerRegistry {
    /// Create a registry that takes the collections by value.
    pub fn new(primary: PrimaryServerSet, gateways: GatewaySequence) -> Self {
        Self {
            primary: Arc::new(primary),
            gateways: Arc::new(gateways),
        }
    }

    /// Create a registry over collections the caller keeps shared access to.
    pub fn from_shared(primary: Arc<PrimaryServerSet>, gateways: Arc<GatewaySequence>) -> Self {
        Self { primary, gateways }
    }

    /// The primary server set, keyed by identity.
    pub fn primary_servers(&self) -> &PrimaryServerSet {
        &self.primary
    }

    /// The gateway server sequence.
    pub fn gateways(&self) -> &GatewaySequence {
        &self.gateways
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake(ServerId);

    impl PrimaryServer for Fake {
        fn id(&self) -> ServerId {
            self.0
        }
        fn description(&self) -> String {
            format!("fake {}", self.0)
        }
        fn current_connections(&self) -> usize {
            0
        }
        fn maximum_connections(&self) -> usize {
            100
        }
    }

    #[test]
    fn registry_preserves_shared_collections() {
        let mut set: PrimaryServerSet = BTreeMap::new();
        set.insert(7, Arc::new(Fake(7)));
        let set = Arc::new(set);
        let gateways = Arc::new(GatewaySequence::new());

        let registry = ServerRegistry::from_shared(set.clone(), gateways.clone());

        assert!(Arc::ptr_eq(&registry.primary, &set));
        assert_eq!(registry.primary_servers().len(), 1);
        assert_eq!(registry.primary_servers()[&7].id(), 7);
        assert!(registry.gateways().is_empty());
    }

    #[test]
    fn empty_collections_are_legal() {
        let registry = ServerRegistry::new(PrimaryServerSet::new(), GatewaySequence::new());
        assert!(registry.primary_servers().is_empty());
        assert!(registry.gateways().is_empty());
    }
}
