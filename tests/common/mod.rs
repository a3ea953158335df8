//! Shared stub collaborators for integration tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fleet_api::{
    GatewaySequence, GatewayServer, HostConfig, PrimaryServer, PrimaryServerSet, ServerId,
};

/// A primary server handle with externally adjustable connection count.
pub struct StubPrimary {
    id: ServerId,
    description: String,
    current: AtomicUsize,
    maximum: usize,
}

impl StubPrimary {
    #[allow(dead_code)]
    pub fn new(id: ServerId, current: usize, maximum: usize) -> Arc<Self> {
        Arc::new(Self {
            id,
            description: format!("Primary {id}"),
            current: AtomicUsize::new(current),
            maximum,
        })
    }

    #[allow(dead_code)]
    pub fn set_current(&self, count: usize) {
        self.current.store(count, Ordering::Relaxed);
    }
}

impl PrimaryServer for StubPrimary {
    fn id(&self) -> ServerId {
        self.id
    }
    fn description(&self) -> String {
        self.description.clone()
    }
    fn current_connections(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }
    fn maximum_connections(&self) -> usize {
        self.maximum
    }
}

pub struct StubGateway {
    description: String,
    maximum: usize,
}

impl StubGateway {
    #[allow(dead_code)]
    pub fn new(description: &str, maximum: usize) -> Arc<Self> {
        Arc::new(Self {
            description: description.to_string(),
            maximum,
        })
    }
}

impl GatewayServer for StubGateway {
    fn description(&self) -> String {
        self.description.clone()
    }
    fn current_connections(&self) -> usize {
        0
    }
    fn maximum_connections(&self) -> usize {
        self.maximum
    }
}

/// Primaries 1..=count, each with `current = 10 * id` connections.
#[allow(dead_code)]
pub fn primary_set(count: u16) -> PrimaryServerSet {
    (1..=count)
        .map(|id| {
            let server: Arc<dyn PrimaryServer> = StubPrimary::new(id, 10 * id as usize, 200);
            (id, server)
        })
        .collect()
}

#[allow(dead_code)]
pub fn gateway_seq(count: usize) -> GatewaySequence {
    (1..=count)
        .map(|n| {
            let gateway: Arc<dyn GatewayServer> = StubGateway::new(&format!("Gateway {n}"), 1000);
            gateway
        })
        .collect()
}

/// Host config bound to ephemeral loopback ports.
pub fn localhost_config() -> HostConfig {
    let mut config = HostConfig::default();
    config.http_bind = "127.0.0.1:0".parse().unwrap();
    config.https_bind = "127.0.0.1:0".parse().unwrap();
    config
}

/// Write a logging configuration file into the temp directory.
#[allow(dead_code)]
pub fn write_logging_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("fleet-api-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}
