//! Embeddable supervisor for a status API host.
//!
//! Publishes two externally owned server collections (primary servers and
//! gateway servers) over HTTP/HTTPS and offers three lifecycle entry points:
//! a non-blocking build, a blocking start/shutdown pair for synchronous
//! embedders, and an async run for callers already on a runtime.
//!
//! ```no_run
//! use fleet_api::{ApiHost, GatewaySequence, PrimaryServerSet};
//!
//! # fn main() -> Result<(), fleet_api::HostError> {
//! let mut host = ApiHost::build(PrimaryServerSet::new(), GatewaySequence::new(), None)?;
//! host.start()?;
//! // ... the host serves until the embedding process decides to stop ...
//! host.shutdown()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod observability;
pub mod registry;

pub use config::{HostConfig, TlsConfig};
pub use error::{HostError, HostResult};
pub use host::{ApiHost, LifecyclePhase};
pub use registry::{
    GatewaySequence, GatewayServer, PrimaryServer, PrimaryServerSet, ServerId, ServerRegistry,
};
