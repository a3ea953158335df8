//! Host lifecycle management.
//!
//! # Responsibilities
//! - Build the host in dependency order: config → logging → runtime → router
//! - Bind listeners last (traffic only when ready)
//! - Coordinate graceful shutdown and fault propagation
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no internal retries
//! - `Built → Running → Stopped` with `Faulted` as the terminal error state

pub(crate) mod listener;
pub mod supervisor;

pub use supervisor::{ApiHost, LifecyclePhase};
