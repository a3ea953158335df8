//! Logging subsystem.
//!
//! # Data Flow
//! ```text
//! no logging path:
//!     env filter (RUST_LOG, fallback "info") → fmt layer → global subscriber
//!
//! logging path supplied:
//!     logging file (TOML) → EnvFilter → reload layer → fmt layer
//!     watcher.rs detects file change → re-parse → reload handle swaps filter
//! ```
//!
//! # Design Decisions
//! - The reload handle isolates live-reconfiguration from the lifecycle
//!   logic; the supervisor only holds a guard
//! - A bad edit to the logging file keeps the current filter

pub mod logging;
pub(crate) mod watcher;

pub use logging::{LoggingGuard, LoggingSettings};
