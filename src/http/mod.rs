//! HTTP surface of the API host.
//!
//! # Data Flow
//! ```text
//! HTTP/TLS connection (bound by host/listener.rs)
//!     → server.rs (Axum router, trace middleware, shared state)
//!     → handlers.rs (resolve server collections, serialize status)
//!     → JSON response
//! ```

pub mod handlers;
pub mod server;

pub use server::{build_router, AppState};
