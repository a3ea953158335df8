//! Error definitions for the host supervisor.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors surfaced by the host lifecycle.
#[derive(Debug, Error)]
pub enum HostError {
    /// Host or logging configuration is invalid at build time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A listener could not be bound to its configured address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// A lifecycle method was called out of order.
    #[error("cannot {operation} while host is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: &'static str,
    },

    /// A serve task faulted during graceful shutdown.
    #[error("fault during graceful shutdown: {0}")]
    Shutdown(String),

    /// The supervisor's own runtime could not be constructed.
    #[error("failed to initialize runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
