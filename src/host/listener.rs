//! Listener binding and serve-task spawning.
//!
//! # Responsibilities
//! - Bind std listeners to the configured addresses (bind errors surface
//!   before any serve task exists)
//! - Load TLS material for the encrypted listener
//! - Spawn axum-server serve tasks on the supervisor's runtime
//! - Expose per-listener graceful shutdown and fault unwrapping

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::config::TlsConfig;
use crate::error::{HostError, HostResult};

/// Grace period for draining in-flight connections at shutdown.
pub(crate) const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A bound listener and its serve task on the supervisor's runtime.
#[derive(Debug)]
pub(crate) struct ListenerTask {
    pub addr: SocketAddr,
    handle: Handle,
    task: JoinHandle<io::Result<()>>,
}

impl ListenerTask {
    /// Stop accepting and drain in-flight connections up to the grace period.
    pub fn begin_graceful_shutdown(&self) {
        self.handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    }

    /// Close immediately without draining.
    pub fn abort(&self) {
        self.handle.shutdown();
    }

    /// Wait for the serve task to finish and unwrap its fault, if any.
    pub async fn join(self) -> HostResult<()> {
        match self.task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(HostError::Shutdown(format!(
                "listener on {} failed: {e}",
                self.addr
            ))),
            Err(e) => Err(HostError::Shutdown(format!(
                "serve task for {} panicked: {e}",
                self.addr
            ))),
        }
    }
}

/// Bind the plaintext listener and spawn its serve task.
pub(crate) fn spawn_http(
    runtime: &Runtime,
    addr: SocketAddr,
    app: Router,
) -> HostResult<ListenerTask> {
    let listener = bind_std(addr)?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| HostError::Bind { addr, source })?;

    let handle = Handle::new();
    let server = axum_server::from_tcp(listener).handle(handle.clone());
    let task = runtime.spawn(server.serve(app.into_make_service()));

    tracing::info!(address = %local_addr, "HTTP listener bound");
    Ok(ListenerTask {
        addr: local_addr,
        handle,
        task,
    })
}

/// Load TLS material, bind the encrypted listener and spawn its serve task.
pub(crate) async fn spawn_https(
    runtime: &Runtime,
    addr: SocketAddr,
    app: Router,
    tls: &TlsConfig,
) -> HostResult<ListenerTask> {
    let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .map_err(|e| HostError::Configuration(format!("failed to load TLS material: {e}")))?;

    let listener = bind_std(addr)?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| HostError::Bind { addr, source })?;

    let handle = Handle::new();
    let server = axum_server::from_tcp_rustls(listener, rustls).handle(handle.clone());
    let task = runtime.spawn(server.serve(app.into_make_service()));

    tracing::info!(address = %local_addr, "HTTPS listener bound");
    Ok(ListenerTask {
        addr: local_addr,
        handle,
        task,
    })
}

// tokio's listener conversion requires non-blocking mode.
fn bind_std(addr: SocketAddr) -> HostResult<std::net::TcpListener> {
    let listener =
        std::net::TcpListener::bind(addr).map_err(|source| HostError::Bind { addr, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| HostError::Bind { addr, source })?;
    Ok(listener)
}
