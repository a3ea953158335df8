//! The host lifecycle supervisor.
//!
//! # Responsibilities
//! - Build the host: validate config, install logging, create the runtime,
//!   assemble the router (no sockets opened)
//! - Start: bind listeners and begin accepting, blocking until ready
//! - Shutdown: drain gracefully and block until ports are released
//! - Enforce the `Built → Running → Stopped` state machine
//!
//! # Design Decisions
//! - The supervisor owns a multi-thread tokio runtime so `start`/`shutdown`
//!   can present a blocking contract to non-async callers; serve tasks
//!   always run on that runtime
//! - `start_async`/`shutdown_async`/`run_async` drive the same sequences
//!   from inside a caller's runtime, without blocking it
//! - Lifecycle misuse is a hard `InvalidState` error, never a silent no-op
//! - Fail fast: bind failures are fatal and not retried

use std::mem;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::runtime::{Builder as RuntimeBuilder, Runtime};

use crate::config::{self, HostConfig};
use crate::error::{HostError, HostResult};
use crate::host::listener::{self, ListenerTask};
use crate::http;
use crate::observability::logging::{self, LoggingGuard};
use crate::registry::{GatewaySequence, PrimaryServerSet, ServerRegistry};

/// Where a host is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Built, no sockets open yet.
    Built,
    /// Listeners bound and accepting.
    Running,
    /// Shut down cleanly; terminal.
    Stopped,
    /// A start or shutdown failed; terminal.
    Faulted,
}

impl LifecyclePhase {
    fn name(self) -> &'static str {
        match self {
            LifecyclePhase::Built => "built",
            LifecyclePhase::Running => "running",
            LifecyclePhase::Stopped => "stopped",
            LifecyclePhase::Faulted => "faulted",
        }
    }
}

#[derive(Debug)]
enum HostState {
    Built { router: Router },
    Running(RunningHost),
    Stopped,
    Faulted,
}

impl HostState {
    fn phase(&self) -> LifecyclePhase {
        match self {
            HostState::Built { .. } => LifecyclePhase::Built,
            HostState::Running(_) => LifecyclePhase::Running,
            HostState::Stopped => LifecyclePhase::Stopped,
            HostState::Faulted => LifecyclePhase::Faulted,
        }
    }
}

#[derive(Debug)]
struct RunningHost {
    http: ListenerTask,
    https: Option<ListenerTask>,
}

/// Supervises one API host process: build, start, shutdown.
///
/// The two server collections are published read-only to the request
/// handlers; the supervisor never mutates them. Exactly one logical host
/// exists per supervisor, and once stopped (or faulted) it cannot be
/// restarted.
#[derive(Debug)]
pub struct ApiHost {
    config: HostConfig,
    state: HostState,
    runtime: Option<Arc<Runtime>>,
    _logging: LoggingGuard,
}

impl ApiHost {
    /// Build a host over the given collections with the default
    /// configuration (HTTP on 80, HTTPS on 443 when TLS is configured).
    ///
    /// Opens no sockets; bind errors surface from `start`.
    pub fn build(
        primary: PrimaryServerSet,
        gateways: GatewaySequence,
        logging_config: Option<&Path>,
    ) -> HostResult<Self> {
        let mut cfg = HostConfig::default();
        cfg.logging_config = logging_config.map(Path::to_path_buf);
        Self::build_with(cfg, ServerRegistry::new(primary, gateways))
    }

    /// Build a host with an explicit configuration.
    pub fn build_with(config: HostConfig, registry: ServerRegistry) -> HostResult<Self> {
        config::validate(&config)?;

        let logging = logging::init(config.logging_config.as_deref())?;

        let runtime = RuntimeBuilder::new_multi_thread()
            .enable_all()
            .thread_name("fleet-api")
            .build()
            .map_err(HostError::Runtime)?;

        let router = http::build_router(registry);

        tracing::debug!(
            http_bind = %config.http_bind,
            https = config.tls.is_some(),
            "API host built"
        );

        Ok(Self {
            config,
            state: HostState::Built { router },
            runtime: Some(Arc::new(runtime)),
            _logging: logging,
        })
    }

    /// Build and start in one step, resolving once listeners are bound and
    /// accepting connections (start-completion, not run-to-completion).
    ///
    /// The caller owns the returned running host and must eventually call
    /// [`shutdown_async`](Self::shutdown_async).
    pub async fn run_async(
        primary: PrimaryServerSet,
        gateways: GatewaySequence,
        logging_config: Option<&Path>,
    ) -> HostResult<Self> {
        let mut cfg = HostConfig::default();
        cfg.logging_config = logging_config.map(Path::to_path_buf);
        Self::run_async_with(cfg, ServerRegistry::new(primary, gateways)).await
    }

    /// `run_async` with an explicit configuration.
    pub async fn run_async_with(config: HostConfig, registry: ServerRegistry) -> HostResult<Self> {
        let mut host = Self::build_with(config, registry)?;
        host.start_async().await?;
        Ok(host)
    }

    /// Bind listeners and begin accepting, blocking the calling thread until
    /// they are ready.
    ///
    /// Must not be called from inside an async context; async callers use
    /// [`start_async`](Self::start_async).
    pub fn start(&mut self) -> HostResult<()> {
        let (router, runtime) = self.take_built("start")?;
        let result = runtime.block_on(start_listeners(&runtime, &self.config, router));
        self.finish_start(result)
    }

    /// Asynchronous start, for callers already on a runtime.
    pub async fn start_async(&mut self) -> HostResult<()> {
        let (router, runtime) = self.take_built("start")?;
        let result = start_listeners(&runtime, &self.config, router).await;
        self.finish_start(result)
    }

    /// Gracefully stop: cease accepting, drain in-flight connections up to
    /// the grace period, then block the calling thread until the serve tasks
    /// have finished and ports are released.
    ///
    /// A fault in a serve task is unwrapped from its asynchronous origin and
    /// returned from here rather than swallowed. Must not be called from
    /// inside an async context; async callers use
    /// [`shutdown_async`](Self::shutdown_async).
    pub fn shutdown(&mut self) -> HostResult<()> {
        let (running, runtime) = self.take_running("shutdown")?;
        let result = runtime.block_on(stop_listeners(running));
        release_runtime(runtime);
        self.finish_shutdown(result)
    }

    /// Asynchronous shutdown, for callers already on a runtime.
    pub async fn shutdown_async(&mut self) -> HostResult<()> {
        let (running, runtime) = self.take_running("shutdown")?;
        let result = stop_listeners(running).await;
        release_runtime(runtime);
        self.finish_shutdown(result)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.state.phase()
    }

    /// Bound address of the plaintext listener while running.
    pub fn http_addr(&self) -> Option<SocketAddr> {
        match &self.state {
            HostState::Running(running) => Some(running.http.addr),
            _ => None,
        }
    }

    /// Bound address of the encrypted listener while running.
    pub fn https_addr(&self) -> Option<SocketAddr> {
        match &self.state {
            HostState::Running(running) => running.https.as_ref().map(|t| t.addr),
            _ => None,
        }
    }

    /// The host's configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    fn take_built(&mut self, operation: &'static str) -> HostResult<(Router, Arc<Runtime>)> {
        match mem::replace(&mut self.state, HostState::Faulted) {
            HostState::Built { router } => {
                let runtime = match &self.runtime {
                    Some(rt) => rt.clone(),
                    None => {
                        return Err(HostError::InvalidState {
                            operation,
                            phase: LifecyclePhase::Faulted.name(),
                        })
                    }
                };
                Ok((router, runtime))
            }
            other => {
                let phase = other.phase().name();
                self.state = other;
                Err(HostError::InvalidState { operation, phase })
            }
        }
    }

    fn take_running(&mut self, operation: &'static str) -> HostResult<(RunningHost, Arc<Runtime>)> {
        match mem::replace(&mut self.state, HostState::Faulted) {
            HostState::Running(running) => {
                let runtime = match self.runtime.take() {
                    Some(rt) => rt,
                    None => {
                        return Err(HostError::InvalidState {
                            operation,
                            phase: LifecyclePhase::Faulted.name(),
                        })
                    }
                };
                Ok((running, runtime))
            }
            other => {
                let phase = other.phase().name();
                self.state = other;
                Err(HostError::InvalidState { operation, phase })
            }
        }
    }

    fn finish_start(&mut self, result: HostResult<RunningHost>) -> HostResult<()> {
        match result {
            Ok(running) => {
                tracing::info!(
                    http = %running.http.addr,
                    https = ?running.https.as_ref().map(|t| t.addr),
                    "API host started"
                );
                self.state = HostState::Running(running);
                Ok(())
            }
            Err(e) => {
                // take_built already left the state Faulted.
                tracing::error!(error = %e, "API host failed to start");
                Err(e)
            }
        }
    }

    fn finish_shutdown(&mut self, result: HostResult<()>) -> HostResult<()> {
        match result {
            Ok(()) => {
                tracing::info!("API host stopped");
                self.state = HostState::Stopped;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "API host faulted during shutdown");
                Err(e)
            }
        }
    }
}

// Serve tasks have been joined by now; teardown must not block so the
// async entry points stay safe inside a caller's runtime.
fn release_runtime(runtime: Arc<Runtime>) {
    if let Ok(runtime) = Arc::try_unwrap(runtime) {
        runtime.shutdown_background();
    }
}

impl Drop for ApiHost {
    fn drop(&mut self) {
        if let HostState::Running(running) = &self.state {
            running.http.abort();
            if let Some(https) = &running.https {
                https.abort();
            }
        }
        if let Some(runtime) = self.runtime.take() {
            if let Ok(runtime) = Arc::try_unwrap(runtime) {
                runtime.shutdown_background();
            }
        }
    }
}

async fn start_listeners(
    runtime: &Runtime,
    config: &HostConfig,
    app: Router,
) -> HostResult<RunningHost> {
    let http = listener::spawn_http(runtime, config.http_bind, app.clone())?;

    let https = match &config.tls {
        Some(tls) => match listener::spawn_https(runtime, config.https_bind, app, tls).await {
            Ok(task) => Some(task),
            Err(e) => {
                // Tear down the half-started plaintext listener.
                http.abort();
                let _ = http.join().await;
                return Err(e);
            }
        },
        None => None,
    };

    Ok(RunningHost { http, https })
}

async fn stop_listeners(running: RunningHost) -> HostResult<()> {
    let RunningHost { http, https } = running;

    http.begin_graceful_shutdown();
    if let Some(task) = &https {
        task.begin_graceful_shutdown();
    }

    let http_result = http.join().await;
    let https_result = match https {
        Some(task) => task.join().await,
        None => Ok(()),
    };

    http_result?;
    https_result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_names_match_error_wording() {
        assert_eq!(LifecyclePhase::Built.name(), "built");
        assert_eq!(LifecyclePhase::Running.name(), "running");
        assert_eq!(LifecyclePhase::Stopped.name(), "stopped");
        assert_eq!(LifecyclePhase::Faulted.name(), "faulted");
    }
}
