//! # HTTP Server Runner
//!
//! [`HttpService`] owns a bound listener and the service router. It can run in
//! the foreground until the process receives Ctrl-C/SIGTERM ([`HttpService::serve`]),
//! or be spawned onto the runtime as a [`RunningService`] that is stopped
//! explicitly, which is how tests run real servers on ephemeral ports.
//!
//! Every request gets an `http_request` span. When the caller propagated a
//! W3C trace context, the span is parented on it.
//!
//! ## Graceful Shutdown
//!
//! 1. The shutdown signal fires (signal handler or [`RunningService::shutdown`]).
//! 2. axum stops accepting connections and lets in-flight requests finish.
//! 3. The serve task completes and its result is reported.

use crate::error::FrameworkError;
use crate::propagation::attach_remote_parent;
use axum::http::Request;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::{MakeSpan, TraceLayer};
use tracing::{error, info};

/// Builds the per-request span, continuing a remote trace when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> tracing::Span {
        let span = tracing::info_span!(
            "http_request",
            http.method = %request.method(),
            http.route = %request.uri().path(),
        );
        attach_remote_parent(&span, request.headers());
        span
    }
}

/// A service whose listener is already bound.
pub struct HttpService {
    name: String,
    listener: TcpListener,
    router: Router,
}

impl HttpService {
    /// Binds `address` and attaches request tracing to `router`.
    pub async fn bind(
        name: impl Into<String>,
        address: SocketAddr,
        router: Router,
    ) -> Result<Self, FrameworkError> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|e| FrameworkError::Bind {
                address: address.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            name: name.into(),
            listener,
            router: router.layer(TraceLayer::new_for_http().make_span_with(RequestSpan)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound address; differs from the requested one when port 0 was used.
    pub fn local_addr(&self) -> Result<SocketAddr, FrameworkError> {
        self.listener
            .local_addr()
            .map_err(|e| FrameworkError::Serve(e.to_string()))
    }

    /// Serves until Ctrl-C or SIGTERM.
    pub async fn serve(self) -> Result<(), FrameworkError> {
        self.serve_until(shutdown_signal()).await
    }

    /// Serves until `signal` resolves, then drains in-flight requests.
    pub async fn serve_until<F>(self, signal: F) -> Result<(), FrameworkError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.local_addr()?;
        let name = self.name;
        info!(service = %name, %address, "Service started");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| FrameworkError::Serve(e.to_string()))?;

        info!(service = %name, "Service stopped");
        Ok(())
    }

    /// Runs the service in a background task.
    pub fn spawn(self) -> Result<RunningService, FrameworkError> {
        let address = self.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(self.serve_until(async move {
            // A dropped sender also stops the server.
            let _ = shutdown_rx.await;
        }));

        Ok(RunningService {
            address,
            shutdown_tx,
            handle,
        })
    }
}

/// Handle to a spawned [`HttpService`].
pub struct RunningService {
    address: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), FrameworkError>>,
}

impl RunningService {
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// `http://<address>` for building request URLs.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Signals shutdown and waits for the serve task to finish.
    pub async fn shutdown(self) -> Result<(), FrameworkError> {
        let _ = self.shutdown_tx.send(());

        match self.handle.await {
            Ok(result) => result,
            Err(e) => {
                error!("Service task failed: {:?}", e);
                Err(FrameworkError::Serve(format!("Service task failed: {:?}", e)))
            }
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
