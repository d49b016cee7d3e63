//! # Observability & Tracing
//!
//! This module wires the `tracing` ecosystem into two sinks:
//!
//! - a **compact console layer** (`with_target(false)`), filtered by `RUST_LOG`
//!   and defaulting to `info`;
//! - an optional **OpenTelemetry layer** that batches spans and exports them
//!   over OTLP/gRPC to a collector such as Jaeger.
//!
//! Export is strictly fire-and-forget. If the exporter cannot be built the
//! service keeps running with console logs only, and an unreachable collector
//! only costs dropped batches in the background processor.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let telemetry = setup_telemetry(&config.telemetry())?;
//! // ... serve requests ...
//! telemetry.shutdown(); // flushes buffered spans
//! ```
//!
//! ```bash
//! RUST_LOG=debug JAEGER_ENDPOINT=jaeger:4317 cargo run --bin order-service
//! ```
//!
//! Span fields recorded with `#[instrument(fields(...))]` and
//! `Span::record` become span attributes in the collector, and `info!` events
//! inside a span become span events.

use crate::error::FrameworkError;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const EXPORT_TIMEOUT: Duration = Duration::from_secs(3);
const INSTRUMENTATION_SCOPE: &str = "cost-estimation";

/// What to install: the service name for the trace resource and, when export
/// is enabled, the collector address.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub collector_endpoint: Option<String>,
}

/// Keeps the tracer provider alive for the lifetime of the process.
///
/// Call [`TelemetryGuard::shutdown`] before exiting so buffered spans are
/// flushed to the collector.
#[must_use = "dropping the guard without shutdown() discards buffered spans"]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported to a collector.
    pub fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }

    /// Flushes pending spans and stops the exporter.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            match provider.shutdown() {
                Ok(()) => info!("Telemetry flushed"),
                Err(e) => warn!(error = %e, "Telemetry shutdown failed"),
            }
        }
    }
}

/// Normalizes a collector address to a URL tonic can dial.
///
/// `JAEGER_ENDPOINT` is usually given as a bare `host:port`; the collector
/// speaks plaintext gRPC, so a missing scheme becomes `http://`.
pub fn collector_url(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

/// Initializes logging and, if configured, span export.
///
/// Must be called once, from inside the Tokio runtime (the gRPC channel is
/// created lazily on it). Returns an error only if a global subscriber is
/// already installed.
pub fn setup_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, FrameworkError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let (provider, export_error) = match &config.collector_endpoint {
        Some(endpoint) => match build_provider(&config.service_name, endpoint) {
            Ok(provider) => (Some(provider), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };

    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(INSTRUMENTATION_SCOPE))
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .with(otel_layer)
        .try_init()
        .map_err(|e| FrameworkError::Telemetry(e.to_string()))?;

    if let Some(provider) = &provider {
        global::set_tracer_provider(provider.clone());
        info!(
            service_name = %config.service_name,
            endpoint = config.collector_endpoint.as_deref().unwrap_or_default(),
            "Exporting traces"
        );
    }
    if let Some(e) = export_error {
        warn!(error = %e, "Trace export disabled, continuing with console logs only");
    }

    Ok(TelemetryGuard { provider })
}

fn build_provider(service_name: &str, endpoint: &str) -> Result<SdkTracerProvider, FrameworkError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(collector_url(endpoint))
        .with_timeout(EXPORT_TIMEOUT)
        .build()
        .map_err(|e| FrameworkError::Telemetry(e.to_string()))?;

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}
