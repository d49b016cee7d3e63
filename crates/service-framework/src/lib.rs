//! # Service Framework
//!
//! The plumbing every HTTP microservice in this workspace shares, kept apart
//! from the business logic so each service is only its handlers.
//!
//! ## Architecture Overview
//!
//! 1. **Configuration** ([`config`]) - environment variables layered over per-service defaults
//! 2. **Observability** ([`telemetry`], [`propagation`]) - console logs plus optional OTLP span export
//! 3. **Serving** ([`server`], [`health`]) - bind, trace every request, shut down gracefully
//! 4. **Injectable effects** ([`random`], [`latency`]) - randomness and waiting behind traits
//!
//! ## Injectable Effects
//!
//! Handlers receive their sources of nondeterminism as trait objects:
//!
//! ```rust
//! use service_framework::latency::{Latency, RecordedLatency};
//! use service_framework::random::{RandomSource, ScriptedRandom};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let random = ScriptedRandom::new().with_floats([0.2]);
//!     let latency = RecordedLatency::instant();
//!
//!     let delay = Duration::from_secs_f64(random.float_in(0.1..=0.3));
//!     latency.wait(delay).await;
//!
//!     assert_eq!(latency.waits(), vec![Duration::from_secs_f64(0.2)]);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each request is handled in its own Tokio task (axum/hyper)
//! - Simulated work uses the Tokio timer, never `std::thread::sleep`
//! - No state is shared between requests
//!
//! ## Telemetry Is Optional
//!
//! Nothing in request handling depends on [`telemetry::setup_telemetry`]
//! having run. Tests exercise handlers and whole servers without it.

pub mod config;
pub mod error;
pub mod health;
pub mod latency;
pub mod propagation;
pub mod random;
pub mod server;
pub mod telemetry;

// Re-export core types for convenience
pub use config::{ConfigLoader, ServiceConfig};
pub use error::FrameworkError;
pub use health::{health_routes, HealthStatus};
pub use latency::{Latency, RecordedLatency, TokioLatency};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use server::{HttpService, RunningService};
pub use telemetry::{setup_telemetry, TelemetryConfig, TelemetryGuard};
