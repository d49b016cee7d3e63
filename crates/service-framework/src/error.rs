//! # Framework Errors
//!
//! Errors raised by the service plumbing itself: loading configuration,
//! installing telemetry, binding and running the HTTP server. Request-level
//! failures belong to the services and never surface here.

/// Errors that can occur while bootstrapping or running a service.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Telemetry error: {0}")]
    Telemetry(String),
    #[error("Failed to bind {address}: {reason}")]
    Bind { address: String, reason: String },
    #[error("Server error: {0}")]
    Serve(String),
}

impl From<config::ConfigError> for FrameworkError {
    fn from(e: config::ConfigError) -> Self {
        FrameworkError::Config(e.to_string())
    }
}
