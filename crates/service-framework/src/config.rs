//! # Service Configuration
//!
//! Services are configured through plain environment variables
//! (`SERVICE_NAME`, `JAEGER_ENDPOINT`, ...). The [`ConfigLoader`] layers the
//! process environment over per-service defaults and deserializes the result
//! into any `serde` type, so each service can declare the settings it needs.
//!
//! Environment variable names are matched case-insensitively against the
//! struct field names: `SERVICE_NAME` fills `service_name`.

use crate::error::FrameworkError;
use crate::telemetry::TelemetryConfig;
use config::{Config, Environment};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

pub const SERVICE_NAME_KEY: &str = "service_name";
pub const LISTEN_ADDRESS_KEY: &str = "listen_address";
pub const JAEGER_ENDPOINT_KEY: &str = "jaeger_endpoint";
pub const OTEL_EXPORT_ENABLED_KEY: &str = "otel_export_enabled";

/// Collector address used when `JAEGER_ENDPOINT` is not set.
pub const DEFAULT_COLLECTOR_ENDPOINT: &str = "localhost:4317";

/// Builds a typed configuration from defaults and environment variables.
///
/// ```rust
/// use serde::Deserialize;
/// use service_framework::config::ConfigLoader;
/// use std::collections::HashMap;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     greeting: String,
/// }
///
/// let vars = HashMap::from([("GREETING".to_string(), "hello".to_string())]);
/// let settings: Settings = ConfigLoader::new()
///     .with_default("greeting", "hi")
///     .with_vars(vars)
///     .load()
///     .unwrap();
/// assert_eq!(settings.greeting, "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    defaults: Vec<(String, String)>,
    vars: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fallback value for `key` (lowercase field name).
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.push((key.into(), value.into()));
        self
    }

    /// Reads variables from `vars` instead of the process environment.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Merges defaults and environment, then deserializes into `T`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        let mut builder = Config::builder();
        for (key, value) in &self.defaults {
            builder = builder.set_default(key.as_str(), value.as_str())?;
        }

        // Values stay strings; serde converts them per field type.
        let environment = Environment::default().source(self.vars.clone());

        Ok(builder.add_source(environment).build()?.try_deserialize()?)
    }
}

/// Settings shared by every service binary.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Name attached to exported trace data.
    pub service_name: String,
    /// Address the HTTP listener binds to.
    pub listen_address: SocketAddr,
    /// OTLP/gRPC collector address.
    pub jaeger_endpoint: String,
    /// Set to `false` to keep spans local (console logs only).
    pub otel_export_enabled: bool,
}

impl ServiceConfig {
    /// Returns a loader pre-populated with the shared defaults.
    pub fn loader(default_name: &str, default_listen_address: &str) -> ConfigLoader {
        ConfigLoader::new()
            .with_default(SERVICE_NAME_KEY, default_name)
            .with_default(LISTEN_ADDRESS_KEY, default_listen_address)
            .with_default(JAEGER_ENDPOINT_KEY, DEFAULT_COLLECTOR_ENDPOINT)
            .with_default(OTEL_EXPORT_ENABLED_KEY, "true")
    }

    /// Loads the shared settings from the process environment.
    pub fn from_env(default_name: &str, default_listen_address: &str) -> Result<Self, FrameworkError> {
        Self::loader(default_name, default_listen_address).load()
    }

    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self.service_name.clone(),
            collector_endpoint: self
                .otel_export_enabled
                .then(|| self.jaeger_endpoint.clone()),
        }
    }
}
