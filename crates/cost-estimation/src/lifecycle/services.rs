use crate::calculation::{self, CostEstimator};
use crate::order::{self, OrderHandler};
use axum::Router;
use serde::Deserialize;
use service_framework::{
    setup_telemetry, ConfigLoader, FrameworkError, HttpService, ServiceConfig,
};
use tracing::info;

pub const CALCULATION_SERVICE_NAME: &str = "calculation-service";
pub const CALCULATION_LISTEN_ADDRESS: &str = "0.0.0.0:8081";

pub const ORDER_SERVICE_NAME: &str = "order-service";
pub const ORDER_LISTEN_ADDRESS: &str = "0.0.0.0:8080";

pub const CALCULATION_SERVICE_URL_KEY: &str = "calculation_service_url";
pub const DEFAULT_CALCULATION_SERVICE_URL: &str = "http://localhost:8081";

/// Settings only the order service reads.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderServiceConfig {
    /// Base URL of the calculation service; `/calculate` is appended.
    pub calculation_service_url: String,
}

impl OrderServiceConfig {
    pub fn loader() -> ConfigLoader {
        ConfigLoader::new().with_default(CALCULATION_SERVICE_URL_KEY, DEFAULT_CALCULATION_SERVICE_URL)
    }

    pub fn from_env() -> Result<Self, FrameworkError> {
        Self::loader().load()
    }
}

/// Entry point of the `calculation-service` binary.
pub async fn run_calculation_service() -> Result<(), FrameworkError> {
    let config = ServiceConfig::from_env(CALCULATION_SERVICE_NAME, CALCULATION_LISTEN_ADDRESS)?;
    let router = calculation::routes(CostEstimator::production());
    run_service(config, router).await
}

/// Entry point of the `order-service` binary.
pub async fn run_order_service() -> Result<(), FrameworkError> {
    let config = ServiceConfig::from_env(ORDER_SERVICE_NAME, ORDER_LISTEN_ADDRESS)?;
    let order_config = OrderServiceConfig::from_env()?;

    let handler = OrderHandler::production(&order_config.calculation_service_url)
        .map_err(|e| FrameworkError::Config(e.to_string()))?;
    let router = order::routes(handler);

    run_service(config, router).await
}

async fn run_service(config: ServiceConfig, router: Router) -> Result<(), FrameworkError> {
    let telemetry = setup_telemetry(&config.telemetry())?;
    info!(service = %config.service_name, exporting = telemetry.is_exporting(), "Starting");

    let result = match HttpService::bind(config.service_name.clone(), config.listen_address, router).await {
        Ok(service) => service.serve().await,
        Err(e) => Err(e),
    };

    telemetry.shutdown();
    result
}
