use crate::calculation::{self, CostEstimator};
use crate::clients::CalculationClient;
use crate::order::{self, OrderHandler};
use service_framework::{FrameworkError, HttpService, RandomSource, RunningService};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Both services running in-process, the order service pointed at the
/// calculation service.
///
/// # Example
///
/// ```ignore
/// let system = CostEstimationSystem::start(CostEstimator::production()).await?;
///
/// let order = reqwest::get(format!("{}/order", system.order_url())).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CostEstimationSystem {
    /// Serves `/calculate` and `/health`.
    pub calculation: RunningService,

    /// Serves `/order` and `/health`.
    pub order: RunningService,
}

impl CostEstimationSystem {
    /// Starts both services on loopback ephemeral ports.
    pub async fn start(estimator: CostEstimator) -> Result<Self, FrameworkError> {
        Self::start_with(estimator, Arc::new(service_framework::ThreadRandom), None).await
    }

    /// Like [`start`](Self::start), with the order service's randomness and
    /// calculation timeout chosen by the caller.
    pub async fn start_with(
        estimator: CostEstimator,
        order_random: Arc<dyn RandomSource>,
        calculation_timeout: Option<Duration>,
    ) -> Result<Self, FrameworkError> {
        let loopback = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);

        // 1. Calculation service first; the order service needs its address.
        let calculation =
            HttpService::bind("calculation-service", loopback, calculation::routes(estimator))
                .await?
                .spawn()?;

        // 2. Order service wired to it.
        let base_url = calculation.base_url();
        let client = match calculation_timeout {
            Some(timeout) => CalculationClient::with_timeout(&base_url, timeout),
            None => CalculationClient::new(&base_url),
        }
        .map_err(|e| FrameworkError::Config(e.to_string()))?;
        let handler = OrderHandler::new(Arc::new(client), order_random);

        let order = HttpService::bind("order-service", loopback, order::routes(handler))
            .await?
            .spawn()?;

        info!(
            calculation = %calculation.address(),
            order = %order.address(),
            "System started"
        );
        Ok(Self { calculation, order })
    }

    pub fn calculation_url(&self) -> String {
        self.calculation.base_url()
    }

    pub fn order_url(&self) -> String {
        self.order.base_url()
    }

    /// Stops the order service, then the calculation service it depends on.
    pub async fn shutdown(self) -> Result<(), FrameworkError> {
        info!("Shutting down system...");

        let order_result = self.order.shutdown().await;
        let calculation_result = self.calculation.shutdown().await;

        for result in [&order_result, &calculation_result] {
            if let Err(e) = result {
                error!(error = %e, "Service failed during shutdown");
            }
        }
        order_result?;
        calculation_result?;

        info!("System shutdown complete.");
        Ok(())
    }
}
