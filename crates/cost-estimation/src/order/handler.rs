use crate::clients::{CalculationApi, CalculationClient, CalculationClientError};
use crate::model::{Order, OrderId, OrderStatus, PendingOrder};
use crate::order::OrderError;
use service_framework::{RandomSource, ThreadRandom};
use std::sync::Arc;
use tracing::{error, field, info, instrument, Span};

/// Places orders. Holds no per-request state, so one instance serves every
/// request concurrently.
#[derive(Clone)]
pub struct OrderHandler {
    calculation: Arc<dyn CalculationApi>,
    random: Arc<dyn RandomSource>,
}

impl OrderHandler {
    pub fn new(calculation: Arc<dyn CalculationApi>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            calculation,
            random,
        }
    }

    /// HTTP client against `calculation_service_url`, OS randomness.
    pub fn production(calculation_service_url: &str) -> Result<Self, CalculationClientError> {
        let client = CalculationClient::new(calculation_service_url)?;
        Ok(Self::new(Arc::new(client), Arc::new(ThreadRandom)))
    }

    /// Creates one order: a fresh id, one calculation call, no retry.
    #[instrument(
        name = "create_order",
        skip(self),
        fields(order.id = field::Empty, order.status = field::Empty, error = field::Empty)
    )]
    pub async fn create_order(&self) -> Result<Order, OrderError> {
        let span = Span::current();
        let pending = PendingOrder::new(OrderId::generate(self.random.as_ref()));
        span.record("order.id", pending.order_id().as_str());
        info!(order_id = %pending.order_id(), "order_created");

        match self.calculation.calculate().await {
            Ok(calculation) => {
                let order = pending.complete(calculation);
                span.record("order.status", OrderStatus::Created.as_str());
                info!(?order, "order_completed");
                Ok(order)
            }
            Err(source) => {
                let order = pending.fail();
                span.record("order.status", OrderStatus::Failed.as_str());
                span.record("error", true);
                error!(order_id = %order.order_id, error = %source, "Failed to calculate cost");
                Err(OrderError::CalculationUnavailable { order, source })
            }
        }
    }
}
