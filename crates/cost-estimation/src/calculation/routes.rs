use crate::calculation::CostEstimator;
use crate::model::CalculationResult;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use service_framework::health_routes;

/// `GET /calculate` and `GET /health`.
pub fn routes(estimator: CostEstimator) -> Router {
    Router::new()
        .route("/calculate", get(handle_calculate))
        .with_state(estimator)
        .merge(health_routes())
}

/// Always succeeds; the only side effect is the simulated delay.
pub async fn handle_calculate(State(estimator): State<CostEstimator>) -> Json<CalculationResult> {
    Json(estimator.estimate().await)
}
