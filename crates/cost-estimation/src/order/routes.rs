use crate::model::Order;
use crate::order::{OrderError, OrderHandler};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use service_framework::health_routes;

/// `GET /order` and `GET /health`.
pub fn routes(handler: OrderHandler) -> Router {
    Router::new()
        .route("/order", get(handle_order))
        .with_state(handler)
        .merge(health_routes())
}

/// `200` with the created order, or `500` with [`OrderErrorBody`](crate::order::OrderErrorBody).
pub async fn handle_order(State(handler): State<OrderHandler>) -> Result<Json<Order>, OrderError> {
    handler.create_order().await.map(Json)
}
