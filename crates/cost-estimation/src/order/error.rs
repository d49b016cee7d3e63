//! Error types for the order service.

use crate::clients::CalculationClientError;
use crate::model::{Order, OrderId, OrderStatus};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned to clients when the estimate could not be obtained.
pub const CALCULATION_FAILED: &str = "Failed to calculate cost";

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The calculation service failed, timed out or could not be reached.
    /// `order` is the failed order; its id is still reported to the caller.
    #[error("Failed to calculate cost for {}: {source}", .order.order_id)]
    CalculationUnavailable {
        order: Order,
        source: CalculationClientError,
    },
}

impl OrderError {
    pub fn order(&self) -> &Order {
        match self {
            OrderError::CalculationUnavailable { order, .. } => order,
        }
    }
}

/// Body of a `500` response from `GET /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderErrorBody {
    pub error: String,
    pub order_id: OrderId,
    pub status: OrderStatus,
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let order = match self {
            OrderError::CalculationUnavailable { order, .. } => order,
        };
        let body = OrderErrorBody {
            error: CALCULATION_FAILED.to_string(),
            order_id: order.order_id,
            status: order.status,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
