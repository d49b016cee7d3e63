//! # Cost Estimation Services
//!
//! Two small HTTP services that simulate a manufacturing cost-estimation
//! workflow, built on [`service_framework`].
//!
//! ```text
//! client ──GET /order──▶ order-service ──GET /calculate──▶ calculation-service
//!        ◀──────────────               ◀──────────────────
//! ```
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Request-scoped values: [`CalculationResult`](model::CalculationResult),
//! [`Order`](model::Order) and the `ORD-XXXXX` [`OrderId`](model::OrderId).
//!
//! ### 2. The Calculation Service ([`calculation`])
//! [`CostEstimator`](calculation::CostEstimator) picks a complexity, waits a
//! simulated computation time and draws cost and hours from that complexity's ranges.
//!
//! ### 3. The Order Service ([`order`])
//! [`OrderHandler`](order::OrderHandler) mints an id and asks the calculation
//! service for an estimate. A failed call is reported as `500` with the
//! order id; it is never retried.
//!
//! ### 4. The Interface ([`clients`])
//! [`CalculationApi`](clients::CalculationApi) is the seam between the two
//! services: [`CalculationClient`](clients::CalculationClient) over HTTP, or
//! [`MockCalculationClient`](clients::MockCalculationClient) in tests.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Configuration, telemetry and serving for both binaries, plus
//! [`CostEstimationSystem`](lifecycle::CostEstimationSystem) for running the
//! pair in one process.
//!
//! ## 🚀 Running
//!
//! ```bash
//! cargo run --bin calculation-service &
//! cargo run --bin order-service &
//! curl http://localhost:8080/order
//! ```
//!
//! ## 🧪 Testing
//!
//! Randomness and latency are injected ([`service_framework::random`],
//! [`service_framework::latency`]), so tests can script exact outcomes or run
//! without delays. See `tests/` for handler, mock and end-to-end tests.

pub mod calculation;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod order;
