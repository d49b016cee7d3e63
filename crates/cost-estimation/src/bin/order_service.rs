//! `order-service`: creates orders on port 8080, pricing them through the
//! calculation service at `CALCULATION_SERVICE_URL`.
//!
//! ```bash
//! RUST_LOG=info CALCULATION_SERVICE_URL=http://localhost:8081 cargo run --bin order-service
//! curl http://localhost:8080/order
//! ```

use cost_estimation::lifecycle::run_order_service;

#[tokio::main]
async fn main() -> Result<(), String> {
    run_order_service().await.map_err(|e| e.to_string())
}
