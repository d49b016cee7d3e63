//! `calculation-service`: serves synthetic cost estimates on port 8081.
//!
//! ```bash
//! RUST_LOG=info JAEGER_ENDPOINT=localhost:4317 cargo run --bin calculation-service
//! ```

use cost_estimation::lifecycle::run_calculation_service;

#[tokio::main]
async fn main() -> Result<(), String> {
    run_calculation_service().await.map_err(|e| e.to_string())
}
