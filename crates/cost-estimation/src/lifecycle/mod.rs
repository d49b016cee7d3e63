//! # Service Lifecycle & Orchestration
//!
//! Each service is started the same way:
//!
//! 1. **Configuration** - environment variables over the service's defaults
//! 2. **Observability** - console logs, optional span export ([`setup_telemetry`](service_framework::setup_telemetry))
//! 3. **Wiring** - build the handler with its production dependencies
//! 4. **Serving** - bind, serve until Ctrl-C/SIGTERM, drain in-flight requests
//! 5. **Flush** - shut the tracer provider down so buffered spans are exported
//!
//! [`run_calculation_service`] and [`run_order_service`] are the two binaries'
//! entire `main`. [`CostEstimationSystem`] runs both services in one process on
//! ephemeral ports, wired to each other, which is how the end-to-end tests
//! exercise the real HTTP path.
//!
//! ## Configuration
//!
//! | Variable | Calculation service | Order service |
//! |----------|---------------------|---------------|
//! | `SERVICE_NAME` | `calculation-service` | `order-service` |
//! | `LISTEN_ADDRESS` | `0.0.0.0:8081` | `0.0.0.0:8080` |
//! | `JAEGER_ENDPOINT` | `localhost:4317` | `localhost:4317` |
//! | `OTEL_EXPORT_ENABLED` | `true` | `true` |
//! | `CALCULATION_SERVICE_URL` | - | `http://localhost:8081` |

pub mod services;
pub mod system;

pub use services::*;
pub use system::*;
