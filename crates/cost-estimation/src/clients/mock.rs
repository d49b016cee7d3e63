//! # Mock Calculation Client
//!
//! An in-memory [`CalculationApi`] with expectation tracking, for testing the
//! order service without a calculation service on the network.
//!
//! | Feature | MockCalculationClient | Real service |
//! |---------|-----------------------|--------------|
//! | **Speed** | Instant | Network + simulated delay |
//! | **Determinism** | Exact results | Random results |
//! | **Error Injection** | Easy (`return_err`) | Needs a stub server |
//!
//! ```rust
//! use cost_estimation::clients::{CalculationApi, CalculationClientError, MockCalculationClient};
//! use cost_estimation::model::{CalculationResult, Complexity};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockCalculationClient::new();
//!     mock.expect_calculate().return_ok(CalculationResult {
//!         estimated_cost: 9_000,
//!         production_time_hours: 12,
//!         complexity: Complexity::Simple,
//!     });
//!     mock.expect_calculate()
//!         .return_err(CalculationClientError::Status(503));
//!
//!     let client = mock.client();
//!     assert_eq!(client.calculate().await.unwrap().estimated_cost, 9_000);
//!     assert!(client.calculate().await.is_err());
//!
//!     mock.verify(); // all expectations were consumed
//! }
//! ```

use crate::clients::{CalculationApi, CalculationClientError};
use crate::model::CalculationResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Expectation {
    response: Result<CalculationResult, CalculationClientError>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<VecDeque<Expectation>>,
    calls: AtomicUsize,
}

/// A mock calculation client; expectations are answered in FIFO order.
///
/// Any call without a matching expectation panics, as does [`verify`](Self::verify)
/// when expectations are left over.
#[derive(Clone, Default)]
pub struct MockCalculationClient {
    state: Arc<MockState>,
}

impl MockCalculationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client to hand to the code under test.
    pub fn client(&self) -> Arc<dyn CalculationApi> {
        Arc::new(self.clone())
    }

    /// Expects one `calculate` call.
    pub fn expect_calculate(&mut self) -> CalculateExpectationBuilder {
        CalculateExpectationBuilder {
            state: self.state.clone(),
            delay: None,
        }
    }

    /// Number of `calculate` calls received so far.
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.state.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[async_trait]
impl CalculationApi for MockCalculationClient {
    async fn calculate(&self) -> Result<CalculationResult, CalculationClientError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        let expectation = self
            .state
            .expectations
            .lock()
            .unwrap()
            .pop_front()
            .expect("Unexpected calculate() call: no expectation left");

        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

/// Builder for a `calculate` expectation.
pub struct CalculateExpectationBuilder {
    state: Arc<MockState>,
    delay: Option<Duration>,
}

impl CalculateExpectationBuilder {
    /// Answers only after `delay`, to simulate a slow service.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn return_ok(self, result: CalculationResult) {
        self.push(Ok(result));
    }

    pub fn return_err(self, error: CalculationClientError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<CalculationResult, CalculationClientError>) {
        self.state.expectations.lock().unwrap().push_back(Expectation {
            response,
            delay: self.delay,
        });
    }
}
