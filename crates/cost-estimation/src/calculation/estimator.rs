//! # Cost Estimator
//!
//! Simulates a manufacturing cost calculation:
//!
//! 1. Pick a [`Complexity`] with a fair coin flip.
//! 2. Wait a random time from that complexity's delay range.
//! 3. Draw the cost, then the production hours, from its ranges.
//!
//! The draws happen in exactly that order (complexity flip, delay, cost,
//! hours), which is what scripted tests rely on. A flip of `1` is complex.

use crate::model::{CalculationResult, Complexity};
use service_framework::{Latency, RandomSource, ThreadRandom, TokioLatency};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, field, info, instrument, Span};

/// Produces [`CalculationResult`]s. Stateless apart from its injected sources.
#[derive(Clone)]
pub struct CostEstimator {
    random: Arc<dyn RandomSource>,
    latency: Arc<dyn Latency>,
}

impl CostEstimator {
    pub fn new(random: Arc<dyn RandomSource>, latency: Arc<dyn Latency>) -> Self {
        Self { random, latency }
    }

    /// OS randomness and real, non-blocking delays.
    pub fn production() -> Self {
        Self::new(Arc::new(ThreadRandom), Arc::new(TokioLatency))
    }

    #[instrument(
        name = "calculate_cost",
        skip(self),
        fields(
            calculation.complexity = field::Empty,
            calculation.cost = field::Empty,
            calculation.time_hours = field::Empty,
        )
    )]
    pub async fn estimate(&self) -> CalculationResult {
        let span = Span::current();

        let complexity = if self.random.flip() {
            Complexity::Complex
        } else {
            Complexity::Simple
        };
        span.record("calculation.complexity", complexity.as_str());

        let profile = complexity.profile();
        let delay = Duration::from_secs_f64(self.random.float_in(profile.delay_secs.clone()));
        debug!(?delay, "Simulating calculation");
        self.latency.wait(delay).await;

        let result = CalculationResult {
            estimated_cost: self.random.int_in(profile.cost.clone()),
            production_time_hours: self.random.int_in(profile.hours.clone()),
            complexity,
        };
        span.record("calculation.cost", result.estimated_cost);
        span.record("calculation.time_hours", result.production_time_hours);

        info!(?result, "calculation_completed");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_framework::{RecordedLatency, ScriptedRandom, SeededRandom};

    fn estimator(random: impl RandomSource + 'static, latency: Arc<RecordedLatency>) -> CostEstimator {
        CostEstimator::new(Arc::new(random), latency)
    }

    #[tokio::test]
    async fn simple_branch_uses_simple_ranges() {
        let latency = Arc::new(RecordedLatency::instant());
        let random = ScriptedRandom::new().with_ints([0, 5_000, 24]).with_floats([0.3]);

        let result = estimator(random, latency.clone()).estimate().await;

        assert_eq!(
            result,
            CalculationResult {
                estimated_cost: 5_000,
                production_time_hours: 24,
                complexity: Complexity::Simple,
            }
        );
        assert_eq!(latency.waits(), vec![Duration::from_secs_f64(0.3)]);
    }

    #[tokio::test]
    async fn complex_branch_uses_complex_ranges() {
        let latency = Arc::new(RecordedLatency::instant());
        let random = ScriptedRandom::new().with_ints([1, 50_000, 24]).with_floats([0.5]);

        let result = estimator(random, latency.clone()).estimate().await;

        assert_eq!(result.complexity, Complexity::Complex);
        assert_eq!(result.estimated_cost, 50_000);
        assert_eq!(result.production_time_hours, 24);
        assert_eq!(latency.waits(), vec![Duration::from_millis(500)]);
    }

    #[tokio::test]
    async fn every_estimate_is_consistent_and_delay_matches_branch() {
        let latency = Arc::new(RecordedLatency::instant());
        let estimator = estimator(SeededRandom::new(7), latency.clone());

        let mut results = Vec::new();
        for _ in 0..1_000 {
            results.push(estimator.estimate().await);
        }

        for (result, delay) in results.iter().zip(latency.waits()) {
            assert!(result.is_consistent(), "{:?}", result);
            let secs = delay.as_secs_f64();
            match result.complexity {
                Complexity::Simple => assert!((0.1..=0.3).contains(&secs), "{secs}"),
                Complexity::Complex => assert!((0.5..=1.0).contains(&secs), "{secs}"),
            }
        }
        assert!(results.iter().any(|r| r.complexity == Complexity::Simple));
        assert!(results.iter().any(|r| r.complexity == Complexity::Complex));
    }
}
