/// The synthetic cost estimate produced by the calculation service.
///
/// A result is built fresh for every `GET /calculate` and discarded once the
/// response is sent. Its numbers always fall inside the ranges of its
/// [`Complexity`]'s [`ComplexityProfile`]; see [`CalculationResult::is_consistent`].
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::RangeInclusive;

/// How hard a part is to manufacture. Drives every range of the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Complex,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Complex => "complex",
        }
    }

    pub fn profile(self) -> &'static ComplexityProfile {
        match self {
            Complexity::Simple => &SIMPLE_PROFILE,
            Complexity::Complex => &COMPLEX_PROFILE,
        }
    }
}

impl Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive ranges for one complexity class.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityProfile {
    /// Simulated computation time, in seconds.
    pub delay_secs: RangeInclusive<f64>,
    /// Estimated cost, in currency units.
    pub cost: RangeInclusive<u32>,
    /// Production time, in hours.
    pub hours: RangeInclusive<u32>,
}

pub static SIMPLE_PROFILE: ComplexityProfile = ComplexityProfile {
    delay_secs: 0.1..=0.3,
    cost: 5_000..=15_000,
    hours: 8..=24,
};

pub static COMPLEX_PROFILE: ComplexityProfile = ComplexityProfile {
    delay_secs: 0.5..=1.0,
    cost: 15_000..=50_000,
    hours: 24..=72,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub estimated_cost: u32,
    pub production_time_hours: u32,
    pub complexity: Complexity,
}

impl CalculationResult {
    /// True when cost and hours lie within the ranges of `complexity`.
    pub fn is_consistent(&self) -> bool {
        let profile = self.complexity.profile();
        profile.cost.contains(&self.estimated_cost)
            && profile.hours.contains(&self.production_time_hours)
    }
}
