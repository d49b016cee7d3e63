//! # Randomness Seam
//!
//! Handlers never call `rand` directly; they draw from a [`RandomSource`]
//! handed to them at construction. Production uses [`ThreadRandom`], tests
//! substitute [`SeededRandom`] (reproducible) or [`ScriptedRandom`] (exact
//! values, in order).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

/// Uniform draws over inclusive ranges.
pub trait RandomSource: Send + Sync {
    /// A uniformly distributed integer in `range`.
    fn int_in(&self, range: RangeInclusive<u32>) -> u32;

    /// A uniformly distributed float in `range`.
    fn float_in(&self, range: RangeInclusive<f64>) -> f64;

    /// A fair coin flip.
    fn flip(&self) -> bool {
        self.int_in(0..=1) == 1
    }
}

/// The thread-local OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_in(&self, range: RangeInclusive<u32>) -> u32 {
        rand::rng().random_range(range)
    }

    fn float_in(&self, range: RangeInclusive<f64>) -> f64 {
        rand::rng().random_range(range)
    }
}

/// A deterministic generator for reproducible runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in(&self, range: RangeInclusive<u32>) -> u32 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(range)
    }

    fn float_in(&self, range: RangeInclusive<f64>) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(range)
    }
}

/// Replays pre-recorded values, for tests that need exact outcomes.
///
/// Integers and floats are kept in separate queues and consumed in order.
/// Drawing from an empty queue, or receiving a value outside the requested
/// range, panics: the script no longer matches what the code under test does.
///
/// ```rust
/// use service_framework::random::{RandomSource, ScriptedRandom};
///
/// let random = ScriptedRandom::new().with_ints([1, 12_000]).with_floats([0.25]);
/// assert!(random.flip());
/// assert_eq!(random.int_in(5_000..=15_000), 12_000);
/// assert_eq!(random.float_in(0.1..=0.3), 0.25);
/// assert!(random.is_exhausted());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    ints: Mutex<VecDeque<u32>>,
    floats: Mutex<VecDeque<f64>>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ints(self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(values);
        self
    }

    pub fn with_floats(self, values: impl IntoIterator<Item = f64>) -> Self {
        self.floats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(values);
        self
    }

    /// True once every scripted value has been drawn.
    pub fn is_exhausted(&self) -> bool {
        self.ints.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
            && self.floats.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl RandomSource for ScriptedRandom {
    fn int_in(&self, range: RangeInclusive<u32>) -> u32 {
        let value = self
            .ints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedRandom: no integer left for {:?}", range));
        assert!(range.contains(&value), "ScriptedRandom: {} outside {:?}", value, range);
        value
    }

    fn float_in(&self, range: RangeInclusive<f64>) -> f64 {
        let value = self
            .floats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedRandom: no float left for {:?}", range));
        assert!(range.contains(&value), "ScriptedRandom: {} outside {:?}", value, range);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_bounds() {
        let random = ThreadRandom;
        for _ in 0..1_000 {
            assert!((8..=24).contains(&random.int_in(8..=24)));
            let f = random.float_in(0.5..=1.0);
            assert!((0.5..=1.0).contains(&f));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let xs: Vec<u32> = (0..20).map(|_| a.int_in(0..=9)).collect();
        let ys: Vec<u32> = (0..20).map(|_| b.int_in(0..=9)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn flip_produces_both_sides() {
        let random = ThreadRandom;
        let heads = (0..1_000).filter(|_| random.flip()).count();
        assert!(heads > 0 && heads < 1_000);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn scripted_value_out_of_range_panics() {
        let random = ScriptedRandom::new().with_ints([30]);
        random.int_in(8..=24);
    }

    #[test]
    #[should_panic(expected = "no integer left")]
    fn exhausted_script_panics() {
        ScriptedRandom::new().int_in(0..=9);
    }
}
