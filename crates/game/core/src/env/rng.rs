//! Randomness capability for deterministic trial resolution.
//!
//! The engine never owns a random number generator. Callers pass a
//! [`RandomSource`] into every operation that needs a draw, which keeps the
//! engine free of hidden counters and makes every trial reproducible.
//!
//! # Determinism
//!
//! [`PcgRng`] derives draw `n` purely from `(seed, n)`. A trial can therefore
//! be resumed or replayed from its seed plus the number of draws already
//! consumed (the replay offset).

use crate::error::{ErrorSeverity, GameError};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next uniform draw in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`RngError::Exhausted`] when a finite source has no values
    /// left. Sources must never substitute a default value.
    fn next_unit(&mut self) -> Result<f64, RngError>;

    /// Number of draws consumed so far.
    fn draws(&self) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> Result<f64, RngError> {
        (**self).next_unit()
    }

    fn draws(&self) -> u64 {
        (**self).draws()
    }
}

/// Errors raised by a [`RandomSource`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RngError {
    /// A finite source ran out of values.
    #[error("random source exhausted after {drawn} draws")]
    Exhausted { drawn: u64 },

    /// A scripted value fell outside `[0, 1)`.
    #[error("scripted draw {value} at index {index} is outside [0, 1)")]
    OutOfRange { index: u64, value: f64 },
}

impl GameError for RngError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "RNG_EXHAUSTED",
            Self::OutOfRange { .. } => "RNG_OUT_OF_RANGE",
        }
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR output permutation over a 64-bit state. The state for
/// each draw is derived from the seed and the draw index, so the generator is
/// fully described by `(seed, offset)`.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    seed: u64,
    offset: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Scale from a 32-bit output to `[0, 1)`.
    const UNIT_SCALE: f64 = 1.0 / 4_294_967_296.0;

    /// Creates a generator positioned at the first draw of `seed`.
    pub const fn new(seed: u64) -> Self {
        Self::with_offset(seed, 0)
    }

    /// Creates a generator that resumes `seed` after `offset` draws.
    pub const fn with_offset(seed: u64, offset: u64) -> Self {
        Self { seed, offset }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws consumed so far; pass it to [`PcgRng::with_offset`] to resume.
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Raw 32-bit output for draw `index` of `seed`.
    pub fn output_at(seed: u64, index: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(compute_seed(seed, index)))
    }
}

impl RandomSource for PcgRng {
    fn next_unit(&mut self) -> Result<f64, RngError> {
        let raw = Self::output_at(self.seed, self.offset);
        self.offset += 1;
        Ok(f64::from(raw) * Self::UNIT_SCALE)
    }

    fn draws(&self) -> u64 {
        self.offset
    }
}

/// Fixed sequence of draws, used by test harnesses and recorded replays.
///
/// Running past the end of the script is an error, never a silent zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Values not yet drawn.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> Result<f64, RngError> {
        let index = self.cursor as u64;
        let value = *self
            .values
            .get(self.cursor)
            .ok_or(RngError::Exhausted { drawn: index })?;

        if !(0.0..1.0).contains(&value) {
            return Err(RngError::OutOfRange { index, value });
        }

        self.cursor += 1;
        Ok(value)
    }

    fn draws(&self) -> u64 {
        self.cursor as u64
    }
}

/// Compute a deterministic per-draw seed from a base seed and a draw index.
fn compute_seed(base_seed: u64, index: u64) -> u64 {
    // SplitMix64 / FxHash style multipliers
    let mut hash = base_seed;

    hash ^= index.wrapping_mul(0x9e3779b97f4a7c15);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_draws_stay_in_unit_interval() {
        let mut rng = PcgRng::new(42);
        for _ in 0..10_000 {
            let value = rng.next_unit().unwrap();
            assert!((0.0..1.0).contains(&value), "draw {value} out of range");
        }
        assert_eq!(rng.draws(), 10_000);
    }

    #[test]
    fn resuming_from_offset_reproduces_the_tail() {
        let mut full = PcgRng::new(7);
        let head: Vec<f64> = (0..5).map(|_| full.next_unit().unwrap()).collect();
        let tail: Vec<f64> = (0..5).map(|_| full.next_unit().unwrap()).collect();

        let mut resumed = PcgRng::with_offset(7, head.len() as u64);
        let replayed: Vec<f64> = (0..5).map(|_| resumed.next_unit().unwrap()).collect();

        assert_eq!(tail, replayed);
    }

    #[test]
    fn different_seeds_diverge() {
        let a: Vec<u32> = (0..8).map(|i| PcgRng::output_at(1, i)).collect();
        let b: Vec<u32> = (0..8).map(|i| PcgRng::output_at(2, i)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn per_draw_seed_depends_on_seed_and_index() {
        assert_eq!(compute_seed(9, 3), compute_seed(9, 3));
        assert_ne!(compute_seed(9, 3), compute_seed(9, 4));
        assert_ne!(compute_seed(9, 3), compute_seed(10, 3));
    }

    #[test]
    fn scripted_rng_reports_exhaustion() {
        let mut rng = ScriptedRng::new(vec![0.25]);
        assert_eq!(rng.next_unit(), Ok(0.25));
        assert_eq!(rng.next_unit(), Err(RngError::Exhausted { drawn: 1 }));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn scripted_rng_rejects_values_outside_unit_interval() {
        let mut rng = ScriptedRng::new(vec![1.0]);
        assert!(matches!(
            rng.next_unit(),
            Err(RngError::OutOfRange { index: 0, .. })
        ));
    }
}
