use crate::config::Range;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randomness injected into the engine.
///
/// Implementations return values in `[0, 1)`. Tests plug in deterministic
/// sources; hosts use a seeded or entropy-backed [`StdRng`].
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[range.min, range.max]`.
    fn in_range(&mut self, range: Range) -> f32 {
        range.min + (range.max - range.min) * self.next_unit()
    }

    /// Uniform index below `len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Always returns the same unit value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantRandom(pub f32);

impl RandomSource for ConstantRandom {
    fn next_unit(&mut self) -> f32 {
        self.0.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Replays a fixed list of unit values, wrapping around.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Seeded generator, reproducible across runs.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
