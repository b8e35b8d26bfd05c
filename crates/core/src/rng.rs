//! Sequential random stream shared by every placement, direction, and size decision.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Source of uniformly distributed draws. Layout determinism depends on the
/// order in which callers consume it, so it is always passed as `&mut`.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    /// Uniform value in `min..=max`.
    fn range_inclusive(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let range_size = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        (i64::from(min_value) + (self.next_u64() % range_size) as i64) as i32
    }

    /// Uniform value in `0..len`, with `len` clamped to at least one.
    fn below_clamped(&mut self, len: i32) -> i32 {
        self.range_inclusive(0, len.max(1) - 1)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Default ChaCha8-backed stream.
#[derive(Clone, Debug)]
pub struct HouseRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl HouseRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for HouseRng {
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// Replays a fixed list of raw draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "scripted random source needs at least one value");
        Self { values, cursor: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
