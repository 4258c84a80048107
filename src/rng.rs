use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer source consumed by the simulation in call order.
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`.
    fn rand_int(&mut self, lo: i32, hi: i32) -> i32;
}

/// Seeded ChaCha8 stream; two instances built from the same seed yield the same draws.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SimRng {
    fn rand_int(&mut self, lo: i32, hi: i32) -> i32 {
        self.inner.gen_range(lo..=hi)
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.rand_int(0, i as i32) as usize;
        items.swap(i, j);
    }
}
