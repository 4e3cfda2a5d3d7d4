// Tiny RNG (no external crate) used to pick a new fill seed when the
// image center sits on the boundary.

/// Deterministic xorshift32 generator.
/// The same seed always produces the same sequence, so a blocked-center
/// fill is reproducible for a given `CutConfig::rng_seed`.
#[derive(Clone, Debug)]
pub struct Rng32 {
    state: u32,
}

impl Rng32 {
    pub fn from_seed(seed: u32) -> Self {
        // xorshift never leaves the all-zero state
        Self { state: seed | 1 }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform integer in `[0, n)`. `n` must be non-zero.
    #[inline]
    pub fn below(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0);
        // widening multiply keeps the bias tiny without a rejection loop
        ((self.next_u32() as u64 * n as u64) >> 32) as u32
    }
}
