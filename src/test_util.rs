use rand_chacha::rand_core::{RngCore, SeedableRng};

use crate::param::{Field, Gf};

/// Deterministic tiny RNG for repeatable tests
pub struct TestRng {
    rng: rand_chacha::ChaCha8Rng,
}
impl TestRng {
    pub fn new() -> Self {
        Self::with_seed(0xdead_beef)
    }
    pub fn with_seed(seed: u64) -> Self {
        let rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        Self { rng }
    }
    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
    pub fn gen_usize(&mut self, upper: usize) -> usize {
        (self.next_u32() as usize) % upper
    }
    pub fn next_gf<F: Field>(&mut self) -> Gf {
        (self.next_u32() as Gf) & F::MASK
    }
    pub fn next_nonzero_gf<F: Field>(&mut self) -> Gf {
        loop {
            let a = self.next_gf::<F>();
            if a != 0 {
                return a;
            }
        }
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new()
    }
}
