//! The per-pixel random number generator.
//!
//! A 48-bit linear congruential generator using the same recurrence as
//! `java.util.Random`. It is deliberately tiny and fully reproducible: a pixel
//! seeded with its linear index always draws the same sequence, no matter
//! which thread renders it.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    /// Seeds the raw state. Unlike `java.util.Random` the seed is not scrambled.
    pub fn new(seed: u64) -> Self {
        Self { state: seed & MASK }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the state once and returns its top `bits` bits.
    pub fn next_bits(&mut self, bits: u32) -> u64 {
        debug_assert!(bits <= 48);
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        self.state >> (48 - bits)
    }

    /// Uniform float in [0, 1) built from 24 bits of state.
    pub fn uniform(&mut self) -> f32 {
        self.next_bits(24) as f32 / (1u32 << 24) as f32
    }
}

impl RngCore for Lcg48 {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg48 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    // The default impl would run the seed through PCG first
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
