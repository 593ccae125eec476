//! Deterministic random number generation for combat rolls.
//!
//! Every random event in a zone (initiative, damage variance, crit checks,
//! NPC wandering) draws from a [`RollStream`]: a world seed, the zone id and a
//! monotonically increasing nonce mixed through [`compute_seed`] and fed to a
//! stateless [`PcgRng`]. Replaying the same messages against the same seed
//! therefore reproduces the same fight.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state, one multiply, one
/// xorshift and one rotate per value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed from its entropy sources.
///
/// * `world_seed` - base seed fixed at server start
/// * `nonce` - roll sequence number within the stream
/// * `stream` - stream discriminator (the zone id)
/// * `context` - extra discriminator for independent rolls in one step
pub fn compute_seed(world_seed: u64, nonce: u64, stream: u32, context: u32) -> u64 {
    let mut hash = world_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix-style avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Source of dice rolls consumed by stats, combat and AI code.
pub trait Roller {
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `0..n`; returns 0 when `n == 0`.
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.next_u32() % n }
    }

    /// Uniform value in `[min, max]` inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.below(max - min + 1)
    }
}

/// Seeded, resumable roll stream owned by a zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollStream {
    seed: u64,
    stream: u32,
    nonce: u64,
}

impl RollStream {
    pub fn new(seed: u64, stream: u32) -> Self {
        Self {
            seed,
            stream,
            nonce: 0,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl Roller for RollStream {
    fn next_u32(&mut self) -> u32 {
        let seed = compute_seed(self.seed, self.nonce, self.stream, 0);
        self.nonce = self.nonce.wrapping_add(1);
        PcgRng.next_u32(seed)
    }
}
