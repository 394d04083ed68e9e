//! Host stand-ins for the board's RNG and wait-for-interrupt

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Idle, RandomSource};

/// Random source backed by PCG
#[derive(Debug, Clone)]
pub struct PcgRandom {
    rng: Pcg32,
}

impl PcgRandom {
    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl RandomSource for PcgRandom {
    fn below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "random bound must be positive");
        self.rng.random_range(0..bound)
    }
}

/// Sleeps a fixed period in place of wait-for-interrupt
#[derive(Debug, Clone)]
pub struct SleepIdle {
    period: Duration,
}

impl SleepIdle {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Idle for SleepIdle {
    fn wait(&mut self) {
        std::thread::sleep(self.period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_respects_bound() {
        let mut rng = PcgRandom::seeded(7);
        for _ in 0..1000 {
            assert!(rng.below(11) < 11);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = PcgRandom::seeded(42);
        let mut b = PcgRandom::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.below(1000), b.below(1000));
        }
    }

    #[test]
    fn test_zero_sleep_returns() {
        SleepIdle::new(Duration::ZERO).wait();
    }
}
