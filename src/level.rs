use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};

/// Coin-flip level assignment for new nodes.
///
/// The level is the number of consecutive heads before the first tails,
/// clipped to `max_level`. Everything past the cap lands on `max_level`
/// itself, so `P(level = k) = 2^-(k+1)` for `k < max_level` and
/// `P(level = max_level) = 2^-max_level`.
pub(crate) struct LevelGenerator {
    rng: StdRng,
    max_level: usize,
}

impl LevelGenerator {
    pub(crate) fn new(max_level: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, max_level }
    }

    pub(crate) fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.rng.gen::<bool>() {
            level += 1;
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use crate::level::LevelGenerator;

    #[test]
    fn test_zero_max_level() {
        let mut gen = LevelGenerator::new(0, Some(7));
        for _ in 0..1000 {
            assert_eq!(gen.random_level(), 0);
        }
    }

    #[test]
    fn test_levels_capped() {
        let mut gen = LevelGenerator::new(3, Some(0xdeadbeef));
        let mut hits = [0_usize; 4];
        for _ in 0..10_000 {
            let level = gen.random_level();
            assert!(level <= 3);
            hits[level] += 1;
        }
        // 1/2, 1/4, 1/8 and the clipped 1/8 at the cap
        assert!(hits[0] > 4_500 && hits[0] < 5_500, "{:?}", hits);
        assert!(hits[1] > 2_000 && hits[1] < 3_000, "{:?}", hits);
        assert!(hits[2] > 1_000 && hits[2] < 1_500, "{:?}", hits);
        assert!(hits[3] > 1_000 && hits[3] < 1_500, "{:?}", hits);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = LevelGenerator::new(16, Some(42));
        let mut b = LevelGenerator::new(16, Some(42));
        let a: Vec<_> = (0..64).map(|_| a.random_level()).collect();
        let b: Vec<_> = (0..64).map(|_| b.random_level()).collect();
        assert_eq!(a, b);
    }
}
