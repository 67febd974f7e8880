use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    /// Uniform draw from `min..=max`; returns `min` when the range is inverted.
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.gen_bool(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::from_seed(7);
        let mut b = RngState::from_seed(7);
        for _ in 0..32 {
            assert_eq!(a.roll_die(), b.roll_die());
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn chance_edges_are_exact() {
        let mut rng = RngState::from_seed(1);
        for _ in 0..64 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(!rng.chance(f64::NAN));
            assert!(!rng.chance(-0.5));
        }
    }

    #[test]
    fn range_inclusive_stays_in_bounds() {
        let mut rng = RngState::from_seed(3);
        for _ in 0..256 {
            let value = rng.range_inclusive(1, 40);
            assert!((1..=40).contains(&value));
        }
        assert_eq!(rng.range_inclusive(5, 5), 5);
    }
}
