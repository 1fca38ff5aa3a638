//! The default randomizer.

use rand::{rngs::StdRng, Rng, SeedableRng};
use shardcast_api::*;
use std::sync::{Arc, Mutex};

/// An [IntRandomizer] backed by [StdRng].
#[derive(Debug)]
pub struct RandRandomizer {
    rng: Mutex<StdRng>,
}

impl RandRandomizer {
    /// Construct a randomizer seeded from the operating system.
    pub fn create() -> DynIntRandomizer {
        Arc::new(Self {
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Construct a reproducible randomizer.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IntRandomizer for RandRandomizer {
    fn intn(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.lock().unwrap().gen_range(0..n)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn intn_stays_in_range() {
        let randomizer = RandRandomizer::with_seed(42);
        for n in 1..50 {
            assert!(randomizer.intn(n) < n);
        }
        assert_eq!(0, randomizer.intn(0));
    }

    #[test]
    fn same_seed_same_shuffle() {
        let a = RandRandomizer::with_seed(7);
        let b = RandRandomizer::with_seed(7);
        let indexes: Vec<usize> = (0..20).collect();
        assert_eq!(
            a.fisher_yates_shuffle(indexes.clone()),
            b.fisher_yates_shuffle(indexes),
        );
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let randomizer = RandRandomizer::with_seed(1);
        let mut out = randomizer.fisher_yates_shuffle((0..100).collect());
        out.sort_unstable();
        assert_eq!((0..100).collect::<Vec<_>>(), out);
    }
}
