//! Randomness used when picking which peers to contact.

use std::sync::Arc;

/// A source of uniformly distributed integers.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait IntRandomizer: 'static + Send + Sync + std::fmt::Debug {
    /// Return an integer in `[0, n)`. Implementations return 0 for `n == 0`.
    fn intn(&self, n: usize) -> usize;

    /// Return a permutation of `indexes`.
    ///
    /// The provided implementation is a Fisher–Yates shuffle driven by
    /// [IntRandomizer::intn].
    fn fisher_yates_shuffle(&self, indexes: Vec<usize>) -> Vec<usize> {
        fisher_yates_shuffle(indexes, |n| self.intn(n))
    }
}

/// Trait-object [IntRandomizer].
pub type DynIntRandomizer = Arc<dyn IntRandomizer>;

/// Shuffle `indexes` in place, walking from the back and swapping each
/// slot `i` with `intn(i + 1)`.
pub fn fisher_yates_shuffle(
    mut indexes: Vec<usize>,
    mut intn: impl FnMut(usize) -> usize,
) -> Vec<usize> {
    for i in (1..indexes.len()).rev() {
        let j = intn(i + 1);
        indexes.swap(i, j);
    }
    indexes
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scripted_swaps() {
        let mut script = vec![1, 0].into_iter();
        let out =
            fisher_yates_shuffle(vec![0, 1, 2], |_| script.next().unwrap());
        assert_eq!(vec![2, 0, 1], out);
    }

    #[test]
    fn always_last_slot_is_identity() {
        let out = fisher_yates_shuffle((0..5).collect(), |n| n - 1);
        assert_eq!(vec![0, 1, 2, 3, 4], out);
    }

    #[test]
    fn empty_and_single() {
        assert!(fisher_yates_shuffle(vec![], |_| 0).is_empty());
        assert_eq!(vec![0], fisher_yates_shuffle(vec![0], |_| 0));
    }

    #[derive(Debug)]
    struct Zero;

    impl IntRandomizer for Zero {
        fn intn(&self, _n: usize) -> usize {
            0
        }
    }

    #[test]
    fn provided_shuffle_uses_intn() {
        // always swapping with slot 0 rotates the list left by one
        assert_eq!(vec![1, 2, 3, 0], Zero.fisher_yates_shuffle(vec![0, 1, 2, 3]));
    }
}
