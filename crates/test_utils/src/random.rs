//! Deterministic randomizers.

use shardcast_api::IntRandomizer;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A randomizer returning a fixed permutation from
/// [IntRandomizer::fisher_yates_shuffle] and a fixed value from
/// [IntRandomizer::intn].
///
/// The permutation is applied to the indexes being shuffled. If its length
/// does not match theirs, the indexes are returned unchanged.
#[derive(Debug, Default)]
pub struct FixedRandomizer {
    permutation: Vec<usize>,
    intn: usize,
}

impl FixedRandomizer {
    /// Shuffle to `permutation`, `intn` returns 0.
    pub fn new(permutation: Vec<usize>) -> Self {
        Self {
            permutation,
            intn: 0,
        }
    }

    /// Make `intn` return `value`, capped to `n - 1`.
    pub fn with_intn(mut self, value: usize) -> Self {
        self.intn = value;
        self
    }
}

impl IntRandomizer for FixedRandomizer {
    fn intn(&self, n: usize) -> usize {
        self.intn.min(n.saturating_sub(1))
    }

    fn fisher_yates_shuffle(&self, indexes: Vec<usize>) -> Vec<usize> {
        if self.permutation.len() != indexes.len() {
            return indexes;
        }
        self.permutation.iter().map(|&i| indexes[i]).collect()
    }
}

/// A randomizer whose [IntRandomizer::intn] results are scripted.
///
/// Each value is capped to `n - 1`. Once the script runs out, `intn`
/// returns 0. Shuffling uses the provided Fisher–Yates implementation.
#[derive(Debug, Default)]
pub struct ScriptedRandomizer {
    script: Mutex<VecDeque<usize>>,
}

impl ScriptedRandomizer {
    /// Construct a randomizer playing back `script`.
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

impl IntRandomizer for ScriptedRandomizer {
    fn intn(&self, n: usize) -> usize {
        let next = self.script.lock().unwrap().pop_front().unwrap_or(0);
        next.min(n.saturating_sub(1))
    }
}
