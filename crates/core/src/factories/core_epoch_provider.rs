//! Tracks the network epoch to tell which epochs regular peers still
//! serve.

use shardcast_api::*;
use std::sync::{Arc, RwLock};

/// Default number of epochs regular peers keep data for.
pub const DEFAULT_NUM_ACTIVE_PERSISTERS: u32 = 3;

/// A [CurrentNetworkEpochProvider] driven by epoch start notifications.
///
/// Regular peers keep `num_active_persisters` epochs of data: the current
/// one and the ones right before it. Anything older is only held by full
/// history peers.
#[derive(Debug)]
pub struct CoreNetworkEpochProvider {
    current_epoch: RwLock<Epoch>,
    num_active_persisters: u32,
}

impl CoreNetworkEpochProvider {
    /// Construct a provider at epoch 0.
    pub fn new(num_active_persisters: u32) -> Self {
        Self {
            current_epoch: RwLock::new(0),
            num_active_persisters,
        }
    }

    /// Construct a provider with [DEFAULT_NUM_ACTIVE_PERSISTERS].
    pub fn create() -> Arc<Self> {
        Arc::new(Self::new(DEFAULT_NUM_ACTIVE_PERSISTERS))
    }

    /// Notify that the network entered `epoch`.
    pub fn epoch_started(&self, epoch: Epoch) {
        *self.current_epoch.write().unwrap() = epoch;
    }

    /// The last epoch the network entered.
    pub fn current_epoch(&self) -> Epoch {
        *self.current_epoch.read().unwrap()
    }
}

impl CurrentNetworkEpochProvider for CoreNetworkEpochProvider {
    fn epoch_is_active_in_network(&self, epoch: Epoch) -> bool {
        let current = i64::from(self.current_epoch());
        let lower = (current - i64::from(self.num_active_persisters) + 1).max(0);
        i64::from(epoch) >= lower
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_epoch_active_at_genesis() {
        let provider = CoreNetworkEpochProvider::new(3);
        assert!(provider.epoch_is_active_in_network(0));
        assert!(provider.epoch_is_active_in_network(5));
    }

    #[test]
    fn old_epochs_fall_out_of_the_window() {
        let provider = CoreNetworkEpochProvider::new(3);
        provider.epoch_started(10);
        assert_eq!(10, provider.current_epoch());
        assert!(provider.epoch_is_active_in_network(10));
        assert!(provider.epoch_is_active_in_network(8));
        assert!(!provider.epoch_is_active_in_network(7));
        assert!(!provider.epoch_is_active_in_network(0));
        // epochs ahead of ours count as active
        assert!(provider.epoch_is_active_in_network(11));
    }

    #[test]
    fn zero_persisters_only_future_epochs() {
        let provider = CoreNetworkEpochProvider::new(0);
        provider.epoch_started(4);
        assert!(!provider.epoch_is_active_in_network(4));
        assert!(provider.epoch_is_active_in_network(5));
    }
}
