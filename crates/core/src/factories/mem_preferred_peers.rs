//! An in-memory preferred peers holder.

use shardcast_api::*;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A [PreferredPeersHolder] filled by the operator at runtime.
#[derive(Debug, Default)]
pub struct MemPreferredPeersHolder {
    inner: RwLock<HashMap<ShardId, Vec<PeerId>>>,
}

impl MemPreferredPeersHolder {
    /// Construct a new [MemPreferredPeersHolder].
    pub fn create() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Add `peer` to the preferred peers of `shard_id`.
    pub fn put(&self, peer: PeerId, shard_id: ShardId) {
        let mut lock = self.inner.write().unwrap();
        let peers = lock.entry(shard_id).or_default();
        if !peers.contains(&peer) {
            peers.push(peer);
        }
    }

    /// Remove `peer` from every shard.
    pub fn remove(&self, peer: &PeerId) {
        let mut lock = self.inner.write().unwrap();
        for peers in lock.values_mut() {
            peers.retain(|p| p != peer);
        }
        lock.retain(|_, peers| !peers.is_empty());
    }

    /// Forget all preferred peers.
    pub fn clear(&self) {
        self.inner.write().unwrap().clear();
    }
}

impl PreferredPeersHolder for MemPreferredPeersHolder {
    fn get(&self) -> HashMap<ShardId, Vec<PeerId>> {
        self.inner.read().unwrap().clone()
    }

    fn contains(&self, peer: &PeerId) -> bool {
        self.inner
            .read()
            .unwrap()
            .values()
            .any(|peers| peers.contains(peer))
    }
}
