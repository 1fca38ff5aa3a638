//! An in-memory peer list creator.

use shardcast_api::*;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Lists {
    cross_shard: Vec<PeerId>,
    intra_shard: Vec<PeerId>,
    full_history: Vec<PeerId>,
}

/// A [PeerListCreator] whose lists are set by hand.
///
/// In a node the lists come from the connected peers of the network
/// layer; this one is meant for tests and local tooling.
#[derive(Debug, Default)]
pub struct MemPeerListCreator {
    inner: Mutex<Lists>,
}

impl MemPeerListCreator {
    /// Replace the cross shard list.
    pub fn set_cross_shard(&self, peers: Vec<PeerId>) {
        self.inner.lock().unwrap().cross_shard = peers;
    }

    /// Replace the intra shard list.
    pub fn set_intra_shard(&self, peers: Vec<PeerId>) {
        self.inner.lock().unwrap().intra_shard = peers;
    }

    /// Replace the full history list.
    pub fn set_full_history(&self, peers: Vec<PeerId>) {
        self.inner.lock().unwrap().full_history = peers;
    }
}

impl PeerListCreator for MemPeerListCreator {
    fn cross_shard_peer_list(&self) -> Vec<PeerId> {
        self.inner.lock().unwrap().cross_shard.clone()
    }

    fn intra_shard_peer_list(&self) -> Vec<PeerId> {
        self.inner.lock().unwrap().intra_shard.clone()
    }

    fn full_history_list(&self) -> Vec<PeerId> {
        self.inner.lock().unwrap().full_history.clone()
    }
}
