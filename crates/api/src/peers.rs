//! Traits supplying the peers a request may be sent to.

use crate::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Produces the candidate peer lists of a topic.
///
/// Lists are fetched fresh on every dispatch and may be empty.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait PeerListCreator: 'static + Send + Sync + std::fmt::Debug {
    /// Connected peers belonging to the topic's target shard when it
    /// differs from ours.
    fn cross_shard_peer_list(&self) -> Vec<PeerId>;

    /// Connected peers belonging to our own shard.
    fn intra_shard_peer_list(&self) -> Vec<PeerId>;

    /// Connected peers running in full history mode.
    fn full_history_list(&self) -> Vec<PeerId>;
}

/// Trait-object [PeerListCreator].
pub type DynPeerListCreator = Arc<dyn PeerListCreator>;

/// Ranks peers by a quality score.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait PeersRatingHandler: 'static + Send + Sync + std::fmt::Debug {
    /// Reduce `peers` to at most `num_of_peers` entries, best first.
    ///
    /// The returned list must not be longer than
    /// `min(num_of_peers, peers.len())`.
    fn get_top_rated_peers_from_list(
        &self,
        peers: &[PeerId],
        num_of_peers: usize,
    ) -> Vec<PeerId>;
}

/// Trait-object [PeersRatingHandler].
pub type DynPeersRatingHandler = Arc<dyn PeersRatingHandler>;

/// Holds the operator-curated preferred peers of every shard.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait PreferredPeersHolder: 'static + Send + Sync + std::fmt::Debug {
    /// Snapshot of the preferred peers, keyed by shard.
    fn get(&self) -> HashMap<ShardId, Vec<PeerId>>;

    /// Whether `peer` is preferred in any shard.
    fn contains(&self, peer: &PeerId) -> bool;
}

/// Trait-object [PreferredPeersHolder].
pub type DynPreferredPeersHolder = Arc<dyn PreferredPeersHolder>;

/// Knows which epochs the live network still serves.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait CurrentNetworkEpochProvider:
    'static + Send + Sync + std::fmt::Debug
{
    /// Whether data of `epoch` is expected to be held by regular peers.
    fn epoch_is_active_in_network(&self, epoch: Epoch) -> bool;
}

/// Trait-object [CurrentNetworkEpochProvider].
pub type DynCurrentNetworkEpochProvider = Arc<dyn CurrentNetworkEpochProvider>;

/// Reports the shard this node belongs to.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait SelfShardIdProvider: 'static + Send + Sync + std::fmt::Debug {
    /// Our own shard id.
    fn self_id(&self) -> ShardId;
}

/// Trait-object [SelfShardIdProvider].
pub type DynSelfShardIdProvider = Arc<dyn SelfShardIdProvider>;
