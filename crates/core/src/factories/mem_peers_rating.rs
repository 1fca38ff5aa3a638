//! An in-memory peers rating handler.

use shardcast_api::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Highest rating a peer can reach.
pub const MAX_RATING: i32 = 100;

/// Lowest rating a peer can reach.
pub const MIN_RATING: i32 = -100;

/// A [PeersRatingHandler] keeping one integer rating per peer.
///
/// Unknown peers are rated 0. Ties keep the order of the candidate list.
#[derive(Debug, Default)]
pub struct MemPeersRatingHandler {
    ratings: Mutex<HashMap<PeerId, i32>>,
}

impl MemPeersRatingHandler {
    /// Construct a new [MemPeersRatingHandler].
    pub fn create() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Raise the rating of `peer`, e.g. after it answered a request.
    pub fn increase_rating(&self, peer: &PeerId, by: i32) {
        self.update(peer, by);
    }

    /// Lower the rating of `peer`, e.g. after a request timed out.
    pub fn decrease_rating(&self, peer: &PeerId, by: i32) {
        self.update(peer, -by);
    }

    /// The current rating of `peer`.
    pub fn rating(&self, peer: &PeerId) -> i32 {
        self.ratings
            .lock()
            .unwrap()
            .get(peer)
            .copied()
            .unwrap_or_default()
    }

    fn update(&self, peer: &PeerId, delta: i32) {
        let mut lock = self.ratings.lock().unwrap();
        let rating = lock.entry(peer.clone()).or_default();
        *rating = rating.saturating_add(delta).clamp(MIN_RATING, MAX_RATING);
    }
}

impl PeersRatingHandler for MemPeersRatingHandler {
    fn get_top_rated_peers_from_list(
        &self,
        peers: &[PeerId],
        num_of_peers: usize,
    ) -> Vec<PeerId> {
        let lock = self.ratings.lock().unwrap();
        let mut rated: Vec<(i32, &PeerId)> = peers
            .iter()
            .map(|peer| (lock.get(peer).copied().unwrap_or_default(), peer))
            .collect();
        drop(lock);

        // stable, so equally rated peers keep their relative order
        rated.sort_by(|a, b| b.0.cmp(&a.0));
        rated
            .into_iter()
            .take(num_of_peers)
            .map(|(_, peer)| peer.clone())
            .collect()
    }
}
