//! Test utilities associated with ids.

use bytes::Bytes;
use shardcast_api::PeerId;

use crate::random_bytes;

/// Create a random peer id.
pub fn random_peer_id() -> PeerId {
    PeerId(Bytes::from(random_bytes(32)))
}

/// Create a list of `count` random peer ids.
pub fn random_peer_ids(count: usize) -> Vec<PeerId> {
    (0..count).map(|_| random_peer_id()).collect()
}

/// Create a list of random hashes, as handed to a request sender as the
/// original hashes of a request.
pub fn random_hashes(count: usize) -> Vec<Bytes> {
    (0..count).map(|_| Bytes::from(random_bytes(32))).collect()
}
