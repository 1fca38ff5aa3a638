//! A debug handler that remembers what it was told.

use shardcast_api::*;
use std::sync::{Arc, Mutex};

/// One [DebugHandler::log_requested_data] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedDataEntry {
    /// The topic name.
    pub topic: String,
    /// The hashes the request was made for.
    pub original_hashes: Vec<bytes::Bytes>,
    /// Intra shard (or full history) peers that accepted the request.
    pub num_intra_shard_peers: usize,
    /// Cross shard peers that accepted the request.
    pub num_cross_shard_peers: usize,
}

/// A [DebugHandler] keeping every entry in memory.
#[derive(Debug, Default)]
pub struct MemDebugHandler {
    entries: Mutex<Vec<RequestedDataEntry>>,
}

impl MemDebugHandler {
    /// Construct a new [MemDebugHandler].
    pub fn create() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything logged so far, oldest first.
    pub fn entries(&self) -> Vec<RequestedDataEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl DebugHandler for MemDebugHandler {
    fn log_requested_data(
        &self,
        topic: &str,
        original_hashes: &[bytes::Bytes],
        num_intra_shard_peers: usize,
        num_cross_shard_peers: usize,
    ) {
        tracing::debug!(
            topic,
            num_intra_shard_peers,
            num_cross_shard_peers,
            "requested data"
        );
        self.entries.lock().unwrap().push(RequestedDataEntry {
            topic: topic.to_string(),
            original_hashes: original_hashes.to_vec(),
            num_intra_shard_peers,
            num_cross_shard_peers,
        });
    }
}
