//! No-op and constant collaborators.

use shardcast_api::*;
use std::sync::Arc;

/// An antiflood handler that lets every message through.
#[derive(Debug)]
pub struct DisabledAntiflood;

impl DisabledAntiflood {
    /// Construct a new [DisabledAntiflood].
    pub fn create() -> DynAntifloodHandler {
        Arc::new(DisabledAntiflood)
    }
}

impl AntifloodHandler for DisabledAntiflood {
    fn can_process_message(
        &self,
        _peer: &PeerId,
        _topic: &str,
        _size: usize,
    ) -> ShardcastResult<()> {
        Ok(())
    }
}

/// A debug handler that discards everything.
#[derive(Debug)]
pub struct DisabledDebugHandler;

impl DisabledDebugHandler {
    /// Construct a new [DisabledDebugHandler].
    pub fn create() -> DynDebugHandler {
        Arc::new(DisabledDebugHandler)
    }
}

impl DebugHandler for DisabledDebugHandler {
    fn log_requested_data(
        &self,
        _topic: &str,
        _original_hashes: &[bytes::Bytes],
        _num_intra_shard_peers: usize,
        _num_cross_shard_peers: usize,
    ) {
        // no-op
    }
}

/// Reports a shard id fixed at construction.
#[derive(Debug)]
pub struct FixedShardIdProvider(pub ShardId);

impl FixedShardIdProvider {
    /// Construct a new [FixedShardIdProvider].
    pub fn create(self_id: ShardId) -> DynSelfShardIdProvider {
        Arc::new(FixedShardIdProvider(self_id))
    }
}

impl SelfShardIdProvider for FixedShardIdProvider {
    fn self_id(&self) -> ShardId {
        self.0
    }
}
