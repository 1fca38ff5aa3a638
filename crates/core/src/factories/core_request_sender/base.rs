use crate::factories::DisabledDebugHandler;
use shardcast_api::*;
use std::sync::RwLock;

/// The topic identity and the per-peer send primitive a request sender is
/// built on.
#[derive(Debug)]
pub(super) struct BaseTopicSender {
    topic_name: String,
    target_shard_id: ShardId,
    messenger: DynMessenger,
    antiflood: DynAntifloodHandler,
    preferred_peers: DynPreferredPeersHolder,
    debug_handler: RwLock<DynDebugHandler>,
}

impl BaseTopicSender {
    pub fn new(
        topic_name: String,
        target_shard_id: ShardId,
        messenger: DynMessenger,
        antiflood: DynAntifloodHandler,
        preferred_peers: DynPreferredPeersHolder,
    ) -> Self {
        Self {
            topic_name,
            target_shard_id,
            messenger,
            antiflood,
            preferred_peers,
            debug_handler: RwLock::new(DisabledDebugHandler::create()),
        }
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    pub fn target_shard_id(&self) -> ShardId {
        self.target_shard_id
    }

    pub fn preferred_peers(&self) -> &DynPreferredPeersHolder {
        &self.preferred_peers
    }

    /// Send to one peer. Preferred peers skip the output antiflood check.
    pub fn send_to_connected_peer(
        &self,
        topic: &str,
        data: bytes::Bytes,
        peer: &PeerId,
    ) -> ShardcastResult<()> {
        if self.preferred_peers.contains(peer) {
            return self.messenger.send_to_connected_peer(topic, data, peer);
        }

        if let Err(err) =
            self.antiflood.can_process_message(peer, topic, data.len())
        {
            return Err(ShardcastError::other_src(
                format!(
                    "antiflood check failed while sending {} bytes to peer {peer}",
                    data.len()
                ),
                err,
            ));
        }

        self.messenger.send_to_connected_peer(topic, data, peer)
    }

    pub fn call_debug_handler(
        &self,
        original_hashes: &[bytes::Bytes],
        num_sent_intra: usize,
        num_sent_cross: usize,
    ) {
        self.debug_handler.read().unwrap().log_requested_data(
            &self.topic_name,
            original_hashes,
            num_sent_intra,
            num_sent_cross,
        );
    }

    pub fn set_debug_handler(&self, handler: DynDebugHandler) {
        *self.debug_handler.write().unwrap() = handler;
    }

    pub fn debug_handler(&self) -> DynDebugHandler {
        self.debug_handler.read().unwrap().clone()
    }
}
