//! The in-process messenger provided by shardcast.
//! This is NOT a production module. It is for testing only.
//! It only delivers to peers registered within the same process.

use shardcast_api::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};


/// A message delivered by [MemMessenger].
#[derive(Debug, Clone, PartialEq)]
pub struct MemMessage {
    /// The topic the message was sent on.
    pub topic: String,

    /// The message payload.
    pub data: bytes::Bytes,
}

/// Receiving end of a peer connected to a [MemMessenger].
pub type MemMessageRecv = UnboundedReceiver<MemMessage>;

/// A [Messenger] delivering to in-process peers over channels.
#[derive(Debug, Default)]
pub struct MemMessenger {
    peers: Mutex<HashMap<PeerId, UnboundedSender<MemMessage>>>,
}

impl MemMessenger {
    /// Construct a new [MemMessenger].
    pub fn create() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Connect `peer`. Messages sent to it arrive on the returned receiver.
    /// Connecting an already connected peer replaces its receiver.
    pub fn connect(&self, peer: PeerId) -> MemMessageRecv {
        let (send, recv) = unbounded_channel();
        self.peers.lock().unwrap().insert(peer, send);
        recv
    }

    /// Disconnect `peer`.
    pub fn disconnect(&self, peer: &PeerId) {
        self.peers.lock().unwrap().remove(peer);
    }

    /// Whether `peer` is connected.
    pub fn is_connected(&self, peer: &PeerId) -> bool {
        self.peers.lock().unwrap().contains_key(peer)
    }
}

impl Messenger for MemMessenger {
    fn send_to_connected_peer(
        &self,
        topic: &str,
        data: bytes::Bytes,
        peer: &PeerId,
    ) -> ShardcastResult<()> {
        let mut lock = self.peers.lock().unwrap();
        let Some(send) = lock.get(peer) else {
            return Err(ShardcastError::other(format!(
                "peer {peer} is not connected"
            )));
        };

        let message = MemMessage {
            topic: topic.to_string(),
            data,
        };
        if send.send(message).is_err() {
            tracing::warn!(%peer, "receiver dropped, disconnecting peer");
            lock.remove(peer);
            return Err(ShardcastError::other(format!(
                "peer {peer} closed its connection"
            )));
        }

        Ok(())
    }
}
