//! Per-peer message delivery.

use crate::*;
use std::sync::Arc;

/// The low-level pub/sub messenger. Framing, topic creation and
/// connection management live behind this trait.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait Messenger: 'static + Send + Sync + std::fmt::Debug {
    /// Send `data` on `topic` to one already connected peer.
    ///
    /// This is best-effort: `Ok(())` means the message was handed to the
    /// transport, not that the peer received it. Implementations must not
    /// retry on their own.
    fn send_to_connected_peer(
        &self,
        topic: &str,
        data: bytes::Bytes,
        peer: &PeerId,
    ) -> ShardcastResult<()>;
}

/// Trait-object [Messenger].
pub type DynMessenger = Arc<dyn Messenger>;

/// Gate consulted before sending to a peer so a node does not flood it.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait AntifloodHandler: 'static + Send + Sync + std::fmt::Debug {
    /// Return an error if a message of `size` bytes on `topic` must not be
    /// sent to `peer` right now.
    fn can_process_message(
        &self,
        peer: &PeerId,
        topic: &str,
        size: usize,
    ) -> ShardcastResult<()>;
}

/// Trait-object [AntifloodHandler].
pub type DynAntifloodHandler = Arc<dyn AntifloodHandler>;

/// Receives a record of every dispatched request.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait DebugHandler: 'static + Send + Sync + std::fmt::Debug {
    /// Called once per dispatch with the number of peers that accepted the
    /// request. Fire-and-forget.
    fn log_requested_data(
        &self,
        topic: &str,
        original_hashes: &[bytes::Bytes],
        num_intra_shard_peers: usize,
        num_cross_shard_peers: usize,
    );
}

/// Trait-object [DebugHandler].
pub type DynDebugHandler = Arc<dyn DebugHandler>;
