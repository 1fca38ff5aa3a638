//! Topic request sender types.

use crate::{builder::Builder, config::Config, *};
use std::sync::Arc;

/// The least number of intra plus cross shard peers a request sender must
/// be constructed to query.
pub const MIN_PEERS_TO_QUERY: usize = 2;

/// Broadcasts data retrieval requests to a bounded selection of peers.
pub trait TopicRequestSender: 'static + Send + Sync + std::fmt::Debug {
    /// Send `request` on this sender's request topic.
    ///
    /// Only the request is sent; the requested data arrives asynchronously
    /// through whatever handles the topic's incoming messages.
    /// `original_hashes` are only handed to the debug handler.
    fn send_on_request_topic(
        &self,
        request: &RequestData,
        original_hashes: &[bytes::Bytes],
    ) -> ShardcastResult<()>;

    /// Replace the number of intra and cross shard peers to query.
    fn set_num_peers_to_query(&self, intra: usize, cross: usize);

    /// The current number of `(intra, cross)` shard peers to query.
    fn num_peers_to_query(&self) -> (usize, usize);

    /// The topic requests are sent on.
    fn request_topic(&self) -> String;

    /// The shard whose data this sender requests.
    fn target_shard_id(&self) -> ShardId;

    /// Replace the debug handler.
    fn set_debug_handler(&self, handler: DynDebugHandler);

    /// The current debug handler.
    fn debug_handler(&self) -> DynDebugHandler;
}

/// Trait-object [TopicRequestSender].
pub type DynTopicRequestSender = Arc<dyn TopicRequestSender>;

/// A factory for constructing [TopicRequestSender] instances.
pub trait RequestSenderFactory: 'static + Send + Sync + std::fmt::Debug {
    /// Help the builder construct a default config from the chosen
    /// module factories.
    fn default_config(&self, config: &mut Config) -> ShardcastResult<()>;

    /// Validate configuration.
    fn validate_config(&self, config: &Config) -> ShardcastResult<()>;

    /// Construct a request sender for `topic_name`, requesting data of
    /// `target_shard_id` from the peers `peer_list_creator` supplies.
    fn create(
        &self,
        builder: Arc<Builder>,
        topic_name: String,
        target_shard_id: ShardId,
        peer_list_creator: DynPeerListCreator,
    ) -> ShardcastResult<DynTopicRequestSender>;
}

/// Trait-object [RequestSenderFactory].
pub type DynRequestSenderFactory = Arc<dyn RequestSenderFactory>;
