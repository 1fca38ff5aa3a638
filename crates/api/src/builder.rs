//! Builder-related types.

use crate::*;
use std::sync::Arc;

/// The general shardcast builder.
/// This contains the configuration, the node-wide collaborators every
/// request sender shares, and the request sender factory.
#[derive(Debug)]
pub struct Builder {
    /// The module configuration to be used when building modules.
    /// This can be loaded from disk or modified before freezing the builder.
    pub config: config::Config,

    /// Encodes requests.
    pub marshaller: DynRequestMarshaller,

    /// Drives the shuffling and the preferred peer picks.
    pub randomizer: DynIntRandomizer,

    /// Delivers requests to single peers.
    pub messenger: DynMessenger,

    /// Output antiflood gate.
    pub antiflood: DynAntifloodHandler,

    /// The operator-curated preferred peers.
    pub preferred_peers: DynPreferredPeersHolder,

    /// Decides between regular and full history peers.
    pub epoch_provider: DynCurrentNetworkEpochProvider,

    /// Reports our own shard.
    pub shard_id_provider: DynSelfShardIdProvider,

    /// Ranks candidate peers.
    pub peers_rating: DynPeersRatingHandler,

    /// The [sender::RequestSenderFactory] used to construct
    /// [sender::TopicRequestSender] instances.
    pub request_sender: sender::DynRequestSenderFactory,
}

impl Builder {
    /// Construct a default config given the configured module factories.
    /// Note, this should be called before freezing the Builder instance
    /// in an Arc<>.
    pub fn with_default_config(mut self) -> ShardcastResult<Self> {
        self.request_sender.default_config(&mut self.config)?;
        Ok(self)
    }

    /// Run the module factories' validation against the current config.
    pub fn validate_config(&self) -> ShardcastResult<()> {
        self.request_sender.validate_config(&self.config)
    }

    /// Freeze this builder so it can be shared with factories.
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }
}
