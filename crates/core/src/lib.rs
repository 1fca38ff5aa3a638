#![deny(missing_docs)]
//! Shardcast sharded p2p request dispatch.

use shardcast_api::{builder::Builder, config::Config, ShardId};

/// Construct a builder wired with the in-memory collaborators.
///
/// This builder is NOT meant for production: the messenger only reaches
/// peers in the same process and the antiflood gate is disabled.
///
/// - `marshaller` - [factories::ProtoMarshaller].
/// - `randomizer` - [factories::RandRandomizer].
/// - `messenger` - [factories::MemMessenger].
/// - `antiflood` - [factories::DisabledAntiflood].
/// - `preferred_peers` - [factories::MemPreferredPeersHolder].
/// - `epoch_provider` - [factories::CoreNetworkEpochProvider].
/// - `shard_id_provider` - [factories::FixedShardIdProvider].
/// - `peers_rating` - [factories::MemPeersRatingHandler].
/// - `request_sender` - [factories::CoreRequestSenderFactory].
pub fn default_test_builder(self_shard_id: ShardId) -> Builder {
    Builder {
        config: Config::default(),
        marshaller: factories::ProtoMarshaller::create(),
        randomizer: factories::RandRandomizer::create(),
        messenger: factories::MemMessenger::create(),
        antiflood: factories::DisabledAntiflood::create(),
        preferred_peers: factories::MemPreferredPeersHolder::create(),
        epoch_provider: factories::CoreNetworkEpochProvider::create(),
        shard_id_provider: factories::FixedShardIdProvider::create(
            self_shard_id,
        ),
        peers_rating: factories::MemPeersRatingHandler::create(),
        request_sender: factories::CoreRequestSenderFactory::create(),
    }
}

pub mod factories;
