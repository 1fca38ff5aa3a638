//! The core topic request sender. It broadcasts data retrieval requests
//! to a bounded, rated and shuffled selection of peers.
//!
//! ### Dispatch
//!
//! A request is marshalled once and sent on `<topic name>_REQUEST`.
//! The epoch of the request decides which peers are asked:
//!
//! - If the epoch is active in the network, cross shard peers are asked
//!   first, then intra shard peers. Each category has its own quota.
//! - Otherwise regular peers have most likely pruned the data already, so
//!   only full history peers are asked. Their sends are counted as intra
//!   shard sends.
//!
//! The debug handler is told how many peers accepted the request, and the
//! dispatch fails if none did.
//!
//! ### Peer selection
//!
//! For every category:
//!
//! - The candidate list is reduced to the top rated peers, at most as many
//!   as the quota.
//! - The rated peers are shuffled so the best peer is not always contacted
//!   first.
//! - If a preferred peer exists for the shard and the quota is larger than
//!   one, the preferred peer is contacted before all others. It does not
//!   take the place of a rated peer.
//! - Peers are contacted in that order until the quota of successful sends
//!   is reached. A failed send is skipped and never retried.
//!
//! ### Quotas
//!
//! The intra, cross and full history quotas share one lock. Dispatch copies
//! them out and releases the lock before contacting any collaborator, so a
//! slow send never blocks [TopicRequestSender::set_num_peers_to_query].

use base::BaseTopicSender;
use selection::{selection_order, SelectionToken};
use shardcast_api::{builder::Builder, config::Config, *};
use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

mod base;
mod selection;


/// CoreRequestSender configuration types.
pub mod config {
    use shardcast_api::{ShardcastError, ShardcastResult, MIN_PEERS_TO_QUERY};

    /// Configuration parameters for [CoreRequestSenderFactory](super::CoreRequestSenderFactory).
    ///
    /// Negative quotas are rejected by [validate](Self::validate) with the
    /// offending field named.
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct CoreRequestSenderConfig {
        /// How many intra shard peers to ask per request. Default: 1.
        pub num_intra_shard_peers: i32,
        /// How many cross shard peers to ask per request. Default: 2.
        pub num_cross_shard_peers: i32,
        /// How many full history peers to ask when the requested epoch is
        /// no longer active in the network. Default: 3.
        pub num_full_history_peers: i32,
    }

    impl Default for CoreRequestSenderConfig {
        fn default() -> Self {
            Self {
                num_intra_shard_peers: 1,
                num_cross_shard_peers: 2,
                num_full_history_peers: 3,
            }
        }
    }

    impl CoreRequestSenderConfig {
        /// Check every quota is non-negative and that at least
        /// [MIN_PEERS_TO_QUERY] intra plus cross shard peers are asked.
        pub fn validate(&self) -> ShardcastResult<()> {
            let non_negative = [
                ("num_intra_shard_peers", self.num_intra_shard_peers),
                ("num_cross_shard_peers", self.num_cross_shard_peers),
                ("num_full_history_peers", self.num_full_history_peers),
            ];
            for (field, value) in non_negative {
                if value < 0 {
                    return Err(ShardcastError::invalid_argument(
                        field,
                        format!(
                            "the value should be greater or equal than 0, got {value}"
                        ),
                    ));
                }
            }

            let sum = i64::from(self.num_cross_shard_peers)
                + i64::from(self.num_intra_shard_peers);
            if sum < MIN_PEERS_TO_QUERY as i64 {
                return Err(ShardcastError::invalid_argument(
                    "num_cross_shard_peers, num_intra_shard_peers",
                    format!(
                        "their sum should be greater or equal than {MIN_PEERS_TO_QUERY}, got {sum}"
                    ),
                ));
            }

            Ok(())
        }
    }

    /// Module-level configuration for CoreRequestSender.
    #[derive(
        Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize,
    )]
    #[serde(rename_all = "camelCase")]
    pub struct CoreRequestSenderModConfig {
        /// CoreRequestSender configuration.
        #[serde(default)]
        pub core_request_sender: CoreRequestSenderConfig,
    }
}

pub use config::*;

/// A production-ready request sender module.
#[derive(Debug)]
pub struct CoreRequestSenderFactory {}

impl CoreRequestSenderFactory {
    /// Construct a new CoreRequestSenderFactory.
    pub fn create() -> DynRequestSenderFactory {
        Arc::new(Self {})
    }
}

impl RequestSenderFactory for CoreRequestSenderFactory {
    fn default_config(&self, config: &mut Config) -> ShardcastResult<()> {
        config.set_module_config(&CoreRequestSenderModConfig::default())?;
        Ok(())
    }

    fn validate_config(&self, config: &Config) -> ShardcastResult<()> {
        let config: CoreRequestSenderModConfig = config.get_module_config()?;
        config.core_request_sender.validate()
    }

    fn create(
        &self,
        builder: Arc<Builder>,
        topic_name: String,
        target_shard_id: ShardId,
        peer_list_creator: DynPeerListCreator,
    ) -> ShardcastResult<DynTopicRequestSender> {
        let config: CoreRequestSenderModConfig =
            builder.config.get_module_config()?;
        let out: DynTopicRequestSender =
            Arc::new(CoreTopicRequestSender::new(TopicRequestSenderArgs {
                topic_name,
                target_shard_id,
                config: config.core_request_sender,
                marshaller: builder.marshaller.clone(),
                randomizer: builder.randomizer.clone(),
                peer_list_creator,
                messenger: builder.messenger.clone(),
                antiflood: builder.antiflood.clone(),
                preferred_peers: builder.preferred_peers.clone(),
                epoch_provider: builder.epoch_provider.clone(),
                shard_id_provider: builder.shard_id_provider.clone(),
                peers_rating: builder.peers_rating.clone(),
            })?);
        Ok(out)
    }
}

/// Arguments for [CoreTopicRequestSender::new].
#[derive(Debug, Clone)]
pub struct TopicRequestSenderArgs {
    /// The topic name, without the request suffix.
    pub topic_name: String,
    /// The shard whose data is requested.
    pub target_shard_id: ShardId,
    /// Initial quotas.
    pub config: CoreRequestSenderConfig,
    /// Encodes requests.
    pub marshaller: DynRequestMarshaller,
    /// Drives shuffling and preferred peer picks.
    pub randomizer: DynIntRandomizer,
    /// Supplies the candidate peers of this topic.
    pub peer_list_creator: DynPeerListCreator,
    /// Delivers requests.
    pub messenger: DynMessenger,
    /// Output antiflood gate for non-preferred peers.
    pub antiflood: DynAntifloodHandler,
    /// Curated per-shard peers.
    pub preferred_peers: DynPreferredPeersHolder,
    /// Decides between regular and full history peers.
    pub epoch_provider: DynCurrentNetworkEpochProvider,
    /// Read once to learn our own shard.
    pub shard_id_provider: DynSelfShardIdProvider,
    /// Ranks candidate peers.
    pub peers_rating: DynPeersRatingHandler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumPeersToQuery {
    intra: usize,
    cross: usize,
    full_history: usize,
}

/// The core [TopicRequestSender].
#[derive(Debug)]
pub struct CoreTopicRequestSender {
    base: BaseTopicSender,
    marshaller: DynRequestMarshaller,
    randomizer: DynIntRandomizer,
    peer_list_creator: DynPeerListCreator,
    epoch_provider: DynCurrentNetworkEpochProvider,
    peers_rating: DynPeersRatingHandler,
    self_shard_id: ShardId,
    num_peers_to_query: RwLock<NumPeersToQuery>,
}

impl CoreTopicRequestSender {
    /// Validate `args` and construct a request sender.
    pub fn new(args: TopicRequestSenderArgs) -> ShardcastResult<Self> {
        if args.topic_name.is_empty() {
            return Err(ShardcastError::invalid_argument(
                "topic_name",
                "should not be empty",
            ));
        }
        args.config.validate()?;

        // validated non-negative above
        let num_peers_to_query = NumPeersToQuery {
            intra: args.config.num_intra_shard_peers as usize,
            cross: args.config.num_cross_shard_peers as usize,
            full_history: args.config.num_full_history_peers as usize,
        };

        Ok(Self {
            base: BaseTopicSender::new(
                args.topic_name,
                args.target_shard_id,
                args.messenger,
                args.antiflood,
                args.preferred_peers,
            ),
            marshaller: args.marshaller,
            randomizer: args.randomizer,
            peer_list_creator: args.peer_list_creator,
            epoch_provider: args.epoch_provider,
            peers_rating: args.peers_rating,
            self_shard_id: args.shard_id_provider.self_id(),
            num_peers_to_query: RwLock::new(num_peers_to_query),
        })
    }

    fn send_on_topic(
        &self,
        peers: &[PeerId],
        preferred_peer: Option<PeerId>,
        topic: &str,
        data: &bytes::Bytes,
        max_to_send: usize,
        category: PeerCategory,
    ) -> usize {
        if peers.is_empty() || max_to_send == 0 {
            return 0;
        }

        let rated = self
            .peers_rating
            .get_top_rated_peers_from_list(peers, max_to_send);

        // a quota of one is never handed to the preferred peer
        let preferred_peer = preferred_peer.filter(|_| max_to_send > 1);
        let order = selection_order(
            rated.len(),
            preferred_peer.is_some(),
            self.randomizer.as_ref(),
        );

        let mut histogram: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut sent_to: Vec<(PeerCategory, PeerId)> = Vec::new();
        for token in order {
            let Some(peer) = token.resolve(&rated, preferred_peer.as_ref())
            else {
                continue;
            };

            *histogram.entry(token.label(category)).or_default() += 1;
            if token == SelectionToken::Preferred {
                tracing::trace!(
                    %peer,
                    topic,
                    %category,
                    "sending request to preferred peer"
                );
            }

            if let Err(err) =
                self.base.send_to_connected_peer(topic, data.clone(), peer)
            {
                tracing::debug!(%peer, topic, "request not sent: {err}");
                continue;
            }

            sent_to.push((category, peer.clone()));
            if sent_to.len() == max_to_send {
                break;
            }
        }

        tracing::trace!(?sent_to, "requests are sent to");
        tracing::trace!(
            max_to_send,
            topic,
            ?histogram,
            "request peers histogram"
        );

        sent_to.len()
    }

    fn preferred_peer(&self, shard_id: ShardId) -> Option<PeerId> {
        let mut preferred_peers = self.base.preferred_peers().get();
        let peers_in_shard = preferred_peers
            .remove(&shard_id)
            .filter(|peers| !peers.is_empty())?;

        let index = self.randomizer.intn(peers_in_shard.len());
        peers_in_shard.get(index).cloned()
    }
}

impl TopicRequestSender for CoreTopicRequestSender {
    fn send_on_request_topic(
        &self,
        request: &RequestData,
        original_hashes: &[bytes::Bytes],
    ) -> ShardcastResult<()> {
        let data = self.marshaller.marshal(request)?;
        let topic = self.request_topic();
        let num_peers_to_query = *self.num_peers_to_query.read().unwrap();

        let mut num_sent_intra = 0;
        let mut num_sent_cross = 0;
        let mut cross_peers = Vec::new();
        let mut intra_peers = Vec::new();
        let mut full_history_peers = Vec::new();

        if self.epoch_provider.epoch_is_active_in_network(request.epoch) {
            cross_peers = self.peer_list_creator.cross_shard_peer_list();
            let preferred_peer =
                self.preferred_peer(self.base.target_shard_id());
            num_sent_cross = self.send_on_topic(
                &cross_peers,
                preferred_peer,
                &topic,
                &data,
                num_peers_to_query.cross,
                PeerCategory::CrossShard,
            );

            intra_peers = self.peer_list_creator.intra_shard_peer_list();
            let preferred_peer = self.preferred_peer(self.self_shard_id);
            num_sent_intra = self.send_on_topic(
                &intra_peers,
                preferred_peer,
                &topic,
                &data,
                num_peers_to_query.intra,
                PeerCategory::IntraShard,
            );
        } else {
            full_history_peers = self.peer_list_creator.full_history_list();
            num_sent_intra = self.send_on_topic(
                &full_history_peers,
                None,
                &topic,
                &data,
                num_peers_to_query.full_history,
                PeerCategory::FullHistory,
            );
        }

        self.base.call_debug_handler(
            original_hashes,
            num_sent_intra,
            num_sent_cross,
        );

        if num_sent_intra + num_sent_cross == 0 {
            return Err(ShardcastError::SendRequest {
                topic: self.base.topic_name().into(),
                cross_peers: cross_peers.len(),
                intra_peers: intra_peers.len(),
                full_history_peers: full_history_peers.len(),
            });
        }

        Ok(())
    }

    fn set_num_peers_to_query(&self, intra: usize, cross: usize) {
        let mut lock = self.num_peers_to_query.write().unwrap();
        lock.intra = intra;
        lock.cross = cross;
    }

    fn num_peers_to_query(&self) -> (usize, usize) {
        let lock = self.num_peers_to_query.read().unwrap();
        (lock.intra, lock.cross)
    }

    fn request_topic(&self) -> String {
        format!("{}{TOPIC_REQUEST_SUFFIX}", self.base.topic_name())
    }

    fn target_shard_id(&self) -> ShardId {
        self.base.target_shard_id()
    }

    fn set_debug_handler(&self, handler: DynDebugHandler) {
        self.base.set_debug_handler(handler);
    }

    fn debug_handler(&self) -> DynDebugHandler {
        self.base.debug_handler()
    }
}
