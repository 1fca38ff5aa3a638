use bytes::Bytes;
use shardcast_api::{
    builder::Builder, DynTopicRequestSender, PeerId, RequestData,
    RequestDataType, ShardcastError, ShardId,
};
use shardcast_core::{
    default_test_builder,
    factories::{
        core_request_sender::config::{
            CoreRequestSenderConfig, CoreRequestSenderModConfig,
        },
        mem_messenger::MemMessageRecv,
        CoreNetworkEpochProvider, MemDebugHandler, MemMessenger,
        MemPeerListCreator, MemPreferredPeersHolder, ProtoMarshaller,
    },
};
use shardcast_test_utils::{
    enable_tracing,
    id::{random_hashes, random_peer_ids},
    topic::{TEST_REQUEST_TOPIC, TEST_TOPIC},
};
use std::sync::Arc;

const SELF_SHARD: ShardId = 0;
const TARGET_SHARD: ShardId = 1;

struct Node {
    messenger: Arc<MemMessenger>,
    preferred: Arc<MemPreferredPeersHolder>,
    epochs: Arc<CoreNetworkEpochProvider>,
    peer_list: Arc<MemPeerListCreator>,
    debug: Arc<MemDebugHandler>,
    sender: DynTopicRequestSender,
}

fn make_node(config: CoreRequestSenderConfig) -> Node {
    enable_tracing();

    let messenger = MemMessenger::create();
    let preferred = MemPreferredPeersHolder::create();
    let epochs = CoreNetworkEpochProvider::create();
    let builder = Builder {
        messenger: messenger.clone(),
        preferred_peers: preferred.clone(),
        epoch_provider: epochs.clone(),
        ..default_test_builder(SELF_SHARD)
    }
    .with_default_config()
    .unwrap();
    builder
        .config
        .set_module_config(&CoreRequestSenderModConfig {
            core_request_sender: config,
        })
        .unwrap();
    builder.validate_config().unwrap();
    let builder = builder.build();

    let peer_list = Arc::new(MemPeerListCreator::default());
    let sender = builder
        .request_sender
        .create(
            builder.clone(),
            TEST_TOPIC.to_string(),
            TARGET_SHARD,
            peer_list.clone(),
        )
        .unwrap();

    let debug = MemDebugHandler::create();
    sender.set_debug_handler(debug.clone());

    Node {
        messenger,
        preferred,
        epochs,
        peer_list,
        debug,
        sender,
    }
}

fn connect_all(
    messenger: &MemMessenger,
    peers: &[PeerId],
) -> Vec<MemMessageRecv> {
    peers.iter().map(|p| messenger.connect(p.clone())).collect()
}

/// Drain the received requests of every peer, decoded.
fn drain(recvs: &mut [MemMessageRecv]) -> Vec<Vec<RequestData>> {
    use shardcast_api::RequestMarshaller;

    let marshaller = ProtoMarshaller;
    recvs
        .iter_mut()
        .map(|recv| {
            let mut out = Vec::new();
            while let Ok(msg) = recv.try_recv() {
                assert_eq!(TEST_REQUEST_TOPIC, msg.topic);
                out.push(marshaller.unmarshal(&msg.data).unwrap());
            }
            out
        })
        .collect()
}

fn request(epoch: u32) -> RequestData {
    RequestData::new(
        RequestDataType::HashType,
        Bytes::from_static(b"some-hash"),
        epoch,
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn request_reaches_cross_and_intra_shard_peers() {
    let node = make_node(CoreRequestSenderConfig {
        num_intra_shard_peers: 2,
        num_cross_shard_peers: 3,
        num_full_history_peers: 3,
    });

    let cross = random_peer_ids(5);
    let intra = random_peer_ids(4);
    node.peer_list.set_cross_shard(cross.clone());
    node.peer_list.set_intra_shard(intra.clone());
    let mut cross_recv = connect_all(&node.messenger, &cross);
    let mut intra_recv = connect_all(&node.messenger, &intra);

    let hashes = random_hashes(3);
    node.sender.send_on_request_topic(&request(0), &hashes).unwrap();

    let cross_got = drain(&mut cross_recv);
    let intra_got = drain(&mut intra_recv);
    assert_eq!(3, cross_got.iter().filter(|r| !r.is_empty()).count());
    assert_eq!(2, intra_got.iter().filter(|r| !r.is_empty()).count());
    for got in cross_got.iter().chain(intra_got.iter()).flatten() {
        assert_eq!(request(0), *got);
    }

    let entries = node.debug.entries();
    assert_eq!(1, entries.len());
    assert_eq!(hashes, entries[0].original_hashes);
    assert_eq!(2, entries[0].num_intra_shard_peers);
    assert_eq!(3, entries[0].num_cross_shard_peers);
}

#[tokio::test(flavor = "multi_thread")]
async fn old_epochs_go_to_full_history_peers() {
    let node = make_node(CoreRequestSenderConfig::default());

    let cross = random_peer_ids(3);
    let full_history = random_peer_ids(5);
    node.peer_list.set_cross_shard(cross.clone());
    node.peer_list.set_full_history(full_history.clone());
    let mut cross_recv = connect_all(&node.messenger, &cross);
    let mut full_history_recv =
        connect_all(&node.messenger, &full_history);

    // with 3 active persisters, epochs 8..=10 are still served
    node.epochs.epoch_started(10);
    node.sender.send_on_request_topic(&request(7), &[]).unwrap();

    assert!(drain(&mut cross_recv).iter().all(|r| r.is_empty()));
    assert_eq!(
        3,
        drain(&mut full_history_recv)
            .iter()
            .filter(|r| !r.is_empty())
            .count()
    );
    assert_eq!(3, node.debug.entries()[0].num_intra_shard_peers);

    node.sender.send_on_request_topic(&request(8), &[]).unwrap();
    assert_eq!(
        2,
        drain(&mut cross_recv).iter().filter(|r| !r.is_empty()).count()
    );
    assert!(drain(&mut full_history_recv).iter().all(|r| r.is_empty()));
}

#[tokio::test(flavor = "multi_thread")]
async fn preferred_peer_always_gets_the_request() {
    let node = make_node(CoreRequestSenderConfig {
        num_intra_shard_peers: 0,
        num_cross_shard_peers: 2,
        num_full_history_peers: 0,
    });

    let cross = random_peer_ids(6);
    node.peer_list.set_cross_shard(cross.clone());
    let mut cross_recv = connect_all(&node.messenger, &cross);

    // the preferred peer does not need to be in the candidate list
    let preferred = random_peer_ids(1).remove(0);
    node.preferred.put(preferred.clone(), TARGET_SHARD);
    let mut preferred_recv = node.messenger.connect(preferred);

    for _ in 0..5 {
        node.sender.send_on_request_topic(&request(0), &[]).unwrap();
        assert!(preferred_recv.try_recv().is_ok());
        assert_eq!(
            1,
            drain(&mut cross_recv)
                .iter()
                .filter(|r| !r.is_empty())
                .count()
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn disconnected_peers_are_skipped() {
    let node = make_node(CoreRequestSenderConfig {
        num_intra_shard_peers: 0,
        num_cross_shard_peers: 2,
        num_full_history_peers: 0,
    });

    let cross = random_peer_ids(2);
    node.peer_list.set_cross_shard(cross.clone());
    let mut recv = node.messenger.connect(cross[1].clone());

    node.sender.send_on_request_topic(&request(0), &[]).unwrap();

    assert!(recv.try_recv().is_ok());
    assert_eq!(1, node.debug.entries()[0].num_cross_shard_peers);

    drop(recv);
    let err = node
        .sender
        .send_on_request_topic(&request(0), &[])
        .unwrap_err();
    assert!(matches!(
        err,
        ShardcastError::SendRequest {
            cross_peers: 2,
            intra_peers: 0,
            full_history_peers: 0,
            ..
        }
    ));
    assert!(!node.messenger.is_connected(&cross[1]));
}

#[tokio::test(flavor = "multi_thread")]
async fn runtime_quota_change() {
    let node = make_node(CoreRequestSenderConfig::default());
    assert_eq!((1, 2), node.sender.num_peers_to_query());

    let cross = random_peer_ids(6);
    node.peer_list.set_cross_shard(cross.clone());
    let mut cross_recv = connect_all(&node.messenger, &cross);

    node.sender.set_num_peers_to_query(0, 5);
    node.sender.send_on_request_topic(&request(0), &[]).unwrap();

    assert_eq!(
        5,
        drain(&mut cross_recv).iter().filter(|r| !r.is_empty()).count()
    );
}
