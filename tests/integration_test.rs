use bytes::Bytes;
use chrono::Utc;
use coordination::{
    CommitLogEntry, ConsumerChannelOffset, CoordErrorKind, CoordinatorRpcClient, CoordinatorService, Epoch,
    LeaderEpoch, LeaderSession, LogOffset, Message, MessageId, PeerEndpoint, RpcCallError, TopicPartitionMetaInfo,
};
use slog::Drain;
use std::error::Error;
use std::fs::OpenOptions;
use tokio::time::Duration;

#[tokio::test]
async fn stale_leader_session_is_fenced() -> Result<(), Box<dyn Error>> {
    let (service, client) = start_peer_and_connect("node-b").await?;
    let info = topic_info("orders", 0);

    client.update_topic_info(Epoch::new(5), &info).await?;
    client
        .notify_topic_leader_session(Epoch::new(5), &info, &session("orders", 0, 3, "s-3"))
        .await?;

    let result = client
        .notify_topic_leader_session(Epoch::new(5), &info, &session("orders", 0, 2, "s-2"))
        .await;

    assert_rejected(result, CoordErrorKind::StaleLeaderEpoch);
    let accepted = service.leader_session("orders", 0).await.expect("Session accepted");
    assert_eq!(accepted.leader_epoch, LeaderEpoch::new(3));

    // Stale coordinator epoch is fenced too, and also asks for a metadata refresh.
    let error = client.update_topic_info(Epoch::new(4), &info).await.unwrap_err();
    assert!(error.requires_metadata_refresh());

    service.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn replicate_then_catch_up_from_retained_window() -> Result<(), Box<dyn Error>> {
    let (service, client) = start_peer_and_connect("node-b").await?;
    let info = topic_info("orders", 1);
    open_for_writes(&client, &info, 3).await?;

    assert_eq!(client.get_last_commit_log_id(&info).await?, None);

    client
        .put_message(LeaderEpoch::new(3), &info, &entry(0, 3), &message(0))
        .await?;
    let entries: Vec<_> = (1..200).map(|o| entry(o, 3)).collect();
    let messages: Vec<_> = (1..200).map(message).collect();
    client
        .put_messages(LeaderEpoch::new(3), &info, &entries, &messages)
        .await?;
    assert_eq!(client.get_last_commit_log_id(&info).await?, Some(LogOffset::new(199)));

    // A batch with a gap in the middle lands nothing.
    let mut gapped: Vec<_> = (200..203).map(|o| entry(o, 3)).collect();
    gapped[1].log_id = LogOffset::new(250);
    let result = client
        .put_messages(LeaderEpoch::new(3), &info, &gapped, &(200..203).map(message).collect::<Vec<_>>())
        .await;
    assert_rejected(result, CoordErrorKind::CommitLogMismatch);
    assert_eq!(client.get_last_commit_log_id(&info).await?, Some(LogOffset::new(199)));

    service
        .clean_commit_log_before("orders", 1, LogOffset::new(80))
        .await?;

    let batch = client
        .pull_commit_logs_and_data("orders", 1, LogOffset::new(100), 50)
        .await?;
    assert_eq!(batch.start_offset, LogOffset::new(100));
    assert_eq!(batch.entries.len(), 50);
    assert_eq!(batch.payloads.len(), 50);
    for (i, (entry, payload)) in batch.entries.iter().zip(batch.payloads.iter()).enumerate() {
        let offset = 100 + i as u64;
        assert_eq!(entry.log_id, LogOffset::new(offset));
        assert_eq!(Message::decode_payload(payload)?, message(offset));
    }

    let rest = client
        .pull_commit_logs_and_data("orders", 1, batch.next_offset(), 1000)
        .await?;
    assert_eq!(rest.start_offset, LogOffset::new(150));
    assert_eq!(rest.next_offset(), LogOffset::new(200));

    let (offset, found) = client
        .get_commit_log_from_offset(&info, LogOffset::new(150))
        .await?;
    assert_eq!(offset, LogOffset::new(150));
    assert_eq!(found, entry(150, 3));

    let result = client.get_commit_log_from_offset(&info, LogOffset::new(79)).await;
    assert_rejected(result, CoordErrorKind::CommitLogOutOfRange);
    let result = client
        .pull_commit_logs_and_data("orders", 1, LogOffset::new(79), 10)
        .await;
    assert_rejected(result, CoordErrorKind::CommitLogOutOfRange);

    service.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn writes_are_gated_and_stats_reflect_state() -> Result<(), Box<dyn Error>> {
    let (service, client) = start_peer_and_connect("node-b").await?;
    let mut info = topic_info("payments", 0);
    info.channels = vec!["ledger".into()];

    client.update_topic_info(Epoch::new(1), &info).await?;
    client
        .notify_topic_leader_session(Epoch::new(1), &info, &session("payments", 0, 1, "s-1"))
        .await?;

    let result = client
        .put_message(LeaderEpoch::new(1), &info, &entry(0, 1), &message(0))
        .await;
    assert_rejected(result, CoordErrorKind::WriteDisabled);

    client.enable_topic_write(Epoch::new(1), &info).await?;
    client
        .put_message(LeaderEpoch::new(1), &info, &entry(0, 1), &message(0))
        .await?;

    let offset = ConsumerChannelOffset {
        virtual_offset: 64,
        flush: true,
        allow_backward: false,
    };
    client
        .update_channel_offset(LeaderEpoch::new(1), &info, "ledger", offset)
        .await?;
    let result = client
        .update_channel_offset(LeaderEpoch::new(2), &info, "ledger", offset)
        .await;
    assert_rejected(result, CoordErrorKind::LeaderEpochMismatch);

    let stats = client.get_topic_stats("payments").await?;
    assert_eq!(stats.node_id, "node-b");
    assert_eq!(stats.partitions.len(), 1);
    let partition = &stats.partitions[0];
    assert!(partition.write_enabled);
    assert_eq!(partition.leader_epoch, LeaderEpoch::new(1));
    assert_eq!(partition.next_log_offset, LogOffset::new(1));
    assert_eq!(partition.channels, vec![("ledger".to_string(), 64)]);
    assert_eq!(service.topic_stats("payments").await?, stats);

    client.disable_topic_write(Epoch::new(2), &info).await?;
    let result = client
        .put_message(LeaderEpoch::new(1), &info, &entry(1, 1), &message(1))
        .await;
    assert_rejected(result, CoordErrorKind::WriteDisabled);

    let result = client.get_topic_stats("unknown-topic").await;
    assert_rejected(result, CoordErrorKind::TopicNotFound);

    service.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn unreachable_peer_is_a_transport_error() {
    let config = coordination::RpcClientConfig {
        endpoint: PeerEndpoint::latency_sensitive("127.0.0.1:47399"),
        info_logger: create_root_logger("client"),
        options: coordination::RpcClientOptions::default(),
    };

    let result = coordination::try_create_rpc_client(config).await;

    assert!(matches!(
        result,
        Err(coordination::RpcClientCreationError::Connect(_))
    ));
}

#[tokio::test]
async fn calls_after_peer_shutdown_fail_as_transport_errors() -> Result<(), Box<dyn Error>> {
    let (service, client) = start_peer_and_connect("node-b").await?;
    let info = topic_info("orders", 0);
    client.update_topic_info(Epoch::new(1), &info).await?;

    tokio::time::timeout(Duration::from_secs(5), service.shutdown()).await?;

    let error = client.get_last_commit_log_id(&info).await.unwrap_err();
    assert!(error.is_transport(), "Unexpected error: {:?}", error);
    assert!(error.coordination_error().is_none());

    Ok(())
}

#[tokio::test]
async fn second_peer_on_same_address_fails_to_start() -> Result<(), Box<dyn Error>> {
    let (service, _client) = start_peer_and_connect("node-b").await?;

    let result = coordination::try_start_coordinator_service(coordination::CoordinatorServiceConfig {
        node_id: "node-c".to_string(),
        listen_addr: service.listen_addr(),
        info_logger: create_root_logger("node-c"),
    })
    .await;

    assert!(matches!(
        result,
        Err(coordination::CoordinatorServiceCreationError::Bind { .. })
    ));

    service.shutdown().await;
    Ok(())
}

// -- Helpers --

async fn start_peer_and_connect(
    node_id: &str,
) -> Result<(CoordinatorService, CoordinatorRpcClient), Box<dyn Error>> {
    let service = coordination::try_start_coordinator_service(coordination::CoordinatorServiceConfig {
        node_id: node_id.to_string(),
        listen_addr: "127.0.0.1:0".parse()?,
        info_logger: create_root_logger(node_id),
    })
    .await?;

    let client = coordination::try_create_rpc_client(coordination::RpcClientConfig {
        endpoint: PeerEndpoint::new(service.listen_addr().to_string()),
        info_logger: create_root_logger("client"),
        options: coordination::RpcClientOptions::default(),
    })
    .await?;

    Ok((service, client))
}

async fn open_for_writes(
    client: &CoordinatorRpcClient,
    info: &TopicPartitionMetaInfo,
    leader_epoch: u64,
) -> Result<(), RpcCallError> {
    client.update_topic_info(Epoch::new(5), info).await?;
    client
        .notify_topic_leader_session(
            Epoch::new(5),
            info,
            &session(&info.name, info.partition, leader_epoch, "s-open"),
        )
        .await?;
    client.enable_topic_write(Epoch::new(5), info).await
}

fn assert_rejected<T: std::fmt::Debug>(result: Result<T, RpcCallError>, expected: CoordErrorKind) {
    match result {
        Err(RpcCallError::Rejected(e)) => assert_eq!(e.kind(), expected, "{}", e),
        other => panic!("Expected {:?} rejection, got {:?}", expected, other),
    }
}

fn topic_info(name: &str, partition: u32) -> TopicPartitionMetaInfo {
    TopicPartitionMetaInfo {
        name: name.to_string(),
        partition,
        epoch: Epoch::new(1),
        leader: "node-a".into(),
        isr: vec!["node-a".into(), "node-b".into()],
        catchup_list: vec![],
        channels: vec![],
        replica: 2,
    }
}

fn session(topic: &str, partition: u32, leader_epoch: u64, token: &str) -> LeaderSession {
    LeaderSession {
        topic: topic.to_string(),
        partition,
        leader_node: "node-a".into(),
        session: token.to_string(),
        leader_epoch: LeaderEpoch::new(leader_epoch),
    }
}

fn entry(offset: u64, leader_epoch: u64) -> CommitLogEntry {
    CommitLogEntry {
        log_id: LogOffset::new(offset),
        epoch: LeaderEpoch::new(leader_epoch),
        msg_offset: offset * 128,
        msg_size: 128,
        msg_cnt: offset + 1,
        msg_num: 1,
    }
}

fn message(offset: u64) -> Message {
    Message {
        id: MessageId(1000 + offset),
        timestamp: 1_600_000_000_000 + offset as i64,
        attempts: 1,
        body: Bytes::from(format!("order-{}", offset)),
    }
}

/// Logs to stdout, or to a file under `$COORDINATION_TEST_LOG_DIR` when that is set.
fn create_root_logger(node_id: &str) -> slog::Logger {
    match std::env::var("COORDINATION_TEST_LOG_DIR") {
        Ok(directory) => create_root_logger_for_file(directory, node_id.to_string()),
        Err(_) => create_root_logger_for_stdout(node_id.to_string()),
    }
}

fn create_root_logger_for_file(directory: String, node_id: String) -> slog::Logger {
    let now = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
    let log_path = format!("{}/{}_{}_info.log", directory, node_id, now);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .unwrap();

    let decorator = slog_term::PlainDecorator::new(file);
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("NodeId" => node_id))
}

fn create_root_logger_for_stdout(node_id: String) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("NodeId" => node_id))
}
