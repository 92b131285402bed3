use crate::api::{
    CommitLogBatch, CommitLogEntry, CoordErrorKind, CoordinationError, LeaderSession, TopicStats,
};
use crate::commitlog;
use crate::commitlog::{LogConfig, LogFactory, LogOffset};
use crate::coordinator::coordinator_api::{
    ChannelOffsetInput, LeaderSessionInput, PartitionKey, PullCommitLogsInput, PutMessagesInput, TopicInfoInput,
};
use crate::coordinator::log_record::PartitionLogRecord;
use crate::coordinator::partition::PartitionState;
use std::collections::BTreeMap;

/// LocalCoordinator is this node's side of the coordination protocol: it owns the state of every
/// partition the node replicates and applies (or rejects) coordination requests against it.
///
/// Not thread safe. All access is expected to be serialized, see `CoordinatorActor`.
pub(crate) struct LocalCoordinator<L, F>
where
    L: commitlog::Log<PartitionLogRecord>,
    F: LogFactory<PartitionLogRecord, L>,
{
    logger: slog::Logger,
    node_id: String,
    log_factory: F,
    partitions: BTreeMap<PartitionKey, PartitionState<L>>,
}

impl<L, F> LocalCoordinator<L, F>
where
    L: commitlog::Log<PartitionLogRecord>,
    F: LogFactory<PartitionLogRecord, L>,
{
    pub(crate) fn new(logger: slog::Logger, node_id: String, log_factory: F) -> Self {
        LocalCoordinator {
            logger,
            node_id,
            log_factory,
            partitions: BTreeMap::new(),
        }
    }

    pub(crate) fn handle_update_topic_info(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        validate_topic_info(&input)?;
        let key = PartitionKey::from(&input.topic_info);

        if let Some(partition) = self.partitions.get_mut(&key) {
            return partition.handle_update_topic_info(input);
        }

        let log_config = LogConfig {
            topic: key.topic.clone(),
            partition: key.partition,
        };
        let log = self.log_factory.try_create_log(&log_config).map_err(|e| {
            CoordinationError::new(
                CoordErrorKind::LocalFailure,
                format!(
                    "Failed to create commit log for {}-{}: {}",
                    log_config.topic, log_config.partition, e
                ),
            )
        })?;

        let logger = self
            .logger
            .new(slog::o!("Topic" => key.topic.clone(), "Partition" => key.partition));
        slog::info!(logger, "New partition at epoch {}", input.epoch);

        let partition = PartitionState::new(logger, self.node_id.clone(), input, log);
        self.partitions.insert(key, partition);
        Ok(())
    }

    pub(crate) fn handle_notify_leader_session(&mut self, input: LeaderSessionInput) -> Result<(), CoordinationError> {
        let key = PartitionKey::from(&input.topic_info);
        self.partition_mut(&key)?
            .handle_notify_leader_session(input)
    }

    pub(crate) fn handle_enable_topic_write(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        let key = PartitionKey::from(&input.topic_info);
        self.partition_mut(&key)?.handle_set_write_enabled(input, true)
    }

    pub(crate) fn handle_disable_topic_write(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        let key = PartitionKey::from(&input.topic_info);
        self.partition_mut(&key)?.handle_set_write_enabled(input, false)
    }

    pub(crate) fn handle_update_catchup_for_topic(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        let key = PartitionKey::from(&input.topic_info);
        self.partition_mut(&key)?.handle_update_catchup(input)
    }

    pub(crate) fn handle_update_channels_for_topic(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        let key = PartitionKey::from(&input.topic_info);
        self.partition_mut(&key)?.handle_update_channels(input)
    }

    pub(crate) fn handle_update_channel_offset(&mut self, input: ChannelOffsetInput) -> Result<(), CoordinationError> {
        let key = input.key.clone();
        self.partition_mut(&key)?.handle_update_channel_offset(input)
    }

    pub(crate) fn handle_put_messages(&mut self, input: PutMessagesInput) -> Result<(), CoordinationError> {
        let key = input.key.clone();
        self.partition_mut(&key)?.handle_put_messages(input)
    }

    pub(crate) fn handle_get_topic_stats(&self, topic: &str) -> Result<TopicStats, CoordinationError> {
        let partitions: Vec<_> = self
            .partitions
            .iter()
            .filter(|(key, _)| key.topic == topic)
            .map(|(_, partition)| partition.stats())
            .collect();

        if partitions.is_empty() {
            return Err(topic_not_found(topic));
        }

        Ok(TopicStats {
            node_id: self.node_id.clone(),
            topic: topic.to_string(),
            partitions,
        })
    }

    pub(crate) fn handle_get_last_commit_log_id(
        &self,
        key: &PartitionKey,
    ) -> Result<Option<LogOffset>, CoordinationError> {
        Ok(self.partition(key)?.last_commit_log_id())
    }

    pub(crate) fn handle_get_commit_log_from_offset(
        &self,
        key: &PartitionKey,
        offset: LogOffset,
    ) -> Result<CommitLogEntry, CoordinationError> {
        self.partition(key)?.commit_log_at(offset)
    }

    pub(crate) fn handle_pull_commit_logs(
        &self,
        input: PullCommitLogsInput,
    ) -> Result<CommitLogBatch, CoordinationError> {
        self.partition(&input.key)?
            .pull_commit_logs(input.start_offset, input.max_entries)
    }

    pub(crate) fn leader_session(&self, key: &PartitionKey) -> Option<LeaderSession> {
        self.partitions.get(key).and_then(|p| p.leader_session())
    }

    pub(crate) fn clean_commit_log_before(
        &mut self,
        key: &PartitionKey,
        offset: LogOffset,
    ) -> Result<(), CoordinationError> {
        self.partition_mut(key)?.clean_commit_log_before(offset);
        Ok(())
    }

    fn partition(&self, key: &PartitionKey) -> Result<&PartitionState<L>, CoordinationError> {
        self.partitions
            .get(key)
            .ok_or_else(|| topic_not_found(&format!("{:?}", key)))
    }

    fn partition_mut(&mut self, key: &PartitionKey) -> Result<&mut PartitionState<L>, CoordinationError> {
        self.partitions
            .get_mut(key)
            .ok_or_else(|| topic_not_found(&format!("{:?}", key)))
    }
}

fn validate_topic_info(input: &TopicInfoInput) -> Result<(), CoordinationError> {
    if input.topic_info.name.is_empty() {
        return Err(CoordinationError::new(
            CoordErrorKind::InvalidRequest,
            "Topic name must not be empty",
        ));
    }
    Ok(())
}

fn topic_not_found(name: &str) -> CoordinationError {
    CoordinationError::new(CoordErrorKind::TopicNotFound, format!("{} is not known to this node", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ConsumerChannelOffset, Epoch, LeaderEpoch, Message, MessageId, TopicPartitionMetaInfo};
    use crate::commitlog::{InMemoryLog, InMemoryLogFactory};
    use crate::transport::test_utils::test_logger;
    use bytes::Bytes;

    type TestCoordinator = LocalCoordinator<InMemoryLog<PartitionLogRecord>, InMemoryLogFactory>;

    fn coordinator() -> TestCoordinator {
        LocalCoordinator::new(test_logger(), "node-b".into(), InMemoryLogFactory::new())
    }

    fn key() -> PartitionKey {
        PartitionKey::new("orders", 0)
    }

    fn info(topic_epoch: u64) -> TopicPartitionMetaInfo {
        TopicPartitionMetaInfo {
            name: "orders".into(),
            partition: 0,
            epoch: Epoch::new(topic_epoch),
            leader: "node-a".into(),
            isr: vec!["node-a".into(), "node-b".into()],
            catchup_list: vec![],
            channels: vec!["billing".into()],
            replica: 2,
        }
    }

    fn topic_input(epoch: u64) -> TopicInfoInput {
        TopicInfoInput {
            epoch: Epoch::new(epoch),
            topic_info: info(1),
        }
    }

    fn session(leader_epoch: u64, token: &str) -> LeaderSession {
        LeaderSession {
            topic: "orders".into(),
            partition: 0,
            leader_node: "node-a".into(),
            session: token.into(),
            leader_epoch: LeaderEpoch::new(leader_epoch),
        }
    }

    fn notify(epoch: u64, leader_epoch: u64, token: &str) -> LeaderSessionInput {
        LeaderSessionInput {
            epoch: Epoch::new(epoch),
            topic_info: info(1),
            leader_session: session(leader_epoch, token),
        }
    }

    fn entry(offset: u64, leader_epoch: u64) -> CommitLogEntry {
        CommitLogEntry {
            log_id: LogOffset::new(offset),
            epoch: LeaderEpoch::new(leader_epoch),
            msg_offset: offset * 64,
            msg_size: 64,
            msg_cnt: offset + 1,
            msg_num: 1,
        }
    }

    fn message(offset: u64) -> Message {
        Message {
            id: MessageId(offset),
            timestamp: 1_600_000_000_000 + offset as i64,
            attempts: 1,
            body: Bytes::from(format!("message-{}", offset)),
        }
    }

    fn put(offsets: std::ops::Range<u64>, leader_epoch: u64) -> PutMessagesInput {
        PutMessagesInput {
            key: key(),
            topic_epoch: Epoch::new(1),
            leader_epoch: LeaderEpoch::new(leader_epoch),
            entries: offsets.clone().map(|o| entry(o, leader_epoch)).collect(),
            messages: offsets.map(message).collect(),
        }
    }

    /// A partition at epoch 5 that accepted leader epoch 3 and is open for writes.
    fn writable() -> TestCoordinator {
        let mut coordinator = coordinator();
        coordinator.handle_update_topic_info(topic_input(5)).unwrap();
        coordinator.handle_notify_leader_session(notify(5, 3, "s-3")).unwrap();
        coordinator.handle_enable_topic_write(topic_input(5)).unwrap();
        coordinator
    }

    fn kind<T: std::fmt::Debug>(result: Result<T, CoordinationError>) -> CoordErrorKind {
        result.unwrap_err().kind()
    }

    #[test]
    fn unknown_partition_is_topic_not_found() {
        let mut coordinator = coordinator();

        assert_eq!(
            kind(coordinator.handle_notify_leader_session(notify(5, 3, "s-3"))),
            CoordErrorKind::TopicNotFound
        );
        assert_eq!(
            kind(coordinator.handle_enable_topic_write(topic_input(5))),
            CoordErrorKind::TopicNotFound
        );
        assert_eq!(
            kind(coordinator.handle_get_topic_stats("orders")),
            CoordErrorKind::TopicNotFound
        );
    }

    #[test]
    fn stale_leader_epoch_is_rejected_and_accepted_term_kept() {
        let mut coordinator = coordinator();
        coordinator.handle_update_topic_info(topic_input(5)).unwrap();
        coordinator.handle_notify_leader_session(notify(5, 3, "s-3")).unwrap();

        let result = coordinator.handle_notify_leader_session(notify(5, 2, "s-2"));

        let error = result.unwrap_err();
        assert_eq!(error.kind(), CoordErrorKind::StaleLeaderEpoch);
        assert!(error.requires_metadata_refresh());
        assert_eq!(coordinator.leader_session(&key()), Some(session(3, "s-3")));
    }

    #[test]
    fn stale_epoch_leaves_no_trace() {
        let mut coordinator = coordinator();
        coordinator.handle_update_topic_info(topic_input(5)).unwrap();
        coordinator.handle_notify_leader_session(notify(5, 3, "s-3")).unwrap();

        // Newer leader epoch, but from a coordinator with a stale epoch.
        assert_eq!(
            kind(coordinator.handle_notify_leader_session(notify(4, 4, "s-4"))),
            CoordErrorKind::StaleEpoch
        );
        assert_eq!(coordinator.leader_session(&key()), Some(session(3, "s-3")));

        assert_eq!(
            kind(coordinator.handle_update_topic_info(topic_input(4))),
            CoordErrorKind::StaleEpoch
        );
    }

    struct RefusingLogFactory;

    impl LogFactory<PartitionLogRecord, InMemoryLog<PartitionLogRecord>> for RefusingLogFactory {
        fn try_create_log(&self, _: &LogConfig) -> Result<InMemoryLog<PartitionLogRecord>, std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn log_creation_failure_names_the_partition() {
        let mut coordinator = LocalCoordinator::new(test_logger(), "node-b".into(), RefusingLogFactory);

        let error = coordinator.handle_update_topic_info(topic_input(5)).unwrap_err();

        assert_eq!(error.kind(), CoordErrorKind::LocalFailure);
        assert_eq!(error.message, "Failed to create commit log for orders-0: disk full");
        assert!(coordinator.handle_get_topic_stats("orders").is_err());
    }

    #[test]
    fn stale_epoch_admin_calls_change_nothing() {
        let mut coordinator = writable();
        coordinator.handle_update_channels_for_topic(topic_input(5)).unwrap();
        let before = coordinator.handle_get_topic_stats("orders").unwrap();

        assert_eq!(
            kind(coordinator.handle_disable_topic_write(topic_input(4))),
            CoordErrorKind::StaleEpoch
        );

        let mut catchup = topic_input(4);
        catchup.topic_info.catchup_list = vec!["node-b".into()];
        assert_eq!(
            kind(coordinator.handle_update_catchup_for_topic(catchup)),
            CoordErrorKind::StaleEpoch
        );

        let mut channels = topic_input(4);
        channels.topic_info.channels = vec!["audit".into()];
        assert_eq!(
            kind(coordinator.handle_update_channels_for_topic(channels)),
            CoordErrorKind::StaleEpoch
        );

        // Current coordinator epoch, but topic metadata older than what was accepted.
        let mut old_topic = topic_input(5);
        old_topic.topic_info.epoch = Epoch::new(0);
        old_topic.topic_info.catchup_list = vec!["node-b".into()];
        assert_eq!(
            kind(coordinator.handle_update_catchup_for_topic(old_topic)),
            CoordErrorKind::StaleEpoch
        );

        let after = coordinator.handle_get_topic_stats("orders").unwrap();
        assert_eq!(after, before);
        assert!(after.partitions[0].write_enabled);
        assert!(!after.partitions[0].catchup);
        assert_eq!(after.partitions[0].channels, vec![("billing".to_string(), 0)]);
    }

    #[test]
    fn stale_epoch_cannot_open_writes() {
        let mut coordinator = coordinator();
        coordinator.handle_update_topic_info(topic_input(5)).unwrap();
        coordinator.handle_notify_leader_session(notify(5, 3, "s-3")).unwrap();

        assert_eq!(
            kind(coordinator.handle_enable_topic_write(topic_input(4))),
            CoordErrorKind::StaleEpoch
        );

        let stats = coordinator.handle_get_topic_stats("orders").unwrap();
        assert!(!stats.partitions[0].write_enabled);
        assert_eq!(
            kind(coordinator.handle_put_messages(put(0..1, 3))),
            CoordErrorKind::WriteDisabled
        );
    }

    #[test]
    fn channel_offset_from_old_leader_is_rejected() {
        let mut coordinator = writable();
        coordinator.handle_update_channels_for_topic(topic_input(5)).unwrap();

        let offset = |leader_epoch| ChannelOffsetInput {
            key: key(),
            topic_epoch: Epoch::new(1),
            leader_epoch: LeaderEpoch::new(leader_epoch),
            channel: "billing".into(),
            offset: ConsumerChannelOffset {
                virtual_offset: 700,
                flush: true,
                allow_backward: false,
            },
        };

        assert_eq!(
            kind(coordinator.handle_update_channel_offset(offset(2))),
            CoordErrorKind::StaleLeaderEpoch
        );
        let stats = coordinator.handle_get_topic_stats("orders").unwrap();
        assert_eq!(stats.partitions[0].channels, vec![("billing".to_string(), 0)]);

        coordinator.handle_update_channel_offset(offset(3)).unwrap();
        let stats = coordinator.handle_get_topic_stats("orders").unwrap();
        assert_eq!(stats.partitions[0].channels, vec![("billing".to_string(), 700)]);
    }

    #[test]
    fn leader_session_is_idempotent_and_moves_forward() {
        let mut coordinator = coordinator();
        coordinator.handle_update_topic_info(topic_input(5)).unwrap();

        coordinator.handle_notify_leader_session(notify(5, 3, "s-3")).unwrap();
        coordinator.handle_notify_leader_session(notify(5, 3, "s-3")).unwrap();
        assert_eq!(
            kind(coordinator.handle_notify_leader_session(notify(5, 3, "s-imposter"))),
            CoordErrorKind::LeaderSessionMismatch
        );

        coordinator.handle_notify_leader_session(notify(6, 4, "s-4")).unwrap();
        assert_eq!(coordinator.leader_session(&key()), Some(session(4, "s-4")));
    }

    #[test]
    fn writes_start_disabled() {
        let mut coordinator = coordinator();
        coordinator.handle_update_topic_info(topic_input(5)).unwrap();
        coordinator.handle_notify_leader_session(notify(5, 3, "s-3")).unwrap();

        assert_eq!(
            kind(coordinator.handle_put_messages(put(0..1, 3))),
            CoordErrorKind::WriteDisabled
        );

        coordinator.handle_enable_topic_write(topic_input(5)).unwrap();
        coordinator.handle_put_messages(put(0..1, 3)).unwrap();

        coordinator.handle_disable_topic_write(topic_input(5)).unwrap();
        assert_eq!(
            kind(coordinator.handle_put_messages(put(1..2, 3))),
            CoordErrorKind::WriteDisabled
        );
    }

    #[test]
    fn writer_leader_epoch_is_fenced() {
        let mut coordinator = writable();

        assert_eq!(
            kind(coordinator.handle_put_messages(put(0..1, 2))),
            CoordErrorKind::StaleLeaderEpoch
        );
        assert_eq!(
            kind(coordinator.handle_put_messages(put(0..1, 4))),
            CoordErrorKind::LeaderEpochMismatch
        );
        coordinator.handle_put_messages(put(0..1, 3)).unwrap();
    }

    #[test]
    fn puts_must_land_at_log_tail() {
        let mut coordinator = writable();
        coordinator.handle_put_messages(put(0..3, 3)).unwrap();

        // Duplicate.
        assert_eq!(
            kind(coordinator.handle_put_messages(put(2..3, 3))),
            CoordErrorKind::CommitLogMismatch
        );
        // Gap.
        assert_eq!(
            kind(coordinator.handle_put_messages(put(4..5, 3))),
            CoordErrorKind::CommitLogMismatch
        );
        assert_eq!(
            coordinator.handle_get_last_commit_log_id(&key()).unwrap(),
            Some(LogOffset::new(2))
        );
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let mut coordinator = writable();
        coordinator.handle_put_messages(put(0..2, 3)).unwrap();

        // Third entry breaks contiguity; nothing from the batch may land.
        let mut batch = put(2..5, 3);
        batch.entries[2].log_id = LogOffset::new(9);
        assert_eq!(
            kind(coordinator.handle_put_messages(batch)),
            CoordErrorKind::CommitLogMismatch
        );

        let mut batch = put(2..5, 3);
        batch.messages.pop();
        assert_eq!(
            kind(coordinator.handle_put_messages(batch)),
            CoordErrorKind::InvalidRequest
        );

        assert_eq!(
            coordinator.handle_get_last_commit_log_id(&key()).unwrap(),
            Some(LogOffset::new(1))
        );
        coordinator.handle_put_messages(put(2..5, 3)).unwrap();
        assert_eq!(
            coordinator.handle_get_last_commit_log_id(&key()).unwrap(),
            Some(LogOffset::new(4))
        );
    }

    #[test]
    fn offset_lookup_round_trips_in_range_only() {
        let mut coordinator = writable();
        assert_eq!(coordinator.handle_get_last_commit_log_id(&key()).unwrap(), None);

        coordinator.handle_put_messages(put(0..10, 3)).unwrap();
        coordinator.clean_commit_log_before(&key(), LogOffset::new(4)).unwrap();

        let found = coordinator
            .handle_get_commit_log_from_offset(&key(), LogOffset::new(6))
            .unwrap();
        assert_eq!(found, entry(6, 3));

        assert_eq!(
            kind(coordinator.handle_get_commit_log_from_offset(&key(), LogOffset::new(3))),
            CoordErrorKind::CommitLogOutOfRange
        );
        assert_eq!(
            kind(coordinator.handle_get_commit_log_from_offset(&key(), LogOffset::new(10))),
            CoordErrorKind::CommitLogOutOfRange
        );
    }

    #[test]
    fn pull_from_retained_window() {
        let mut coordinator = writable();
        coordinator.handle_put_messages(put(0..200, 3)).unwrap();
        coordinator.clean_commit_log_before(&key(), LogOffset::new(80)).unwrap();

        let batch = coordinator
            .handle_pull_commit_logs(PullCommitLogsInput {
                key: key(),
                start_offset: LogOffset::new(100),
                max_entries: 50,
            })
            .unwrap();

        assert_eq!(batch.start_offset, LogOffset::new(100));
        assert_eq!(batch.entries.len(), 50);
        assert_eq!(batch.payloads.len(), 50);
        for (i, entry) in batch.entries.iter().enumerate() {
            assert_eq!(entry.log_id, LogOffset::new(100 + i as u64));
        }
        assert_eq!(Message::decode_payload(&batch.payloads[0]).unwrap(), message(100));

        // Consecutive pulls pick up exactly where the last one stopped.
        let next = coordinator
            .handle_pull_commit_logs(PullCommitLogsInput {
                key: key(),
                start_offset: batch.next_offset(),
                max_entries: 500,
            })
            .unwrap();
        assert_eq!(next.entries.first().map(|e| e.log_id), Some(LogOffset::new(150)));
        assert_eq!(next.next_offset(), LogOffset::new(200));

        let at_tail = coordinator
            .handle_pull_commit_logs(PullCommitLogsInput {
                key: key(),
                start_offset: LogOffset::new(200),
                max_entries: 10,
            })
            .unwrap();
        assert!(at_tail.is_empty());

        for start in [79, 201].iter() {
            let result = coordinator.handle_pull_commit_logs(PullCommitLogsInput {
                key: key(),
                start_offset: LogOffset::new(*start),
                max_entries: 10,
            });
            assert_eq!(kind(result), CoordErrorKind::CommitLogOutOfRange);
        }
    }

    #[test]
    fn channel_offsets_and_membership() {
        let mut coordinator = writable();

        let offset = |virtual_offset, allow_backward| ChannelOffsetInput {
            key: key(),
            topic_epoch: Epoch::new(1),
            leader_epoch: LeaderEpoch::new(3),
            channel: "billing".into(),
            offset: ConsumerChannelOffset {
                virtual_offset,
                flush: false,
                allow_backward,
            },
        };

        coordinator.handle_update_channel_offset(offset(500, false)).unwrap();
        assert_eq!(
            kind(coordinator.handle_update_channel_offset(offset(400, false))),
            CoordErrorKind::InvalidRequest
        );
        coordinator.handle_update_channel_offset(offset(400, true)).unwrap();

        let stats = coordinator.handle_get_topic_stats("orders").unwrap();
        assert_eq!(stats.partitions[0].channels, vec![("billing".to_string(), 400)]);

        let mut input = topic_input(5);
        input.topic_info.channels = vec!["audit".into()];
        coordinator.handle_update_channels_for_topic(input).unwrap();

        let stats = coordinator.handle_get_topic_stats("orders").unwrap();
        assert_eq!(stats.partitions[0].channels, vec![("audit".to_string(), 0)]);
    }

    #[test]
    fn catchup_follows_catchup_list() {
        let mut coordinator = coordinator();
        coordinator.handle_update_topic_info(topic_input(5)).unwrap();

        let mut input = topic_input(6);
        input.topic_info.catchup_list = vec!["node-b".into()];
        coordinator.handle_update_catchup_for_topic(input).unwrap();

        let stats = coordinator.handle_get_topic_stats("orders").unwrap();
        assert!(stats.partitions[0].catchup);
        assert_eq!(stats.node_id, "node-b");
        assert!(!stats.partitions[0].write_enabled);
    }
}
