use crate::api::{
    CommitLogBatch, CommitLogEntry, ConsumerChannelOffset, CoordErrorKind, CoordinationError, LeaderSession,
    PartitionStats, TopicPartitionMetaInfo,
};
use crate::commitlog;
use crate::commitlog::LogOffset;
use crate::coordinator::coordinator_api::{ChannelOffsetInput, LeaderSessionInput, PutMessagesInput, TopicInfoInput};
use crate::coordinator::fence::{EpochFence, SessionChange};
use crate::coordinator::log_record::PartitionLogRecord;
use crate::coordinator::partition_log::PartitionCommitLog;
use std::collections::BTreeMap;
use std::io;

/// PartitionState is everything one node knows about one topic partition it replicates.
pub(super) struct PartitionState<L>
where
    L: commitlog::Log<PartitionLogRecord>,
{
    logger: slog::Logger,
    node_id: String,

    // Latest accepted view of the partition.
    info: TopicPartitionMetaInfo,
    fence: EpochFence,
    // Gated off until explicitly enabled by the coordinator.
    write_enabled: bool,
    catchup: bool,
    channels: BTreeMap<String, ConsumerChannelOffset>,
    commit_log: PartitionCommitLog<L>,
}

impl<L> PartitionState<L>
where
    L: commitlog::Log<PartitionLogRecord>,
{
    pub(super) fn new(logger: slog::Logger, node_id: String, input: TopicInfoInput, log: L) -> Self {
        let commit_log = PartitionCommitLog::new(logger.clone(), log);

        let mut partition = PartitionState {
            logger,
            node_id,
            info: TopicPartitionMetaInfo::default(),
            fence: EpochFence::new(),
            write_enabled: false,
            catchup: false,
            channels: BTreeMap::new(),
            commit_log,
        };
        partition.sync_channels(&input.topic_info.channels);
        partition.accept_topic_info(input);

        partition
    }

    // -- Admin plane --

    pub(super) fn handle_update_topic_info(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.fence
            .check_admin_epochs(input.epoch, input.topic_info.epoch)?;
        self.accept_topic_info(input);
        Ok(())
    }

    pub(super) fn handle_notify_leader_session(&mut self, input: LeaderSessionInput) -> Result<(), CoordinationError> {
        let session = &input.leader_session;
        if session.topic != input.topic_info.name || session.partition != input.topic_info.partition {
            return Err(CoordinationError::new(
                CoordErrorKind::InvalidRequest,
                format!(
                    "Leader session is for {}-{}, not {}-{}",
                    session.topic, session.partition, input.topic_info.name, input.topic_info.partition
                ),
            ));
        }

        self.fence
            .check_admin_epochs(input.epoch, input.topic_info.epoch)?;
        let change = self.fence.check_leader_session(session)?;

        let LeaderSessionInput {
            epoch,
            topic_info,
            leader_session,
        } = input;
        if change == SessionChange::NewTerm {
            slog::info!(
                self.logger,
                "Leader session accepted: {} at leader epoch {} (session {})",
                leader_session.leader_node,
                leader_session.leader_epoch,
                leader_session.session
            );
            self.fence.store_leader_session_if_newer(leader_session);
        }
        self.accept_topic_info(TopicInfoInput { epoch, topic_info });

        Ok(())
    }

    pub(super) fn handle_set_write_enabled(
        &mut self,
        input: TopicInfoInput,
        enabled: bool,
    ) -> Result<(), CoordinationError> {
        self.fence
            .check_admin_epochs(input.epoch, input.topic_info.epoch)?;
        self.accept_topic_info(input);

        if self.write_enabled != enabled {
            slog::info!(self.logger, "Write enabled: {} -> {}", self.write_enabled, enabled);
            self.write_enabled = enabled;
        }
        Ok(())
    }

    pub(super) fn handle_update_catchup(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.fence
            .check_admin_epochs(input.epoch, input.topic_info.epoch)?;
        self.accept_topic_info(input);

        if self.catchup {
            slog::info!(
                self.logger,
                "Registered for catch-up from log offset {:?}",
                self.commit_log.next_offset()
            );
        }
        Ok(())
    }

    pub(super) fn handle_update_channels(&mut self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.fence
            .check_admin_epochs(input.epoch, input.topic_info.epoch)?;
        self.sync_channels(&input.topic_info.channels);
        self.accept_topic_info(input);
        Ok(())
    }

    // -- Data plane --

    pub(super) fn handle_update_channel_offset(&mut self, input: ChannelOffsetInput) -> Result<(), CoordinationError> {
        self.fence.check_topic_epoch(input.topic_epoch)?;
        self.fence.check_writer(input.leader_epoch)?;

        let current = self.channels.get(&input.channel).map(|o| o.virtual_offset);
        if let Some(current) = current {
            if input.offset.virtual_offset < current && !input.offset.allow_backward {
                return Err(CoordinationError::new(
                    CoordErrorKind::InvalidRequest,
                    format!(
                        "Channel {} offset {} would move back from {}",
                        input.channel, input.offset.virtual_offset, current
                    ),
                ));
            }
        }

        slog::debug!(
            self.logger,
            "Channel {} offset {:?} -> {}",
            input.channel,
            current,
            input.offset.virtual_offset
        );
        self.channels.insert(input.channel, input.offset);
        Ok(())
    }

    pub(super) fn handle_put_messages(&mut self, input: PutMessagesInput) -> Result<(), CoordinationError> {
        self.fence.check_topic_epoch(input.topic_epoch)?;
        self.fence.check_writer(input.leader_epoch)?;

        if !self.write_enabled {
            return Err(CoordinationError::new(
                CoordErrorKind::WriteDisabled,
                "Writes are disabled for this partition",
            ));
        }
        if input.entries.is_empty() {
            return Err(CoordinationError::new(CoordErrorKind::InvalidRequest, "Empty batch"));
        }
        if input.entries.len() != input.messages.len() {
            return Err(CoordinationError::new(
                CoordErrorKind::InvalidRequest,
                format!(
                    "{} commit log entries but {} messages",
                    input.entries.len(),
                    input.messages.len()
                ),
            ));
        }

        // Validate the whole batch before anything touches the log.
        let next_offset = self.commit_log.next_offset();
        for (i, entry) in input.entries.iter().enumerate() {
            let expected = next_offset.plus(i as u64);
            if entry.log_id != expected {
                return Err(CoordinationError::new(
                    CoordErrorKind::CommitLogMismatch,
                    format!("Expected log id {}, got {}", expected, entry.log_id),
                ));
            }
            if entry.epoch > input.leader_epoch {
                return Err(CoordinationError::new(
                    CoordErrorKind::InvalidRequest,
                    format!(
                        "Entry {} claims leader epoch {}, writer is at {}",
                        entry.log_id, entry.epoch, input.leader_epoch
                    ),
                ));
            }
        }

        let records = input
            .entries
            .into_iter()
            .zip(input.messages.iter())
            .map(|(entry, message)| PartitionLogRecord {
                entry,
                payload: message.encode_payload(),
            })
            .collect();

        self.commit_log.append_all(records).map_err(local_failure)?;

        slog::debug!(self.logger, "Log appended up to {:?}", self.commit_log.last_offset());
        Ok(())
    }

    // -- Read only --

    pub(super) fn last_commit_log_id(&self) -> Option<LogOffset> {
        self.commit_log.last_offset()
    }

    pub(super) fn commit_log_at(&self, offset: LogOffset) -> Result<CommitLogEntry, CoordinationError> {
        if !self.commit_log.contains(offset) {
            return Err(self.out_of_range(offset));
        }

        match self.commit_log.read_entry(offset).map_err(local_failure)? {
            Some(entry) => Ok(entry),
            None => Err(self.out_of_range(offset)),
        }
    }

    pub(super) fn pull_commit_logs(
        &self,
        start: LogOffset,
        max_entries: u32,
    ) -> Result<CommitLogBatch, CoordinationError> {
        if start < self.commit_log.first_offset() || start > self.commit_log.next_offset() {
            return Err(self.out_of_range(start));
        }

        let records = self
            .commit_log
            .read_from(start, max_entries as u64)
            .map_err(local_failure)?;

        let mut entries = Vec::with_capacity(records.len());
        let mut payloads = Vec::with_capacity(records.len());
        for record in records {
            entries.push(record.entry);
            payloads.push(record.payload);
        }

        Ok(CommitLogBatch {
            start_offset: start,
            entries,
            payloads,
        })
    }

    pub(super) fn leader_session(&self) -> Option<LeaderSession> {
        self.fence.leader_session().cloned()
    }

    pub(super) fn stats(&self) -> PartitionStats {
        PartitionStats {
            partition: self.info.partition,
            topic_epoch: self.fence.topic_epoch(),
            leader_epoch: self.fence.leader_epoch(),
            write_enabled: self.write_enabled,
            catchup: self.catchup,
            first_log_offset: self.commit_log.first_offset(),
            next_log_offset: self.commit_log.next_offset(),
            channels: self
                .channels
                .iter()
                .map(|(name, offset)| (name.clone(), offset.virtual_offset))
                .collect(),
        }
    }

    /// Retention: drops commit log entries before `offset`.
    pub(super) fn clean_commit_log_before(&mut self, offset: LogOffset) {
        slog::info!(
            self.logger,
            "Cleaning commit log before {:?} (retained from {:?})",
            offset,
            self.commit_log.first_offset()
        );
        self.commit_log.trim_front(offset);
    }

    fn accept_topic_info(&mut self, input: TopicInfoInput) {
        if self.fence
            .store_admin_epochs_if_increased(input.epoch, input.topic_info.epoch)
        {
            slog::info!(
                self.logger,
                "Accepted epoch {:?}, topic epoch {:?}",
                self.fence.epoch(),
                self.fence.topic_epoch()
            );
        }
        self.catchup = input.topic_info.catchup_list.contains(&self.node_id);
        self.info = input.topic_info;
    }

    fn sync_channels(&mut self, channels: &[String]) {
        self.channels.retain(|name, _| channels.contains(name));
        for name in channels {
            if !self.channels.contains_key(name) {
                slog::info!(self.logger, "Channel {} added", name);
                self.channels.insert(name.clone(), ConsumerChannelOffset::default());
            }
        }
    }

    fn out_of_range(&self, offset: LogOffset) -> CoordinationError {
        CoordinationError::new(
            CoordErrorKind::CommitLogOutOfRange,
            format!(
                "Log offset {} not in [{}, {})",
                offset,
                self.commit_log.first_offset(),
                self.commit_log.next_offset()
            ),
        )
    }
}

fn local_failure(e: io::Error) -> CoordinationError {
    CoordinationError::new(CoordErrorKind::LocalFailure, format!("Commit log failure: {}", e))
}
