use crate::api::{CommitLogBatch, CommitLogEntry, CoordErrorKind, CoordinationError, LeaderSession, TopicStats};
use crate::commitlog;
use crate::commitlog::{LogFactory, LogOffset};
use crate::coordinator::{
    ChannelOffsetInput, LeaderSessionInput, LocalCoordinator, PartitionKey, PartitionLogRecord, PullCommitLogsInput,
    PutMessagesInput, TopicInfoInput,
};
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};

pub(crate) fn create<L, F>(
    logger: slog::Logger,
    buffer_size: usize,
    coordinator: LocalCoordinator<L, F>,
) -> (ActorClient, CoordinatorActor<L, F>)
where
    L: commitlog::Log<PartitionLogRecord>,
    F: LogFactory<PartitionLogRecord, L>,
{
    let (tx, rx) = mpsc::channel(buffer_size);
    let client = ActorClient { sender: tx };
    let actor = CoordinatorActor {
        logger,
        receiver: rx,
        coordinator,
    };

    (client, actor)
}

// Every request for any partition on this node goes through the one actor, so the fencing check
// and the mutation it guards can't interleave with another request.
#[derive(Debug)]
enum Event {
    // Admin plane
    UpdateTopicInfo(TopicInfoInput, Callback<()>),
    NotifyLeaderSession(LeaderSessionInput, Callback<()>),
    EnableTopicWrite(TopicInfoInput, Callback<()>),
    DisableTopicWrite(TopicInfoInput, Callback<()>),
    UpdateCatchupForTopic(TopicInfoInput, Callback<()>),
    UpdateChannelsForTopic(TopicInfoInput, Callback<()>),

    // Data plane
    UpdateChannelOffset(ChannelOffsetInput, Callback<()>),
    PutMessages(PutMessagesInput, Callback<()>),

    // Read only
    GetTopicStats(String, Callback<TopicStats>),
    GetLastCommitLogId(PartitionKey, Callback<Option<LogOffset>>),
    GetCommitLogFromOffset(PartitionKey, LogOffset, Callback<CommitLogEntry>),
    PullCommitLogs(PullCommitLogsInput, Callback<CommitLogBatch>),

    // Local only
    LeaderSession(PartitionKey, oneshot::Sender<Option<LeaderSession>>),
    CleanCommitLogBefore(PartitionKey, LogOffset, Callback<()>),
}

#[derive(Debug)]
struct Callback<O: Debug>(oneshot::Sender<Result<O, CoordinationError>>);

impl<O: Debug> Callback<O> {
    pub fn send(self, message: Result<O, CoordinationError>) {
        let _ = self.0.send(message);
    }
}

#[derive(Clone)]
pub(crate) struct ActorClient {
    sender: mpsc::Sender<Event>,
}

impl ActorClient {
    pub(crate) async fn update_topic_info(&self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::UpdateTopicInfo(input, cb)).await
    }

    pub(crate) async fn notify_leader_session(&self, input: LeaderSessionInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::NotifyLeaderSession(input, cb)).await
    }

    pub(crate) async fn enable_topic_write(&self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::EnableTopicWrite(input, cb)).await
    }

    pub(crate) async fn disable_topic_write(&self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::DisableTopicWrite(input, cb)).await
    }

    pub(crate) async fn update_catchup_for_topic(&self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::UpdateCatchupForTopic(input, cb)).await
    }

    pub(crate) async fn update_channels_for_topic(&self, input: TopicInfoInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::UpdateChannelsForTopic(input, cb)).await
    }

    pub(crate) async fn update_channel_offset(&self, input: ChannelOffsetInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::UpdateChannelOffset(input, cb)).await
    }

    pub(crate) async fn put_messages(&self, input: PutMessagesInput) -> Result<(), CoordinationError> {
        self.request(|cb| Event::PutMessages(input, cb)).await
    }

    pub(crate) async fn get_topic_stats(&self, topic: String) -> Result<TopicStats, CoordinationError> {
        self.request(|cb| Event::GetTopicStats(topic, cb)).await
    }

    pub(crate) async fn get_last_commit_log_id(
        &self,
        key: PartitionKey,
    ) -> Result<Option<LogOffset>, CoordinationError> {
        self.request(|cb| Event::GetLastCommitLogId(key, cb)).await
    }

    pub(crate) async fn get_commit_log_from_offset(
        &self,
        key: PartitionKey,
        offset: LogOffset,
    ) -> Result<CommitLogEntry, CoordinationError> {
        self.request(|cb| Event::GetCommitLogFromOffset(key, offset, cb))
            .await
    }

    pub(crate) async fn pull_commit_logs(
        &self,
        input: PullCommitLogsInput,
    ) -> Result<CommitLogBatch, CoordinationError> {
        self.request(|cb| Event::PullCommitLogs(input, cb)).await
    }

    /// None if the partition is unknown, has no accepted session, or the actor has exited.
    pub(crate) async fn leader_session(&self, key: PartitionKey) -> Option<LeaderSession> {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(Event::LeaderSession(key, tx)).await.is_err() {
            return None;
        }
        rx.await.ok().flatten()
    }

    pub(crate) async fn clean_commit_log_before(
        &self,
        key: PartitionKey,
        offset: LogOffset,
    ) -> Result<(), CoordinationError> {
        self.request(|cb| Event::CleanCommitLogBefore(key, offset, cb))
            .await
    }

    async fn request<O: Debug>(&self, event: impl FnOnce(Callback<O>) -> Event) -> Result<O, CoordinationError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(event(Callback(tx)))
            .await
            .map_err(|_| actor_exited())?;

        rx.await.map_err(|_| actor_exited())?
    }
}

fn actor_exited() -> CoordinationError {
    CoordinationError::new(CoordErrorKind::LocalFailure, "Coordinator task has exited")
}

/// CoordinatorActor is the local coordinator in actor model.
pub(crate) struct CoordinatorActor<L, F>
where
    L: commitlog::Log<PartitionLogRecord>,
    F: LogFactory<PartitionLogRecord, L>,
{
    logger: slog::Logger,
    receiver: mpsc::Receiver<Event>,
    coordinator: LocalCoordinator<L, F>,
}

impl<L, F> CoordinatorActor<L, F>
where
    L: commitlog::Log<PartitionLogRecord>,
    F: LogFactory<PartitionLogRecord, L>,
{
    pub(crate) async fn run_event_loop(mut self) {
        while let Some(event) = self.receiver.recv().await {
            self.handle_event(event);
        }
        slog::info!(self.logger, "Coordinator event loop has exited");
    }

    // This must NOT be async. Any long running work must be spawned on another actor.
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::UpdateTopicInfo(input, callback) => {
                callback.send(self.coordinator.handle_update_topic_info(input));
            }
            Event::NotifyLeaderSession(input, callback) => {
                callback.send(self.coordinator.handle_notify_leader_session(input));
            }
            Event::EnableTopicWrite(input, callback) => {
                callback.send(self.coordinator.handle_enable_topic_write(input));
            }
            Event::DisableTopicWrite(input, callback) => {
                callback.send(self.coordinator.handle_disable_topic_write(input));
            }
            Event::UpdateCatchupForTopic(input, callback) => {
                callback.send(self.coordinator.handle_update_catchup_for_topic(input));
            }
            Event::UpdateChannelsForTopic(input, callback) => {
                callback.send(self.coordinator.handle_update_channels_for_topic(input));
            }
            Event::UpdateChannelOffset(input, callback) => {
                callback.send(self.coordinator.handle_update_channel_offset(input));
            }
            Event::PutMessages(input, callback) => {
                callback.send(self.coordinator.handle_put_messages(input));
            }
            Event::GetTopicStats(topic, callback) => {
                callback.send(self.coordinator.handle_get_topic_stats(&topic));
            }
            Event::GetLastCommitLogId(key, callback) => {
                callback.send(self.coordinator.handle_get_last_commit_log_id(&key));
            }
            Event::GetCommitLogFromOffset(key, offset, callback) => {
                callback.send(self.coordinator.handle_get_commit_log_from_offset(&key, offset));
            }
            Event::PullCommitLogs(input, callback) => {
                callback.send(self.coordinator.handle_pull_commit_logs(input));
            }
            Event::LeaderSession(key, tx) => {
                let _ = tx.send(self.coordinator.leader_session(&key));
            }
            Event::CleanCommitLogBefore(key, offset, callback) => {
                callback.send(self.coordinator.clean_commit_log_before(&key, offset));
            }
        }
    }
}
