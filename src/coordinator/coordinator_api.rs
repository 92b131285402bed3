use crate::api::{
    CommitLogEntry, ConsumerChannelOffset, Epoch, LeaderEpoch, LeaderSession, Message, TopicPartitionMetaInfo,
};
use crate::commitlog::LogOffset;
use std::fmt;

/// PartitionKey names one topic partition on this node.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct PartitionKey {
    pub topic: String,
    pub partition: u32,
}

impl PartitionKey {
    pub(crate) fn new(topic: impl Into<String>, partition: u32) -> Self {
        PartitionKey {
            topic: topic.into(),
            partition,
        }
    }
}

impl fmt::Debug for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.topic, self.partition)
    }
}

impl From<&TopicPartitionMetaInfo> for PartitionKey {
    fn from(info: &TopicPartitionMetaInfo) -> Self {
        PartitionKey::new(info.name.clone(), info.partition)
    }
}

// -- Admin plane --

#[derive(Debug)]
pub(crate) struct TopicInfoInput {
    pub epoch: Epoch,
    pub topic_info: TopicPartitionMetaInfo,
}

#[derive(Debug)]
pub(crate) struct LeaderSessionInput {
    pub epoch: Epoch,
    pub topic_info: TopicPartitionMetaInfo,
    pub leader_session: LeaderSession,
}

// -- Data plane --

#[derive(Debug)]
pub(crate) struct ChannelOffsetInput {
    pub key: PartitionKey,
    pub topic_epoch: Epoch,
    pub leader_epoch: LeaderEpoch,
    pub channel: String,
    pub offset: ConsumerChannelOffset,
}

/// Single puts travel as a batch of one.
#[derive(Debug)]
pub(crate) struct PutMessagesInput {
    pub key: PartitionKey,
    pub topic_epoch: Epoch,
    pub leader_epoch: LeaderEpoch,
    pub entries: Vec<CommitLogEntry>,
    pub messages: Vec<Message>,
}

// -- Read only --

#[derive(Debug)]
pub(crate) struct PullCommitLogsInput {
    pub key: PartitionKey,
    pub start_offset: LogOffset,
    pub max_entries: u32,
}
