use crate::commitlog::LogOffset;
use bytes::Bytes;
use std::fmt;

/// Epoch is the coordinator-assigned generation of a partition's metadata. Every admin call is
/// stamped with the caller's belief of it; peers reject calls with a stale one.
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn new(epoch: u64) -> Self {
        Epoch(epoch)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// LeaderEpoch strictly increases every time leadership of a partition changes hands.
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Default)]
pub struct LeaderEpoch(u64);

impl LeaderEpoch {
    pub fn new(epoch: u64) -> Self {
        LeaderEpoch(epoch)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for LeaderEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LeaderEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// TopicPartitionMetaInfo describes the current global view of one topic partition. It is owned
/// by the caller and only ever read here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicPartitionMetaInfo {
    pub name: String,
    pub partition: u32,
    /// Generation of the topic partition's metadata.
    pub epoch: Epoch,
    pub leader: String,
    pub isr: Vec<String>,
    pub catchup_list: Vec<String>,
    pub channels: Vec<String>,
    pub replica: u32,
}

/// LeaderSession identifies the node that believes it leads a partition, for exactly one
/// leadership term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderSession {
    pub topic: String,
    pub partition: u32,
    pub leader_node: String,
    /// Opaque identity bound to one leadership term.
    pub session: String,
    pub leader_epoch: LeaderEpoch,
}

/// CommitLogEntry describes one committed write to a partition.
///
/// `log_id` is the entry's offset in the partition commit log. Replaying entries in `log_id`
/// order reconstructs the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitLogEntry {
    pub log_id: LogOffset,
    /// Leader epoch of the writer that committed this entry.
    pub epoch: LeaderEpoch,
    /// Position of the payload in the message store.
    pub msg_offset: u64,
    pub msg_size: u32,
    /// Total messages written to the partition up to and including this entry.
    pub msg_cnt: u64,
    /// Messages covered by this entry.
    pub msg_num: u32,
}

/// ConsumerChannelOffset is the consumption cursor of one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsumerChannelOffset {
    pub virtual_offset: u64,
    pub flush: bool,
    /// Permits moving the cursor to an earlier position (e.g. an operator reset).
    pub allow_backward: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

/// Message is a single message of the topic. Its encoded form is the raw payload replicated
/// alongside its commit log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub timestamp: i64,
    pub attempts: u32,
    pub body: Bytes,
}

/// TopicStats is a snapshot of a topic's partitions as seen by one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicStats {
    pub node_id: String,
    pub topic: String,
    pub partitions: Vec<PartitionStats>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionStats {
    pub partition: u32,
    pub topic_epoch: Epoch,
    pub leader_epoch: LeaderEpoch,
    pub write_enabled: bool,
    pub catchup: bool,
    /// Retained commit log range is `[first_log_offset, next_log_offset)`.
    pub first_log_offset: LogOffset,
    pub next_log_offset: LogOffset,
    pub channels: Vec<(String, u64)>,
}

/// CommitLogBatch is a run of consecutive commit log entries, starting at `start_offset`, with the
/// raw payload of each entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitLogBatch {
    pub start_offset: LogOffset,
    pub entries: Vec<CommitLogEntry>,
    pub payloads: Vec<Bytes>,
}

impl CommitLogBatch {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The offset a follow-up pull should start from.
    pub fn next_offset(&self) -> LogOffset {
        self.start_offset.plus(self.entries.len() as u64)
    }
}
