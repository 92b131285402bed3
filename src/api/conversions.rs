//! Conversions between domain types and their wire messages.
use crate::api::errors::{CoordErrorKind, CoordinationError};
use crate::api::types::{
    CommitLogEntry, ConsumerChannelOffset, Epoch, LeaderEpoch, LeaderSession, Message, MessageId, PartitionStats,
    TopicPartitionMetaInfo, TopicStats,
};
use crate::commitlog::LogOffset;
use crate::grpc::{
    ProtoChannelOffset, ProtoChannelStats, ProtoCommitLogData, ProtoCoordErr, ProtoLeaderSession, ProtoMessage,
    ProtoPartitionStats, ProtoTopicPartitionMetaInfo, ProtoTopicStats,
};
use bytes::Bytes;

impl From<TopicPartitionMetaInfo> for ProtoTopicPartitionMetaInfo {
    fn from(info: TopicPartitionMetaInfo) -> Self {
        ProtoTopicPartitionMetaInfo {
            name: info.name,
            partition: info.partition,
            epoch: info.epoch.as_u64(),
            leader: info.leader,
            isr: info.isr,
            catchup_list: info.catchup_list,
            channels: info.channels,
            replica: info.replica,
        }
    }
}

impl From<ProtoTopicPartitionMetaInfo> for TopicPartitionMetaInfo {
    fn from(proto: ProtoTopicPartitionMetaInfo) -> Self {
        TopicPartitionMetaInfo {
            name: proto.name,
            partition: proto.partition,
            epoch: Epoch::new(proto.epoch),
            leader: proto.leader,
            isr: proto.isr,
            catchup_list: proto.catchup_list,
            channels: proto.channels,
            replica: proto.replica,
        }
    }
}

impl From<LeaderSession> for ProtoLeaderSession {
    fn from(session: LeaderSession) -> Self {
        ProtoLeaderSession {
            topic: session.topic,
            partition: session.partition,
            leader_node: session.leader_node,
            session: session.session,
            leader_epoch: session.leader_epoch.as_u64(),
        }
    }
}

impl From<ProtoLeaderSession> for LeaderSession {
    fn from(proto: ProtoLeaderSession) -> Self {
        LeaderSession {
            topic: proto.topic,
            partition: proto.partition,
            leader_node: proto.leader_node,
            session: proto.session,
            leader_epoch: LeaderEpoch::new(proto.leader_epoch),
        }
    }
}

impl From<&CommitLogEntry> for ProtoCommitLogData {
    fn from(entry: &CommitLogEntry) -> Self {
        ProtoCommitLogData {
            log_id: entry.log_id.as_u64(),
            epoch: entry.epoch.as_u64(),
            msg_offset: entry.msg_offset,
            msg_size: entry.msg_size,
            msg_cnt: entry.msg_cnt,
            msg_num: entry.msg_num,
        }
    }
}

impl From<ProtoCommitLogData> for CommitLogEntry {
    fn from(proto: ProtoCommitLogData) -> Self {
        CommitLogEntry {
            log_id: LogOffset::new(proto.log_id),
            epoch: LeaderEpoch::new(proto.epoch),
            msg_offset: proto.msg_offset,
            msg_size: proto.msg_size,
            msg_cnt: proto.msg_cnt,
            msg_num: proto.msg_num,
        }
    }
}

impl From<ConsumerChannelOffset> for ProtoChannelOffset {
    fn from(offset: ConsumerChannelOffset) -> Self {
        ProtoChannelOffset {
            virtual_offset: offset.virtual_offset,
            flush: offset.flush,
            allow_backward: offset.allow_backward,
        }
    }
}

impl From<ProtoChannelOffset> for ConsumerChannelOffset {
    fn from(proto: ProtoChannelOffset) -> Self {
        ConsumerChannelOffset {
            virtual_offset: proto.virtual_offset,
            flush: proto.flush,
            allow_backward: proto.allow_backward,
        }
    }
}

impl From<&Message> for ProtoMessage {
    fn from(message: &Message) -> Self {
        ProtoMessage {
            id: message.id.0,
            timestamp: message.timestamp,
            attempts: message.attempts,
            body: message.body.to_vec(),
        }
    }
}

impl From<ProtoMessage> for Message {
    fn from(proto: ProtoMessage) -> Self {
        Message {
            id: MessageId(proto.id),
            timestamp: proto.timestamp,
            attempts: proto.attempts,
            body: Bytes::from(proto.body),
        }
    }
}

impl Message {
    /// Raw payload stored next to this message's commit log entry.
    pub fn encode_payload(&self) -> Bytes {
        let proto = ProtoMessage::from(self);
        let mut buf = Vec::with_capacity(prost::Message::encoded_len(&proto));
        // Encoding into a Vec can't run out of capacity.
        let _ = prost::Message::encode(&proto, &mut buf);
        Bytes::from(buf)
    }

    pub fn decode_payload(payload: &[u8]) -> Result<Message, prost::DecodeError> {
        let proto: ProtoMessage = prost::Message::decode(payload)?;
        Ok(Message::from(proto))
    }
}

impl From<&CoordinationError> for ProtoCoordErr {
    fn from(error: &CoordinationError) -> Self {
        ProtoCoordErr {
            code: error.kind.code(),
            message: error.message.clone(),
        }
    }
}

impl From<ProtoCoordErr> for CoordinationError {
    fn from(proto: ProtoCoordErr) -> Self {
        CoordinationError::new(CoordErrorKind::from_code(proto.code), proto.message)
    }
}

impl From<TopicStats> for ProtoTopicStats {
    fn from(stats: TopicStats) -> Self {
        ProtoTopicStats {
            node_id: stats.node_id,
            topic_name: stats.topic,
            partitions: stats
                .partitions
                .into_iter()
                .map(|p| ProtoPartitionStats {
                    partition: p.partition,
                    topic_epoch: p.topic_epoch.as_u64(),
                    leader_epoch: p.leader_epoch.as_u64(),
                    write_enabled: p.write_enabled,
                    catchup: p.catchup,
                    first_log_offset: p.first_log_offset.as_u64(),
                    next_log_offset: p.next_log_offset.as_u64(),
                    channels: p
                        .channels
                        .into_iter()
                        .map(|(name, virtual_offset)| ProtoChannelStats { name, virtual_offset })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<ProtoTopicStats> for TopicStats {
    fn from(proto: ProtoTopicStats) -> Self {
        TopicStats {
            node_id: proto.node_id,
            topic: proto.topic_name,
            partitions: proto
                .partitions
                .into_iter()
                .map(|p| PartitionStats {
                    partition: p.partition,
                    topic_epoch: Epoch::new(p.topic_epoch),
                    leader_epoch: LeaderEpoch::new(p.leader_epoch),
                    write_enabled: p.write_enabled,
                    catchup: p.catchup,
                    first_log_offset: LogOffset::new(p.first_log_offset),
                    next_log_offset: LogOffset::new(p.next_log_offset),
                    channels: p.channels.into_iter().map(|c| (c.name, c.virtual_offset)).collect(),
                })
                .collect(),
        }
    }
}
