use crate::api::errors::{CoordinationError, RpcCallError, RpcResult};
use crate::api::types::{
    CommitLogBatch, CommitLogEntry, ConsumerChannelOffset, Epoch, LeaderEpoch, LeaderSession, Message,
    TopicPartitionMetaInfo, TopicStats,
};
use crate::commitlog::LogOffset;
use crate::dispatcher::CallDispatcher;
use crate::grpc::{
    proto_commit_log_reply, proto_coord_reply, proto_last_commit_log_reply, proto_pull_commit_logs_reply,
    proto_topic_stats_reply, ProtoChannelOffsetReq, ProtoCommitLogAtOffset, ProtoCommitLogReply, ProtoCommitLogReq,
    ProtoCoordErr, ProtoCoordReply, ProtoCoordSuccess, ProtoLastCommitLog, ProtoLastCommitLogReply,
    ProtoLeaderSessionReq, ProtoPullCommitLogsReply, ProtoPullCommitLogsReq, ProtoPulledCommitLogs,
    ProtoPutMessageReq, ProtoPutMessagesReq, ProtoTopicInfoReq, ProtoTopicStats, ProtoTopicStatsReply,
    ProtoTopicStatsReq,
};
use crate::transport::{Connector, GrpcConnector, PeerEndpoint, TransportError};
use bytes::Bytes;

pub(crate) mod methods {
    pub const NOTIFY_TOPIC_LEADER_SESSION: &str = "/coordination.GrpcCoordinator/NotifyTopicLeaderSession";
    pub const UPDATE_TOPIC_INFO: &str = "/coordination.GrpcCoordinator/UpdateTopicInfo";
    pub const ENABLE_TOPIC_WRITE: &str = "/coordination.GrpcCoordinator/EnableTopicWrite";
    pub const DISABLE_TOPIC_WRITE: &str = "/coordination.GrpcCoordinator/DisableTopicWrite";
    pub const UPDATE_CATCHUP_FOR_TOPIC: &str = "/coordination.GrpcCoordinator/UpdateCatchupForTopic";
    pub const UPDATE_CHANNELS_FOR_TOPIC: &str = "/coordination.GrpcCoordinator/UpdateChannelsForTopic";
    pub const UPDATE_CHANNEL_OFFSET: &str = "/coordination.GrpcCoordinator/UpdateChannelOffset";
    pub const PUT_MESSAGE: &str = "/coordination.GrpcCoordinator/PutMessage";
    pub const PUT_MESSAGES: &str = "/coordination.GrpcCoordinator/PutMessages";
    pub const GET_TOPIC_STATS: &str = "/coordination.GrpcCoordinator/GetTopicStats";
    pub const GET_LAST_COMMIT_LOG_ID: &str = "/coordination.GrpcCoordinator/GetLastCommitLogId";
    pub const GET_COMMIT_LOG_FROM_OFFSET: &str = "/coordination.GrpcCoordinator/GetCommitLogFromOffset";
    pub const PULL_COMMIT_LOGS: &str = "/coordination.GrpcCoordinator/PullCommitLogs";
}

/// CoordinatorRpcClient issues coordination calls to one remote peer.
///
/// Every call resolves to exactly one of: success, `RpcCallError::Transport` (the call never
/// completed), or `RpcCallError::Rejected` (the peer refused it). Only a connection found shut down
/// is retried internally, and only a bounded number of times.
///
/// A client may be shared by concurrent tasks.
pub struct CoordinatorRpcClient<C: Connector = GrpcConnector> {
    logger: slog::Logger,
    dispatcher: CallDispatcher<C>,
}

impl<C: Connector> CoordinatorRpcClient<C> {
    pub(crate) fn new(logger: slog::Logger, dispatcher: CallDispatcher<C>) -> Self {
        CoordinatorRpcClient { logger, dispatcher }
    }

    pub fn endpoint(&self) -> &PeerEndpoint {
        self.dispatcher.transport().endpoint()
    }

    /// Replaces the connection to the peer. Calls already in flight finish on the old one.
    pub async fn reconnect(&self) -> Result<(), TransportError> {
        self.dispatcher.transport().reconnect().await
    }

    // -- Admin plane --

    /// Tells the peer who leads the partition, for which leadership term.
    pub async fn notify_topic_leader_session(
        &self,
        epoch: Epoch,
        topic_info: &TopicPartitionMetaInfo,
        leader_session: &LeaderSession,
    ) -> RpcResult<()> {
        let request = ProtoLeaderSessionReq {
            lookup_epoch: epoch.as_u64(),
            topic_info: Some(topic_info.clone().into()),
            leader_session: Some(leader_session.clone().into()),
        };
        self
            .call::<_, ProtoCoordReply>(methods::NOTIFY_TOPIC_LEADER_SESSION, request)
            .await
            .map(drop)
    }

    /// Installs or refreshes the peer's view of the partition. The first call for a partition
    /// creates it on the peer.
    pub async fn update_topic_info(&self, epoch: Epoch, topic_info: &TopicPartitionMetaInfo) -> RpcResult<()> {
        self.call_with_topic_info(methods::UPDATE_TOPIC_INFO, epoch, topic_info)
            .await
    }

    pub async fn enable_topic_write(&self, epoch: Epoch, topic_info: &TopicPartitionMetaInfo) -> RpcResult<()> {
        self.call_with_topic_info(methods::ENABLE_TOPIC_WRITE, epoch, topic_info)
            .await
    }

    pub async fn disable_topic_write(&self, epoch: Epoch, topic_info: &TopicPartitionMetaInfo) -> RpcResult<()> {
        self.call_with_topic_info(methods::DISABLE_TOPIC_WRITE, epoch, topic_info)
            .await
    }

    /// Registers the peer as a catch-up replica according to `topic_info.catchup_list`.
    pub async fn update_catchup_for_topic(&self, epoch: Epoch, topic_info: &TopicPartitionMetaInfo) -> RpcResult<()> {
        self.call_with_topic_info(methods::UPDATE_CATCHUP_FOR_TOPIC, epoch, topic_info)
            .await
    }

    /// Syncs the peer's consumer channels with `topic_info.channels`.
    pub async fn update_channels_for_topic(&self, epoch: Epoch, topic_info: &TopicPartitionMetaInfo) -> RpcResult<()> {
        self.call_with_topic_info(methods::UPDATE_CHANNELS_FOR_TOPIC, epoch, topic_info)
            .await
    }

    // -- Data plane --

    pub async fn update_channel_offset(
        &self,
        leader_epoch: LeaderEpoch,
        topic_info: &TopicPartitionMetaInfo,
        channel: &str,
        offset: ConsumerChannelOffset,
    ) -> RpcResult<()> {
        let request = ProtoChannelOffsetReq {
            topic_name: topic_info.name.clone(),
            topic_partition: topic_info.partition,
            topic_epoch: topic_info.epoch.as_u64(),
            topic_leader_epoch: leader_epoch.as_u64(),
            channel: channel.to_string(),
            channel_offset: Some(offset.into()),
        };
        self
            .call::<_, ProtoCoordReply>(methods::UPDATE_CHANNEL_OFFSET, request)
            .await
            .map(drop)
    }

    /// Replicates one message with its commit log entry. `log_data.log_id` has to be the peer's
    /// next log offset.
    pub async fn put_message(
        &self,
        leader_epoch: LeaderEpoch,
        topic_info: &TopicPartitionMetaInfo,
        log_data: &CommitLogEntry,
        message: &Message,
    ) -> RpcResult<()> {
        let request = ProtoPutMessageReq {
            topic_name: topic_info.name.clone(),
            topic_partition: topic_info.partition,
            topic_epoch: topic_info.epoch.as_u64(),
            topic_leader_epoch: leader_epoch.as_u64(),
            log_data: Some(log_data.into()),
            message: Some(message.into()),
        };
        self
            .call::<_, ProtoCoordReply>(methods::PUT_MESSAGE, request)
            .await
            .map(drop)
    }

    /// Replicates a batch. The peer applies either all of it or none of it.
    pub async fn put_messages(
        &self,
        leader_epoch: LeaderEpoch,
        topic_info: &TopicPartitionMetaInfo,
        log_list: &[CommitLogEntry],
        messages: &[Message],
    ) -> RpcResult<()> {
        let request = ProtoPutMessagesReq {
            topic_name: topic_info.name.clone(),
            topic_partition: topic_info.partition,
            topic_epoch: topic_info.epoch.as_u64(),
            topic_leader_epoch: leader_epoch.as_u64(),
            log_list: log_list.iter().map(Into::into).collect(),
            messages: messages.iter().map(Into::into).collect(),
        };
        self
            .call::<_, ProtoCoordReply>(methods::PUT_MESSAGES, request)
            .await
            .map(drop)
    }

    // -- Read only --

    pub async fn get_topic_stats(&self, topic: &str) -> RpcResult<TopicStats> {
        let request = ProtoTopicStatsReq {
            topic_name: topic.to_string(),
        };
        let stats = self
            .call::<_, ProtoTopicStatsReply>(methods::GET_TOPIC_STATS, request)
            .await?;
        Ok(stats.into())
    }

    /// Offset of the last entry in the peer's commit log, or `None` if it holds no entries.
    pub async fn get_last_commit_log_id(&self, topic_info: &TopicPartitionMetaInfo) -> RpcResult<Option<LogOffset>> {
        let request = ProtoCommitLogReq {
            topic_name: topic_info.name.clone(),
            topic_partition: topic_info.partition,
            log_offset: 0,
        };
        let last = self
            .call::<_, ProtoLastCommitLogReply>(methods::GET_LAST_COMMIT_LOG_ID, request)
            .await?;

        if last.empty {
            Ok(None)
        } else {
            Ok(Some(LogOffset::new(last.log_offset)))
        }
    }

    /// The entry at `offset`, together with the offset the peer actually served, so the caller can
    /// check it got what it asked for.
    pub async fn get_commit_log_from_offset(
        &self,
        topic_info: &TopicPartitionMetaInfo,
        offset: LogOffset,
    ) -> RpcResult<(LogOffset, CommitLogEntry)> {
        let request = ProtoCommitLogReq {
            topic_name: topic_info.name.clone(),
            topic_partition: topic_info.partition,
            log_offset: offset.as_u64(),
        };
        let reply = self
            .call::<_, ProtoCommitLogReply>(methods::GET_COMMIT_LOG_FROM_OFFSET, request)
            .await?;

        let log_data = reply
            .log_data
            .ok_or_else(|| malformed_reply(methods::GET_COMMIT_LOG_FROM_OFFSET, "missing log data"))?;
        Ok((LogOffset::new(reply.log_offset), log_data.into()))
    }

    /// Up to `max_entries` consecutive entries starting at `start`, each with its payload.
    pub async fn pull_commit_logs_and_data(
        &self,
        topic: &str,
        partition: u32,
        start: LogOffset,
        max_entries: u32,
    ) -> RpcResult<CommitLogBatch> {
        let request = ProtoPullCommitLogsReq {
            topic_name: topic.to_string(),
            topic_partition: partition,
            start_log_offset: start.as_u64(),
            log_max_num: max_entries,
        };
        let pulled = self
            .call::<_, ProtoPullCommitLogsReply>(methods::PULL_COMMIT_LOGS, request)
            .await?;

        if pulled.logs.len() != pulled.data_list.len() {
            return Err(malformed_reply(
                methods::PULL_COMMIT_LOGS,
                format!("{} entries but {} payloads", pulled.logs.len(), pulled.data_list.len()),
            ));
        }
        if pulled.logs.len() > max_entries as usize {
            return Err(malformed_reply(
                methods::PULL_COMMIT_LOGS,
                format!("{} entries, asked for at most {}", pulled.logs.len(), max_entries),
            ));
        }
        if pulled.start_log_offset != start.as_u64() {
            return Err(malformed_reply(
                methods::PULL_COMMIT_LOGS,
                format!("batch starts at {}, asked for {}", pulled.start_log_offset, start),
            ));
        }

        let entries: Vec<CommitLogEntry> = pulled.logs.into_iter().map(CommitLogEntry::from).collect();
        for (i, entry) in entries.iter().enumerate() {
            let expected = start.plus(i as u64);
            if entry.log_id != expected {
                return Err(malformed_reply(
                    methods::PULL_COMMIT_LOGS,
                    format!("entry {} has log id {}, expected {}", i, entry.log_id, expected),
                ));
            }
        }

        Ok(CommitLogBatch {
            start_offset: start,
            entries,
            payloads: pulled.data_list.into_iter().map(Bytes::from).collect(),
        })
    }

    async fn call_with_topic_info(
        &self,
        method: &'static str,
        epoch: Epoch,
        topic_info: &TopicPartitionMetaInfo,
    ) -> RpcResult<()> {
        let request = ProtoTopicInfoReq {
            lookup_epoch: epoch.as_u64(),
            topic_info: Some(topic_info.clone().into()),
        };
        self
            .call::<_, ProtoCoordReply>(method, request)
            .await
            .map(drop)
    }

    async fn call<Req, Rsp>(&self, method: &'static str, request: Req) -> RpcResult<Rsp::Success>
    where
        Req: prost::Message + Clone + Send + Sync + 'static,
        Rsp: CoordReply + prost::Message + Default + Send + Sync + 'static,
    {
        let reply: Rsp = self.dispatcher.invoke(method, request).await?;

        match reply.into_result() {
            Some(Ok(success)) => Ok(success),
            Some(Err(proto_err)) => {
                let error = CoordinationError::from(proto_err);
                slog::info!(self.logger, "{} rejected: {}", method, error);
                Err(RpcCallError::Rejected(error))
            }
            None => Err(malformed_reply(method, "reply carries neither result nor error")),
        }
    }
}

fn malformed_reply(method: &'static str, reason: impl Into<String>) -> RpcCallError {
    RpcCallError::Transport(TransportError::MalformedReply {
        method,
        reason: reason.into(),
    })
}

/// CoordReply is a wire reply carrying either a success value or a coordination error.
trait CoordReply {
    type Success;

    /// `None` if neither side of the reply is set.
    fn into_result(self) -> Option<Result<Self::Success, ProtoCoordErr>>;
}

impl CoordReply for ProtoCoordReply {
    type Success = ProtoCoordSuccess;

    fn into_result(self) -> Option<Result<Self::Success, ProtoCoordErr>> {
        self.result.map(|result| match result {
            proto_coord_reply::Result::Ok(ok) => Ok(ok),
            proto_coord_reply::Result::Err(err) => Err(err),
        })
    }
}

impl CoordReply for ProtoTopicStatsReply {
    type Success = ProtoTopicStats;

    fn into_result(self) -> Option<Result<Self::Success, ProtoCoordErr>> {
        self.result.map(|result| match result {
            proto_topic_stats_reply::Result::Ok(ok) => Ok(ok),
            proto_topic_stats_reply::Result::Err(err) => Err(err),
        })
    }
}

impl CoordReply for ProtoLastCommitLogReply {
    type Success = ProtoLastCommitLog;

    fn into_result(self) -> Option<Result<Self::Success, ProtoCoordErr>> {
        self.result.map(|result| match result {
            proto_last_commit_log_reply::Result::Ok(ok) => Ok(ok),
            proto_last_commit_log_reply::Result::Err(err) => Err(err),
        })
    }
}

impl CoordReply for ProtoCommitLogReply {
    type Success = ProtoCommitLogAtOffset;

    fn into_result(self) -> Option<Result<Self::Success, ProtoCoordErr>> {
        self.result.map(|result| match result {
            proto_commit_log_reply::Result::Ok(ok) => Ok(ok),
            proto_commit_log_reply::Result::Err(err) => Err(err),
        })
    }
}

impl CoordReply for ProtoPullCommitLogsReply {
    type Success = ProtoPulledCommitLogs;

    fn into_result(self) -> Option<Result<Self::Success, ProtoCoordErr>> {
        self.result.map(|result| match result {
            proto_pull_commit_logs_reply::Result::Ok(ok) => Ok(ok),
            proto_pull_commit_logs_reply::Result::Err(err) => Err(err),
        })
    }
}
