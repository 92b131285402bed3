use crate::actor::ActorClient;
use crate::api::{
    CommitLogBatch, CommitLogEntry, CoordErrorKind, CoordinationError, Epoch, LeaderEpoch, Message, TopicStats,
};
use crate::commitlog::LogOffset;
use crate::coordinator::{
    ChannelOffsetInput, LeaderSessionInput, PartitionKey, PullCommitLogsInput, PutMessagesInput, TopicInfoInput,
};
use crate::grpc::grpc_coordinator_server::{GrpcCoordinator, GrpcCoordinatorServer};
use crate::grpc::{
    proto_commit_log_reply, proto_coord_reply, proto_last_commit_log_reply, proto_pull_commit_logs_reply,
    proto_topic_stats_reply, ProtoChannelOffsetReq, ProtoCommitLogAtOffset, ProtoCommitLogReply, ProtoCommitLogReq,
    ProtoCoordErr, ProtoCoordReply, ProtoCoordSuccess, ProtoLastCommitLog, ProtoLastCommitLogReply,
    ProtoLeaderSessionReq, ProtoPullCommitLogsReply, ProtoPullCommitLogsReq, ProtoPulledCommitLogs,
    ProtoPutMessageReq, ProtoPutMessagesReq, ProtoTopicInfoReq, ProtoTopicStatsReply, ProtoTopicStatsReq,
};
use crate::server::RpcServerShutdownSignal;
use std::fmt::Debug;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer is the type that implements the coordination gRPC interface.
pub(crate) struct RpcServer {
    logger: slog::Logger,
    coordinator: ActorClient,
}

/// The admin calls that all carry the same epoch + partition info request.
#[derive(Debug, Copy, Clone)]
enum TopicInfoCall {
    Update,
    EnableWrite,
    DisableWrite,
    Catchup,
    Channels,
}

impl RpcServer {
    pub(crate) fn new(logger: slog::Logger, coordinator: ActorClient) -> Self {
        RpcServer { logger, coordinator }
    }

    /// Serves on an already bound `listener` until `shutdown_signal` fires.
    pub(crate) async fn run(self, listener: TcpListener, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        match listener.local_addr() {
            Ok(addr) => slog::info!(logger, "Listening on '{:?}'", addr),
            Err(e) => slog::warn!(logger, "Listening on unknown address: {:?}", e),
        }

        let result = Server::builder()
            .add_service(GrpcCoordinatorServer::new(self))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    // -- Admin plane --

    async fn handle_topic_info(
        &self,
        call: TopicInfoCall,
        rpc_request: ProtoTopicInfoReq,
    ) -> Result<(), CoordinationError> {
        let app_input = Self::convert_topic_info_input(rpc_request)?;
        match call {
            TopicInfoCall::Update => self.coordinator.update_topic_info(app_input).await,
            TopicInfoCall::EnableWrite => self.coordinator.enable_topic_write(app_input).await,
            TopicInfoCall::DisableWrite => self.coordinator.disable_topic_write(app_input).await,
            TopicInfoCall::Catchup => self.coordinator.update_catchup_for_topic(app_input).await,
            TopicInfoCall::Channels => self.coordinator.update_channels_for_topic(app_input).await,
        }
    }

    fn convert_topic_info_input(rpc_request: ProtoTopicInfoReq) -> Result<TopicInfoInput, CoordinationError> {
        let topic_info = rpc_request
            .topic_info
            .ok_or_else(|| invalid_request("Missing topic info"))?;

        Ok(TopicInfoInput {
            epoch: Epoch::new(rpc_request.lookup_epoch),
            topic_info: topic_info.into(),
        })
    }

    async fn handle_notify_leader_session(&self, rpc_request: ProtoLeaderSessionReq) -> Result<(), CoordinationError> {
        let app_input = Self::convert_leader_session_input(rpc_request)?;
        self.coordinator.notify_leader_session(app_input).await
    }

    fn convert_leader_session_input(
        rpc_request: ProtoLeaderSessionReq,
    ) -> Result<LeaderSessionInput, CoordinationError> {
        let topic_info = rpc_request
            .topic_info
            .ok_or_else(|| invalid_request("Missing topic info"))?;
        let leader_session = rpc_request
            .leader_session
            .ok_or_else(|| invalid_request("Missing leader session"))?;

        Ok(LeaderSessionInput {
            epoch: Epoch::new(rpc_request.lookup_epoch),
            topic_info: topic_info.into(),
            leader_session: leader_session.into(),
        })
    }

    // -- Data plane --

    async fn handle_update_channel_offset(&self, rpc_request: ProtoChannelOffsetReq) -> Result<(), CoordinationError> {
        let channel_offset = rpc_request
            .channel_offset
            .ok_or_else(|| invalid_request("Missing channel offset"))?;

        let app_input = ChannelOffsetInput {
            key: PartitionKey::new(rpc_request.topic_name, rpc_request.topic_partition),
            topic_epoch: Epoch::new(rpc_request.topic_epoch),
            leader_epoch: LeaderEpoch::new(rpc_request.topic_leader_epoch),
            channel: rpc_request.channel,
            offset: channel_offset.into(),
        };
        self.coordinator.update_channel_offset(app_input).await
    }

    async fn handle_put_message(&self, rpc_request: ProtoPutMessageReq) -> Result<(), CoordinationError> {
        let log_data = rpc_request
            .log_data
            .ok_or_else(|| invalid_request("Missing commit log data"))?;
        let message = rpc_request
            .message
            .ok_or_else(|| invalid_request("Missing message"))?;

        let app_input = PutMessagesInput {
            key: PartitionKey::new(rpc_request.topic_name, rpc_request.topic_partition),
            topic_epoch: Epoch::new(rpc_request.topic_epoch),
            leader_epoch: LeaderEpoch::new(rpc_request.topic_leader_epoch),
            entries: vec![CommitLogEntry::from(log_data)],
            messages: vec![Message::from(message)],
        };
        self.coordinator.put_messages(app_input).await
    }

    async fn handle_put_messages(&self, rpc_request: ProtoPutMessagesReq) -> Result<(), CoordinationError> {
        let app_input = PutMessagesInput {
            key: PartitionKey::new(rpc_request.topic_name, rpc_request.topic_partition),
            topic_epoch: Epoch::new(rpc_request.topic_epoch),
            leader_epoch: LeaderEpoch::new(rpc_request.topic_leader_epoch),
            entries: rpc_request.log_list.into_iter().map(CommitLogEntry::from).collect(),
            messages: rpc_request.messages.into_iter().map(Message::from).collect(),
        };
        self.coordinator.put_messages(app_input).await
    }

    // -- Results --

    fn convert_coord_result(app_result: Result<(), CoordinationError>) -> ProtoCoordReply {
        let result = match app_result {
            Ok(()) => proto_coord_reply::Result::Ok(ProtoCoordSuccess {
                // Empty
            }),
            Err(e) => proto_coord_reply::Result::Err(ProtoCoordErr::from(&e)),
        };
        ProtoCoordReply { result: Some(result) }
    }

    fn convert_topic_stats_result(app_result: Result<TopicStats, CoordinationError>) -> ProtoTopicStatsReply {
        let result = match app_result {
            Ok(stats) => proto_topic_stats_reply::Result::Ok(stats.into()),
            Err(e) => proto_topic_stats_reply::Result::Err(ProtoCoordErr::from(&e)),
        };
        ProtoTopicStatsReply { result: Some(result) }
    }

    fn convert_last_commit_log_result(
        app_result: Result<Option<LogOffset>, CoordinationError>,
    ) -> ProtoLastCommitLogReply {
        let result = match app_result {
            Ok(None) => proto_last_commit_log_reply::Result::Ok(ProtoLastCommitLog {
                empty: true,
                log_offset: 0,
            }),
            Ok(Some(offset)) => proto_last_commit_log_reply::Result::Ok(ProtoLastCommitLog {
                empty: false,
                log_offset: offset.as_u64(),
            }),
            Err(e) => proto_last_commit_log_reply::Result::Err(ProtoCoordErr::from(&e)),
        };
        ProtoLastCommitLogReply { result: Some(result) }
    }

    fn convert_commit_log_result(app_result: Result<CommitLogEntry, CoordinationError>) -> ProtoCommitLogReply {
        let result = match app_result {
            Ok(entry) => proto_commit_log_reply::Result::Ok(ProtoCommitLogAtOffset {
                log_offset: entry.log_id.as_u64(),
                log_data: Some((&entry).into()),
            }),
            Err(e) => proto_commit_log_reply::Result::Err(ProtoCoordErr::from(&e)),
        };
        ProtoCommitLogReply { result: Some(result) }
    }

    fn convert_pull_result(app_result: Result<CommitLogBatch, CoordinationError>) -> ProtoPullCommitLogsReply {
        let result = match app_result {
            Ok(batch) => proto_pull_commit_logs_reply::Result::Ok(ProtoPulledCommitLogs {
                start_log_offset: batch.start_offset.as_u64(),
                logs: batch.entries.iter().map(Into::into).collect(),
                data_list: batch.payloads.iter().map(|payload| payload.to_vec()).collect(),
            }),
            Err(e) => proto_pull_commit_logs_reply::Result::Err(ProtoCoordErr::from(&e)),
        };
        ProtoPullCommitLogsReply { result: Some(result) }
    }

    fn unwrap_request<Req: Debug>(&self, rpc_request_wrapped: Request<Req>) -> Req {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        rpc_request
    }

    fn reply<Rsp: Debug>(&self, rpc_reply: Rsp) -> Result<Response<Rsp>, Status> {
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn topic_info_call(
        &self,
        call: TopicInfoCall,
        rpc_request_wrapped: Request<ProtoTopicInfoReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let app_result = self.handle_topic_info(call, rpc_request).await;
        self.reply(Self::convert_coord_result(app_result))
    }
}

fn invalid_request(message: &str) -> CoordinationError {
    CoordinationError::new(CoordErrorKind::InvalidRequest, message)
}

#[async_trait::async_trait]
impl GrpcCoordinator for RpcServer {
    async fn notify_topic_leader_session(
        &self,
        rpc_request_wrapped: Request<ProtoLeaderSessionReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let app_result = self.handle_notify_leader_session(rpc_request).await;
        self.reply(Self::convert_coord_result(app_result))
    }

    async fn update_topic_info(
        &self,
        rpc_request_wrapped: Request<ProtoTopicInfoReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        self.topic_info_call(TopicInfoCall::Update, rpc_request_wrapped)
            .await
    }

    async fn enable_topic_write(
        &self,
        rpc_request_wrapped: Request<ProtoTopicInfoReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        self.topic_info_call(TopicInfoCall::EnableWrite, rpc_request_wrapped)
            .await
    }

    async fn disable_topic_write(
        &self,
        rpc_request_wrapped: Request<ProtoTopicInfoReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        self.topic_info_call(TopicInfoCall::DisableWrite, rpc_request_wrapped)
            .await
    }

    async fn update_catchup_for_topic(
        &self,
        rpc_request_wrapped: Request<ProtoTopicInfoReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        self.topic_info_call(TopicInfoCall::Catchup, rpc_request_wrapped)
            .await
    }

    async fn update_channels_for_topic(
        &self,
        rpc_request_wrapped: Request<ProtoTopicInfoReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        self.topic_info_call(TopicInfoCall::Channels, rpc_request_wrapped)
            .await
    }

    async fn update_channel_offset(
        &self,
        rpc_request_wrapped: Request<ProtoChannelOffsetReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let app_result = self.handle_update_channel_offset(rpc_request).await;
        self.reply(Self::convert_coord_result(app_result))
    }

    async fn put_message(
        &self,
        rpc_request_wrapped: Request<ProtoPutMessageReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let app_result = self.handle_put_message(rpc_request).await;
        self.reply(Self::convert_coord_result(app_result))
    }

    async fn put_messages(
        &self,
        rpc_request_wrapped: Request<ProtoPutMessagesReq>,
    ) -> Result<Response<ProtoCoordReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let app_result = self.handle_put_messages(rpc_request).await;
        self.reply(Self::convert_coord_result(app_result))
    }

    async fn get_topic_stats(
        &self,
        rpc_request_wrapped: Request<ProtoTopicStatsReq>,
    ) -> Result<Response<ProtoTopicStatsReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let app_result = self.coordinator.get_topic_stats(rpc_request.topic_name).await;
        self.reply(Self::convert_topic_stats_result(app_result))
    }

    async fn get_last_commit_log_id(
        &self,
        rpc_request_wrapped: Request<ProtoCommitLogReq>,
    ) -> Result<Response<ProtoLastCommitLogReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let key = PartitionKey::new(rpc_request.topic_name, rpc_request.topic_partition);
        let app_result = self.coordinator.get_last_commit_log_id(key).await;
        self.reply(Self::convert_last_commit_log_result(app_result))
    }

    async fn get_commit_log_from_offset(
        &self,
        rpc_request_wrapped: Request<ProtoCommitLogReq>,
    ) -> Result<Response<ProtoCommitLogReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let key = PartitionKey::new(rpc_request.topic_name, rpc_request.topic_partition);
        let offset = LogOffset::new(rpc_request.log_offset);
        let app_result = self.coordinator.get_commit_log_from_offset(key, offset).await;
        self.reply(Self::convert_commit_log_result(app_result))
    }

    async fn pull_commit_logs(
        &self,
        rpc_request_wrapped: Request<ProtoPullCommitLogsReq>,
    ) -> Result<Response<ProtoPullCommitLogsReply>, Status> {
        let rpc_request = self.unwrap_request(rpc_request_wrapped);
        let app_input = PullCommitLogsInput {
            key: PartitionKey::new(rpc_request.topic_name, rpc_request.topic_partition),
            start_offset: LogOffset::new(rpc_request.start_log_offset),
            max_entries: rpc_request.log_max_num,
        };
        let app_result = self.coordinator.pull_commit_logs(app_input).await;
        self.reply(Self::convert_pull_result(app_result))
    }
}
