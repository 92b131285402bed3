// ---- Shared ----

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTopicPartitionMetaInfo {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub partition: u32,
    #[prost(uint64, tag = "3")]
    pub epoch: u64,
    #[prost(string, tag = "4")]
    pub leader: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "5")]
    pub isr: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "6")]
    pub catchup_list: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "7")]
    pub channels: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(uint32, tag = "8")]
    pub replica: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaderSession {
    #[prost(string, tag = "1")]
    pub topic: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub partition: u32,
    #[prost(string, tag = "3")]
    pub leader_node: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub session: ::prost::alloc::string::String,
    #[prost(uint64, tag = "5")]
    pub leader_epoch: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCommitLogData {
    #[prost(uint64, tag = "1")]
    pub log_id: u64,
    #[prost(uint64, tag = "2")]
    pub epoch: u64,
    #[prost(uint64, tag = "3")]
    pub msg_offset: u64,
    #[prost(uint32, tag = "4")]
    pub msg_size: u32,
    #[prost(uint64, tag = "5")]
    pub msg_cnt: u64,
    #[prost(uint32, tag = "6")]
    pub msg_num: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMessage {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
    #[prost(uint32, tag = "3")]
    pub attempts: u32,
    #[prost(bytes = "vec", tag = "4")]
    pub body: ::prost::alloc::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoChannelOffset {
    #[prost(uint64, tag = "1")]
    pub virtual_offset: u64,
    #[prost(bool, tag = "2")]
    pub flush: bool,
    #[prost(bool, tag = "3")]
    pub allow_backward: bool,
}
/// `code` values are defined by `CoordErrorKind` on the Rust side. 0 is never sent.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCoordErr {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCoordSuccess {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCoordReply {
    #[prost(oneof = "proto_coord_reply::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_coord_reply::Result>,
}
/// Nested message and enum types in `ProtoCoordReply`.
pub mod proto_coord_reply {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoCoordSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoCoordErr),
    }
}
// ---- Admin plane ----

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaderSessionReq {
    #[prost(uint64, tag = "1")]
    pub lookup_epoch: u64,
    #[prost(message, optional, tag = "2")]
    pub topic_info: ::core::option::Option<ProtoTopicPartitionMetaInfo>,
    #[prost(message, optional, tag = "3")]
    pub leader_session: ::core::option::Option<ProtoLeaderSession>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTopicInfoReq {
    #[prost(uint64, tag = "1")]
    pub lookup_epoch: u64,
    #[prost(message, optional, tag = "2")]
    pub topic_info: ::core::option::Option<ProtoTopicPartitionMetaInfo>,
}
// ---- Data plane ----

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoChannelOffsetReq {
    #[prost(string, tag = "1")]
    pub topic_name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub topic_partition: u32,
    #[prost(uint64, tag = "3")]
    pub topic_epoch: u64,
    #[prost(uint64, tag = "4")]
    pub topic_leader_epoch: u64,
    #[prost(string, tag = "5")]
    pub channel: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "6")]
    pub channel_offset: ::core::option::Option<ProtoChannelOffset>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutMessageReq {
    #[prost(string, tag = "1")]
    pub topic_name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub topic_partition: u32,
    #[prost(uint64, tag = "3")]
    pub topic_epoch: u64,
    #[prost(uint64, tag = "4")]
    pub topic_leader_epoch: u64,
    #[prost(message, optional, tag = "5")]
    pub log_data: ::core::option::Option<ProtoCommitLogData>,
    #[prost(message, optional, tag = "6")]
    pub message: ::core::option::Option<ProtoMessage>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutMessagesReq {
    #[prost(string, tag = "1")]
    pub topic_name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub topic_partition: u32,
    #[prost(uint64, tag = "3")]
    pub topic_epoch: u64,
    #[prost(uint64, tag = "4")]
    pub topic_leader_epoch: u64,
    #[prost(message, repeated, tag = "5")]
    pub log_list: ::prost::alloc::vec::Vec<ProtoCommitLogData>,
    #[prost(message, repeated, tag = "6")]
    pub messages: ::prost::alloc::vec::Vec<ProtoMessage>,
}
// ---- Read only ----

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTopicStatsReq {
    #[prost(string, tag = "1")]
    pub topic_name: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoChannelStats {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub virtual_offset: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPartitionStats {
    #[prost(uint32, tag = "1")]
    pub partition: u32,
    #[prost(uint64, tag = "2")]
    pub topic_epoch: u64,
    #[prost(uint64, tag = "3")]
    pub leader_epoch: u64,
    #[prost(bool, tag = "4")]
    pub write_enabled: bool,
    #[prost(bool, tag = "5")]
    pub catchup: bool,
    #[prost(uint64, tag = "6")]
    pub first_log_offset: u64,
    #[prost(uint64, tag = "7")]
    pub next_log_offset: u64,
    #[prost(message, repeated, tag = "8")]
    pub channels: ::prost::alloc::vec::Vec<ProtoChannelStats>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTopicStats {
    #[prost(string, tag = "1")]
    pub node_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub topic_name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub partitions: ::prost::alloc::vec::Vec<ProtoPartitionStats>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTopicStatsReply {
    #[prost(oneof = "proto_topic_stats_reply::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_topic_stats_reply::Result>,
}
/// Nested message and enum types in `ProtoTopicStatsReply`.
pub mod proto_topic_stats_reply {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoTopicStats),
        #[prost(message, tag = "2")]
        Err(super::ProtoCoordErr),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCommitLogReq {
    #[prost(string, tag = "1")]
    pub topic_name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub topic_partition: u32,
    #[prost(uint64, tag = "3")]
    pub log_offset: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLastCommitLog {
    /// When `empty` is set, `log_offset` is meaningless.
    #[prost(bool, tag = "1")]
    pub empty: bool,
    #[prost(uint64, tag = "2")]
    pub log_offset: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLastCommitLogReply {
    #[prost(oneof = "proto_last_commit_log_reply::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_last_commit_log_reply::Result>,
}
/// Nested message and enum types in `ProtoLastCommitLogReply`.
pub mod proto_last_commit_log_reply {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoLastCommitLog),
        #[prost(message, tag = "2")]
        Err(super::ProtoCoordErr),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCommitLogAtOffset {
    #[prost(uint64, tag = "1")]
    pub log_offset: u64,
    #[prost(message, optional, tag = "2")]
    pub log_data: ::core::option::Option<ProtoCommitLogData>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCommitLogReply {
    #[prost(oneof = "proto_commit_log_reply::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_commit_log_reply::Result>,
}
/// Nested message and enum types in `ProtoCommitLogReply`.
pub mod proto_commit_log_reply {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoCommitLogAtOffset),
        #[prost(message, tag = "2")]
        Err(super::ProtoCoordErr),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPullCommitLogsReq {
    #[prost(string, tag = "1")]
    pub topic_name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub topic_partition: u32,
    #[prost(uint64, tag = "3")]
    pub start_log_offset: u64,
    #[prost(uint32, tag = "4")]
    pub log_max_num: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPulledCommitLogs {
    #[prost(uint64, tag = "1")]
    pub start_log_offset: u64,
    #[prost(message, repeated, tag = "2")]
    pub logs: ::prost::alloc::vec::Vec<ProtoCommitLogData>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub data_list: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPullCommitLogsReply {
    #[prost(oneof = "proto_pull_commit_logs_reply::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_pull_commit_logs_reply::Result>,
}
/// Nested message and enum types in `ProtoPullCommitLogsReply`.
pub mod proto_pull_commit_logs_reply {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoPulledCommitLogs),
        #[prost(message, tag = "2")]
        Err(super::ProtoCoordErr),
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_coordinator_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcCoordinatorServer."]
    #[async_trait]
    pub trait GrpcCoordinator: Send + Sync + 'static {
        #[doc = " Admin plane. Fenced by the caller's coordinator epoch."]
        async fn notify_topic_leader_session(
            &self,
            request: tonic::Request<super::ProtoLeaderSessionReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        async fn update_topic_info(
            &self,
            request: tonic::Request<super::ProtoTopicInfoReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        async fn enable_topic_write(
            &self,
            request: tonic::Request<super::ProtoTopicInfoReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        async fn disable_topic_write(
            &self,
            request: tonic::Request<super::ProtoTopicInfoReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        async fn update_catchup_for_topic(
            &self,
            request: tonic::Request<super::ProtoTopicInfoReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        async fn update_channels_for_topic(
            &self,
            request: tonic::Request<super::ProtoTopicInfoReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        #[doc = " Data plane. Fenced by the writer's leader epoch."]
        async fn update_channel_offset(
            &self,
            request: tonic::Request<super::ProtoChannelOffsetReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        async fn put_message(
            &self,
            request: tonic::Request<super::ProtoPutMessageReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        async fn put_messages(
            &self,
            request: tonic::Request<super::ProtoPutMessagesReq>,
        ) -> Result<tonic::Response<super::ProtoCoordReply>, tonic::Status>;
        #[doc = " Read only. Not fenced."]
        async fn get_topic_stats(
            &self,
            request: tonic::Request<super::ProtoTopicStatsReq>,
        ) -> Result<tonic::Response<super::ProtoTopicStatsReply>, tonic::Status>;
        async fn get_last_commit_log_id(
            &self,
            request: tonic::Request<super::ProtoCommitLogReq>,
        ) -> Result<tonic::Response<super::ProtoLastCommitLogReply>, tonic::Status>;
        async fn get_commit_log_from_offset(
            &self,
            request: tonic::Request<super::ProtoCommitLogReq>,
        ) -> Result<tonic::Response<super::ProtoCommitLogReply>, tonic::Status>;
        async fn pull_commit_logs(
            &self,
            request: tonic::Request<super::ProtoPullCommitLogsReq>,
        ) -> Result<tonic::Response<super::ProtoPullCommitLogsReply>, tonic::Status>;
    }
    #[doc = " Coordination RPCs a partition leader (or the cluster coordinator) issues to replica nodes."]
    #[derive(Debug)]
    pub struct GrpcCoordinatorServer<T: GrpcCoordinator> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcCoordinator> GrpcCoordinatorServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcCoordinatorServer<T>
    where
        T: GrpcCoordinator,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/coordination.GrpcCoordinator/NotifyTopicLeaderSession" => {
                    #[allow(non_camel_case_types)]
                    struct NotifyTopicLeaderSessionSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator>
                        tonic::server::UnaryService<super::ProtoLeaderSessionReq>
                        for NotifyTopicLeaderSessionSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoLeaderSessionReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut =
                                async move { (*inner).notify_topic_leader_session(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = NotifyTopicLeaderSessionSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/UpdateTopicInfo" => {
                    #[allow(non_camel_case_types)]
                    struct UpdateTopicInfoSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoTopicInfoReq>
                        for UpdateTopicInfoSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTopicInfoReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).update_topic_info(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = UpdateTopicInfoSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/EnableTopicWrite" => {
                    #[allow(non_camel_case_types)]
                    struct EnableTopicWriteSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoTopicInfoReq>
                        for EnableTopicWriteSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTopicInfoReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).enable_topic_write(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = EnableTopicWriteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/DisableTopicWrite" => {
                    #[allow(non_camel_case_types)]
                    struct DisableTopicWriteSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoTopicInfoReq>
                        for DisableTopicWriteSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTopicInfoReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).disable_topic_write(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DisableTopicWriteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/UpdateCatchupForTopic" => {
                    #[allow(non_camel_case_types)]
                    struct UpdateCatchupForTopicSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoTopicInfoReq>
                        for UpdateCatchupForTopicSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTopicInfoReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut =
                                async move { (*inner).update_catchup_for_topic(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = UpdateCatchupForTopicSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/UpdateChannelsForTopic" => {
                    #[allow(non_camel_case_types)]
                    struct UpdateChannelsForTopicSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoTopicInfoReq>
                        for UpdateChannelsForTopicSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTopicInfoReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut =
                                async move { (*inner).update_channels_for_topic(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = UpdateChannelsForTopicSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/UpdateChannelOffset" => {
                    #[allow(non_camel_case_types)]
                    struct UpdateChannelOffsetSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator>
                        tonic::server::UnaryService<super::ProtoChannelOffsetReq>
                        for UpdateChannelOffsetSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoChannelOffsetReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).update_channel_offset(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = UpdateChannelOffsetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/PutMessage" => {
                    #[allow(non_camel_case_types)]
                    struct PutMessageSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoPutMessageReq>
                        for PutMessageSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPutMessageReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).put_message(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PutMessageSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/PutMessages" => {
                    #[allow(non_camel_case_types)]
                    struct PutMessagesSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoPutMessagesReq>
                        for PutMessagesSvc<T>
                    {
                        type Response = super::ProtoCoordReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPutMessagesReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).put_messages(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PutMessagesSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/GetTopicStats" => {
                    #[allow(non_camel_case_types)]
                    struct GetTopicStatsSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoTopicStatsReq>
                        for GetTopicStatsSvc<T>
                    {
                        type Response = super::ProtoTopicStatsReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoTopicStatsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_topic_stats(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetTopicStatsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/GetLastCommitLogId" => {
                    #[allow(non_camel_case_types)]
                    struct GetLastCommitLogIdSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoCommitLogReq>
                        for GetLastCommitLogIdSvc<T>
                    {
                        type Response = super::ProtoLastCommitLogReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCommitLogReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_last_commit_log_id(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetLastCommitLogIdSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/GetCommitLogFromOffset" => {
                    #[allow(non_camel_case_types)]
                    struct GetCommitLogFromOffsetSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator> tonic::server::UnaryService<super::ProtoCommitLogReq>
                        for GetCommitLogFromOffsetSvc<T>
                    {
                        type Response = super::ProtoCommitLogReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCommitLogReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut =
                                async move { (*inner).get_commit_log_from_offset(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetCommitLogFromOffsetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/coordination.GrpcCoordinator/PullCommitLogs" => {
                    #[allow(non_camel_case_types)]
                    struct PullCommitLogsSvc<T: GrpcCoordinator>(pub Arc<T>);
                    impl<T: GrpcCoordinator>
                        tonic::server::UnaryService<super::ProtoPullCommitLogsReq>
                        for PullCommitLogsSvc<T>
                    {
                        type Response = super::ProtoPullCommitLogsReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPullCommitLogsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).pull_commit_logs(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PullCommitLogsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcCoordinator> Clone for GrpcCoordinatorServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcCoordinator> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcCoordinator> tonic::transport::NamedService for GrpcCoordinatorServer<T> {
        const NAME: &'static str = "coordination.GrpcCoordinator";
    }
}
