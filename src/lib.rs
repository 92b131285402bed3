mod actor;
mod api;
mod commitlog;
mod coordinator;
mod dispatcher;
mod server;
mod transport;
mod grpc {
    include!("../generated/coordination.rs");
}

pub use api::try_create_rpc_client;
pub use api::try_create_rpc_client_with_connector;
pub use api::try_start_coordinator_service;
pub use api::CommitLogBatch;
pub use api::CommitLogEntry;
pub use api::ConsumerChannelOffset;
pub use api::CoordErrorKind;
pub use api::CoordinationError;
pub use api::CoordinatorRpcClient;
pub use api::CoordinatorService;
pub use api::CoordinatorServiceConfig;
pub use api::CoordinatorServiceCreationError;
pub use api::Epoch;
pub use api::LeaderEpoch;
pub use api::LeaderSession;
pub use api::Message;
pub use api::MessageId;
pub use api::PartitionStats;
pub use api::RpcCallError;
pub use api::RpcClientConfig;
pub use api::RpcClientCreationError;
pub use api::RpcClientOptions;
pub use api::RpcResult;
pub use api::TopicPartitionMetaInfo;
pub use api::TopicStats;
pub use commitlog::LogOffset;
pub use transport::ConnectionError;
pub use transport::Connector;
pub use transport::GrpcConnection;
pub use transport::GrpcConnector;
pub use transport::PeerEndpoint;
pub use transport::RpcConnection;
pub use transport::TransportError;
pub use transport::DEFAULT_RPC_TIMEOUT;
pub use transport::SHORT_RPC_TIMEOUT;

// `crate::{root_mod}` holds no code, only `mod` and `pub use` statements. `mod` statements are
// never `pub`; types are exported one by one.
