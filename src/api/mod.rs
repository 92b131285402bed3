//! This mod is meant to hold most of the code for the library's client-facing API.
mod client;
mod conversions;
mod errors;
mod options;
mod service;
mod types;
mod wiring;

pub use client::CoordinatorRpcClient;
pub use errors::CoordErrorKind;
pub use errors::CoordinationError;
pub use errors::RpcCallError;
pub use errors::RpcResult;
pub use options::RpcClientOptions;
pub use service::CoordinatorService;
pub use types::CommitLogBatch;
pub use types::CommitLogEntry;
pub use types::ConsumerChannelOffset;
pub use types::Epoch;
pub use types::LeaderEpoch;
pub use types::LeaderSession;
pub use types::Message;
pub use types::MessageId;
pub use types::PartitionStats;
pub use types::TopicPartitionMetaInfo;
pub use types::TopicStats;
pub use wiring::try_create_rpc_client;
pub use wiring::try_create_rpc_client_with_connector;
pub use wiring::try_start_coordinator_service;
pub use wiring::CoordinatorServiceConfig;
pub use wiring::CoordinatorServiceCreationError;
pub use wiring::RpcClientConfig;
pub use wiring::RpcClientCreationError;
