//! Transport client: one persistent connection per remote node, rebuilt when torn down.
mod client;
mod connection;
mod endpoint;
mod error;
mod grpc;
#[cfg(test)]
pub(crate) mod test_utils;

pub use client::TransportClient;
pub use connection::Connector;
pub use connection::RpcConnection;
pub use endpoint::PeerEndpoint;
pub use endpoint::DEFAULT_RPC_TIMEOUT;
pub use endpoint::SHORT_RPC_TIMEOUT;
pub use error::ConnectionError;
pub use error::TransportError;
pub use grpc::GrpcConnection;
pub use grpc::GrpcConnector;
