use crate::transport::{ConnectionError, PeerEndpoint, TransportError};

/// RpcConnection is one established connection to a peer, able to issue unary calls addressed by
/// method path. Clones share the same underlying connection.
#[async_trait::async_trait]
pub trait RpcConnection: Clone + Send + Sync + 'static {
    async fn call<Req, Rsp>(&self, method: &'static str, request: Req) -> Result<Rsp, ConnectionError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Rsp: prost::Message + Default + Send + Sync + 'static;
}

/// Connector dials new connections. It does not retry.
#[async_trait::async_trait]
pub trait Connector: Send + Sync + 'static {
    type Connection: RpcConnection;

    async fn connect(&self, endpoint: &PeerEndpoint) -> Result<Self::Connection, TransportError>;
}
