use crate::transport::{ConnectionError, Connector, PeerEndpoint, RpcConnection, TransportError};
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::StdError;
use tonic::transport::{Channel, Endpoint};

/// GrpcConnector dials peers over gRPC (HTTP/2, plaintext).
#[derive(Clone, Copy, Debug, Default)]
pub struct GrpcConnector;

#[async_trait::async_trait]
impl Connector for GrpcConnector {
    type Connection = GrpcConnection;

    async fn connect(&self, endpoint: &PeerEndpoint) -> Result<GrpcConnection, TransportError> {
        let url = format!("http://{}", endpoint.addr());
        let tonic_endpoint = Endpoint::from_shared(url)
            .map_err(|e| TransportError::InvalidAddress {
                addr: endpoint.addr().to_string(),
                reason: e.to_string(),
            })?
            .timeout(endpoint.timeout());

        match tokio::time::timeout(endpoint.timeout(), tonic_endpoint.connect()).await {
            Ok(Ok(channel)) => Ok(GrpcConnection {
                inner: Grpc::new(channel),
            }),
            Ok(Err(e)) => Err(TransportError::Connect {
                addr: endpoint.addr().to_string(),
                reason: e.to_string(),
            }),
            Err(_timeout) => Err(TransportError::Timeout {
                addr: endpoint.addr().to_string(),
                after: endpoint.timeout(),
            }),
        }
    }
}

/// GrpcConnection issues calls by method path, e.g. `/coordination.GrpcCoordinator/PutMessage`.
/// This is the same thing a generated client does, minus one method per RPC.
#[derive(Clone)]
pub struct GrpcConnection {
    inner: Grpc<Channel>,
}

#[async_trait::async_trait]
impl RpcConnection for GrpcConnection {
    async fn call<Req, Rsp>(&self, method: &'static str, request: Req) -> Result<Rsp, ConnectionError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Rsp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.inner.clone();

        // A channel that can't become ready has lost its connection.
        grpc.ready().await.map_err(|e| {
            let e: StdError = e.into();
            ConnectionError::Shutdown { reason: e.to_string() }
        })?;

        let codec: ProstCodec<Req, Rsp> = ProstCodec::default();
        let path = PathAndQuery::from_static(method);

        grpc.unary(tonic::Request::new(request), path, codec)
            .await
            .map(tonic::Response::into_inner)
            .map_err(ConnectionError::from)
    }
}
