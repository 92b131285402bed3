use crate::actor;
use crate::api::client::CoordinatorRpcClient;
use crate::api::options::RpcClientOptionsValidated;
use crate::api::service::CoordinatorService;
use crate::api::RpcClientOptions;
use crate::commitlog::{InMemoryLog, InMemoryLogFactory};
use crate::coordinator::{LocalCoordinator, PartitionLogRecord};
use crate::dispatcher::CallDispatcher;
use crate::server;
use crate::server::RpcServer;
use crate::transport::{Connector, GrpcConnector, PeerEndpoint, TransportClient, TransportError};
use std::convert::TryFrom;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

// -- Client --

pub struct RpcClientConfig {
    pub endpoint: PeerEndpoint,
    pub info_logger: slog::Logger,
    pub options: RpcClientOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum RpcClientCreationError {
    #[error("Illegal options for configuring client: {0}")]
    IllegalClientOptions(String),
    #[error("Failed to connect to peer")]
    Connect(#[source] TransportError),
}

/// Connects to the peer at `config.endpoint` over gRPC. Fails if the first connection can't be
/// established; there is no retry.
pub async fn try_create_rpc_client(config: RpcClientConfig) -> Result<CoordinatorRpcClient, RpcClientCreationError> {
    try_create_rpc_client_with_connector(config, GrpcConnector).await
}

pub async fn try_create_rpc_client_with_connector<C: Connector>(
    config: RpcClientConfig,
    connector: C,
) -> Result<CoordinatorRpcClient<C>, RpcClientCreationError> {
    let options = RpcClientOptionsValidated::try_from(config.options)
        .map_err(|e| RpcClientCreationError::IllegalClientOptions(e.to_string()))?;
    if config.endpoint.timeout() == Duration::from_secs(0) {
        return Err(RpcClientCreationError::IllegalClientOptions(
            "Peer endpoint timeout must be non-zero".to_string(),
        ));
    }

    let root_logger = config.info_logger;

    let transport = TransportClient::connect(root_logger.clone(), config.endpoint, connector)
        .await
        .map_err(RpcClientCreationError::Connect)?;

    let logger = root_logger.new(slog::o!("Peer" => transport.endpoint().addr().to_string()));
    let dispatcher = CallDispatcher::new(logger.clone(), transport, options.max_reconnects_per_call);

    Ok(CoordinatorRpcClient::new(logger, dispatcher))
}

// -- Service --

pub struct CoordinatorServiceConfig {
    pub node_id: String,
    pub listen_addr: SocketAddr,
    pub info_logger: slog::Logger,
}

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorServiceCreationError {
    #[error("Node id must not be empty")]
    EmptyNodeId,
    #[error("Failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Starts a coordination peer serving the coordination protocol on `config.listen_addr`. The
/// listener is bound before this returns; port 0 picks a free port, see `listen_addr()`.
pub async fn try_start_coordinator_service(
    config: CoordinatorServiceConfig,
) -> Result<CoordinatorService, CoordinatorServiceCreationError> {
    if config.node_id.is_empty() {
        return Err(CoordinatorServiceCreationError::EmptyNodeId);
    }

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|source| CoordinatorServiceCreationError::Bind {
            addr: config.listen_addr,
            source,
        })?;
    let listen_addr = listener
        .local_addr()
        .map_err(|source| CoordinatorServiceCreationError::Bind {
            addr: config.listen_addr,
            source,
        })?;

    let root_logger = config
        .info_logger
        .new(slog::o!("Node" => config.node_id.clone()));

    let coordinator: LocalCoordinator<InMemoryLog<PartitionLogRecord>, _> =
        LocalCoordinator::new(root_logger.clone(), config.node_id.clone(), InMemoryLogFactory::new());
    let (actor_client, coordinator_actor) = actor::create(root_logger.clone(), 10, coordinator);
    tokio::spawn(coordinator_actor.run_event_loop());

    let (server_shutdown_handle, server_shutdown_signal) = server::shutdown_signal();
    let rpc_server = RpcServer::new(root_logger.clone(), actor_client.clone());
    let server_task = tokio::spawn(rpc_server.run(listener, server_shutdown_signal));

    Ok(CoordinatorService {
        logger: root_logger,
        node_id: config.node_id,
        listen_addr,
        coordinator: actor_client,
        server_shutdown_handle,
        server_task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::test_utils::{test_logger, FakePeer};

    fn config(options: RpcClientOptions) -> RpcClientConfig {
        RpcClientConfig {
            endpoint: PeerEndpoint::new("10.0.0.7:4250"),
            info_logger: test_logger(),
            options,
        }
    }

    #[tokio::test]
    async fn illegal_options_are_rejected_before_connecting() {
        let peer = FakePeer::new();
        let options = RpcClientOptions {
            max_reconnects_per_call: Some(50),
        };

        let result = try_create_rpc_client_with_connector(config(options), peer.connector()).await;

        assert!(matches!(result, Err(RpcClientCreationError::IllegalClientOptions(_))));
        assert_eq!(peer.num_connects(), 0);
    }

    #[tokio::test]
    async fn zero_timeout_is_rejected() {
        let peer = FakePeer::new();
        let mut config = config(RpcClientOptions::default());
        config.endpoint = PeerEndpoint::with_timeout("10.0.0.7:4250", Duration::from_secs(0));

        let result = try_create_rpc_client_with_connector(config, peer.connector()).await;

        assert!(matches!(result, Err(RpcClientCreationError::IllegalClientOptions(_))));
    }

    #[tokio::test]
    async fn connect_failure_is_surfaced() {
        let peer = FakePeer::new();
        peer.fail_next_connect(TransportError::Connect {
            addr: "10.0.0.7:4250".into(),
            reason: "connection refused".into(),
        });

        let result = try_create_rpc_client_with_connector(config(RpcClientOptions::default()), peer.connector()).await;

        match result {
            Err(RpcClientCreationError::Connect(TransportError::Connect { addr, .. })) => {
                assert_eq!(addr, "10.0.0.7:4250")
            }
            Err(other) => panic!("Unexpected error: {:?}", other),
            Ok(_) => panic!("Expected connect failure"),
        }
    }

    #[tokio::test]
    async fn service_needs_node_id() {
        let result = try_start_coordinator_service(CoordinatorServiceConfig {
            node_id: String::new(),
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            info_logger: test_logger(),
        })
        .await;

        assert!(matches!(result, Err(CoordinatorServiceCreationError::EmptyNodeId)));
    }

    #[tokio::test]
    async fn occupied_port_is_rejected() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = occupied.local_addr().unwrap();

        let result = try_start_coordinator_service(CoordinatorServiceConfig {
            node_id: "node-b".into(),
            listen_addr: addr,
            info_logger: test_logger(),
        })
        .await;

        match result {
            Err(CoordinatorServiceCreationError::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
            Err(other) => panic!("Unexpected error: {:?}", other),
            Ok(_) => panic!("Expected bind failure"),
        }
    }

    #[tokio::test]
    async fn service_reports_bound_port() {
        let service = try_start_coordinator_service(CoordinatorServiceConfig {
            node_id: "node-b".into(),
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            info_logger: test_logger(),
        })
        .await
        .unwrap();

        assert_ne!(service.listen_addr().port(), 0);
        service.shutdown().await;
    }
}
