use crate::transport::{Connector, PeerEndpoint, TransportError};
use tokio::sync::Mutex;

/// TransportClient owns the one live connection to one remote node, and rebuilds it when it has
/// been torn down.
///
/// The connection is behind an async mutex. Callers clone the handle out under the lock, and a
/// reconnect dials and swaps under the same lock, so nobody observes a half-swapped handle.
/// Calls already in flight on the old handle are abandoned along with it.
pub struct TransportClient<C: Connector> {
    logger: slog::Logger,
    endpoint: PeerEndpoint,
    connector: C,
    handle: Mutex<ConnectionHandle<C::Connection>>,
}

struct ConnectionHandle<T> {
    // Incremented on every successful reconnect.
    generation: u64,
    connection: T,
}

/// LiveConnection is a snapshot of the handle at the time it was taken.
pub struct LiveConnection<T> {
    pub generation: u64,
    pub connection: T,
}

impl<C: Connector> TransportClient<C> {
    /// Establishes the initial connection. Does not retry.
    pub async fn connect(logger: slog::Logger, endpoint: PeerEndpoint, connector: C) -> Result<Self, TransportError> {
        let logger = logger.new(slog::o!("Peer" => endpoint.addr().to_string()));

        let connection = connector.connect(&endpoint).await?;
        slog::info!(logger, "Connected (timeout {:?})", endpoint.timeout());

        Ok(TransportClient {
            logger,
            endpoint,
            connector,
            handle: Mutex::new(ConnectionHandle {
                generation: 0,
                connection,
            }),
        })
    }

    pub fn endpoint(&self) -> &PeerEndpoint {
        &self.endpoint
    }

    pub async fn current(&self) -> LiveConnection<C::Connection> {
        let handle = self.handle.lock().await;
        LiveConnection {
            generation: handle.generation,
            connection: handle.connection.clone(),
        }
    }

    /// Unconditionally replaces the current connection with a freshly dialed one. On failure the
    /// old handle stays in place.
    pub async fn reconnect(&self) -> Result<(), TransportError> {
        let mut handle = self.handle.lock().await;
        self.swap_in_new_connection(&mut handle).await
    }

    /// Reconnects only if `observed_generation` is still the live one. If another caller already
    /// replaced the connection we observed failing, there is nothing to do.
    pub async fn reconnect_if_current(&self, observed_generation: u64) -> Result<(), TransportError> {
        let mut handle = self.handle.lock().await;
        if handle.generation != observed_generation {
            slog::debug!(
                self.logger,
                "Connection generation {} already replaced by {}",
                observed_generation,
                handle.generation
            );
            return Ok(());
        }

        self.swap_in_new_connection(&mut handle).await
    }

    async fn swap_in_new_connection(&self, handle: &mut ConnectionHandle<C::Connection>) -> Result<(), TransportError> {
        let connection = match self.connector.connect(&self.endpoint).await {
            Ok(c) => c,
            Err(e) => {
                slog::warn!(self.logger, "Reconnect failed: {}", e);
                return Err(e);
            }
        };

        // Old connection is closed when dropped here.
        handle.connection = connection;
        handle.generation += 1;
        slog::info!(self.logger, "Reconnected. Connection generation {}", handle.generation);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::test_utils::{test_logger, FakePeer};
    use std::sync::Arc;

    fn endpoint() -> PeerEndpoint {
        PeerEndpoint::new("127.0.0.1:4250")
    }

    #[tokio::test]
    async fn connect_failure_is_surfaced_without_retry() {
        let peer = FakePeer::new();
        peer.fail_next_connect(TransportError::Connect {
            addr: "127.0.0.1:4250".into(),
            reason: "connection refused".into(),
        });

        let result = TransportClient::connect(test_logger(), endpoint(), peer.connector()).await;

        assert!(matches!(result, Err(TransportError::Connect { .. })));
        assert_eq!(peer.num_connects(), 1);
    }

    #[tokio::test]
    async fn reconnect_swaps_handle() {
        let peer = FakePeer::new();
        let client = TransportClient::connect(test_logger(), endpoint(), peer.connector())
            .await
            .unwrap();
        assert_eq!(client.current().await.connection.id(), 0);

        client.reconnect().await.unwrap();

        let live = client.current().await;
        assert_eq!(live.generation, 1);
        assert_eq!(live.connection.id(), 1);
        assert_eq!(peer.num_connects(), 2);
    }

    #[tokio::test]
    async fn failed_reconnect_keeps_old_handle() {
        let peer = FakePeer::new();
        let client = TransportClient::connect(test_logger(), endpoint(), peer.connector())
            .await
            .unwrap();
        peer.fail_next_connect(TransportError::Timeout {
            addr: "127.0.0.1:4250".into(),
            after: endpoint().timeout(),
        });

        let result = client.reconnect().await;

        assert!(matches!(result, Err(TransportError::Timeout { .. })));
        let live = client.current().await;
        assert_eq!(live.generation, 0);
        assert_eq!(live.connection.id(), 0);
    }

    #[tokio::test]
    async fn concurrent_reconnects_of_same_generation_dial_once() {
        let peer = FakePeer::new();
        let client = Arc::new(
            TransportClient::connect(test_logger(), endpoint(), peer.connector())
                .await
                .unwrap(),
        );
        let observed = client.current().await.generation;

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let client = client.clone();
            tasks.push(tokio::spawn(async move { client.reconnect_if_current(observed).await }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(peer.num_connects(), 2);
        assert_eq!(client.current().await.generation, 1);
    }
}
