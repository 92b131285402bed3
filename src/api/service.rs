use crate::actor::ActorClient;
use crate::api::{CoordinationError, LeaderSession, TopicStats};
use crate::commitlog::LogOffset;
use crate::coordinator::PartitionKey;
use crate::server::RpcServerShutdownHandle;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// CoordinatorService is a running coordination peer: a gRPC server answering the coordination
/// protocol for this node, and the local coordinator behind it.
///
/// Dropping the service also stops the server, but only `shutdown()` waits for it to finish.
pub struct CoordinatorService {
    pub(crate) logger: slog::Logger,
    pub(crate) node_id: String,
    pub(crate) listen_addr: SocketAddr,
    pub(crate) coordinator: ActorClient,
    pub(crate) server_shutdown_handle: RpcServerShutdownHandle,
    pub(crate) server_task: JoinHandle<()>,
}

impl CoordinatorService {
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    /// The leader session this node accepted for the partition, if any.
    pub async fn leader_session(&self, topic: &str, partition: u32) -> Option<LeaderSession> {
        self.coordinator
            .leader_session(PartitionKey::new(topic, partition))
            .await
    }

    pub async fn topic_stats(&self, topic: &str) -> Result<TopicStats, CoordinationError> {
        self.coordinator.get_topic_stats(topic.to_string()).await
    }

    /// Retention. Drops the partition's commit log entries before `offset`; pulls and lookups
    /// below it are out of range afterwards.
    pub async fn clean_commit_log_before(
        &self,
        topic: &str,
        partition: u32,
        offset: LogOffset,
    ) -> Result<(), CoordinationError> {
        self.coordinator
            .clean_commit_log_before(PartitionKey::new(topic, partition), offset)
            .await
    }

    pub async fn shutdown(self) {
        self.server_shutdown_handle.shutdown();
        slog::info!(self.logger, "Shutting down");
        if let Err(e) = self.server_task.await {
            slog::error!(self.logger, "Coordinator server task failed: {:?}", e);
        }
    }
}
