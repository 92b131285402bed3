use std::time::Duration;

/// TransportError means a call could not be completed at all. The peer never had a chance to
/// accept or reject it, or we could not understand its answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid peer address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("Failed to connect to {addr}: {reason}")]
    Connect { addr: String, reason: String },

    #[error("Timed out after {after:?} waiting on {addr}")]
    Timeout { addr: String, after: Duration },

    // Connection was torn down underneath us, and we've already spent the reconnect budget.
    #[error("Connection to {addr} was shut down")]
    ConnectionShutdown { addr: String },

    #[error("Call {method} to {addr} failed: {reason}")]
    Call {
        addr: String,
        method: &'static str,
        reason: String,
    },

    #[error("Malformed reply from {method}: {reason}")]
    MalformedReply { method: &'static str, reason: String },
}

/// ConnectionError is what a single call on a live connection can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The connection is no longer usable and must be re-established before calling again.
    #[error("Connection shut down: {reason}")]
    Shutdown { reason: String },

    /// The peer (or the transport on its behalf) failed this one call.
    #[error("Call failed with {code:?}: {message}")]
    Status { code: tonic::Code, message: String },
}

/// `Unavailable` is the code tonic reports when the HTTP/2 connection underneath a call breaks, so
/// it is treated as a dead connection and triggers a reconnect. This is only sound because the
/// coordinator service never answers with a gRPC status of its own: every rejection, local
/// failures included, travels in-band as a `ProtoCoordErr`. An `Unavailable` injected by a proxy
/// between the two nodes is therefore retried like a transport failure.
impl From<tonic::Status> for ConnectionError {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            tonic::Code::Unavailable => ConnectionError::Shutdown {
                reason: status.message().to_string(),
            },
            code => ConnectionError::Status {
                code,
                message: status.message().to_string(),
            },
        }
    }
}
