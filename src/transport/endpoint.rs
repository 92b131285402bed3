use std::time::Duration;

/// General timeout for coordination calls.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for latency sensitive checks, where a slow peer is as good as a dead one.
pub const SHORT_RPC_TIMEOUT: Duration = Duration::from_secs(1);

/// PeerEndpoint is where a remote node lives, and how long we're willing to wait on it. The same
/// timeout bounds connecting and every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerEndpoint {
    addr: String,
    timeout: Duration,
}

impl PeerEndpoint {
    /// `addr` is `host:port`.
    pub fn new(addr: impl Into<String>) -> Self {
        Self::with_timeout(addr, DEFAULT_RPC_TIMEOUT)
    }

    pub fn latency_sensitive(addr: impl Into<String>) -> Self {
        Self::with_timeout(addr, SHORT_RPC_TIMEOUT)
    }

    pub fn with_timeout(addr: impl Into<String>, timeout: Duration) -> Self {
        PeerEndpoint {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
