use crate::transport::TransportError;
use std::fmt;

/// CoordErrorKind is why a peer explicitly rejected a coordination request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CoordErrorKind {
    /// Caller's epoch (or the topic epoch in its meta info) is older than what the peer accepted.
    StaleEpoch,
    /// Caller's leader epoch is older than the leader session the peer accepted.
    StaleLeaderEpoch,
    /// Caller's leader epoch is newer than any leader session the peer has been told about.
    LeaderEpochMismatch,
    /// Same leader epoch, different leader or session token.
    LeaderSessionMismatch,
    TopicNotFound,
    WriteDisabled,
    /// Entry doesn't line up with the peer's log tail: a duplicate or a gap.
    CommitLogMismatch,
    CommitLogOutOfRange,
    InvalidRequest,
    /// Peer failed locally (e.g. storage) while handling the request.
    LocalFailure,
    /// A code this build doesn't know about.
    Unknown(u32),
}

impl CoordErrorKind {
    pub fn code(&self) -> u32 {
        match self {
            CoordErrorKind::StaleEpoch => 1,
            CoordErrorKind::StaleLeaderEpoch => 2,
            CoordErrorKind::LeaderEpochMismatch => 3,
            CoordErrorKind::LeaderSessionMismatch => 4,
            CoordErrorKind::TopicNotFound => 5,
            CoordErrorKind::WriteDisabled => 6,
            CoordErrorKind::CommitLogMismatch => 7,
            CoordErrorKind::CommitLogOutOfRange => 8,
            CoordErrorKind::InvalidRequest => 9,
            CoordErrorKind::LocalFailure => 10,
            CoordErrorKind::Unknown(code) => *code,
        }
    }

    pub fn from_code(code: u32) -> Self {
        match code {
            1 => CoordErrorKind::StaleEpoch,
            2 => CoordErrorKind::StaleLeaderEpoch,
            3 => CoordErrorKind::LeaderEpochMismatch,
            4 => CoordErrorKind::LeaderSessionMismatch,
            5 => CoordErrorKind::TopicNotFound,
            6 => CoordErrorKind::WriteDisabled,
            7 => CoordErrorKind::CommitLogMismatch,
            8 => CoordErrorKind::CommitLogOutOfRange,
            9 => CoordErrorKind::InvalidRequest,
            10 => CoordErrorKind::LocalFailure,
            other => CoordErrorKind::Unknown(other),
        }
    }
}

/// CoordinationError is a structured rejection returned by the remote peer. It is never retried
/// automatically: the caller has to refresh whatever fenced state the kind points at first.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Coordination error {kind:?}: {message}")]
pub struct CoordinationError {
    pub kind: CoordErrorKind,
    pub message: String,
}

impl CoordinationError {
    pub fn new(kind: CoordErrorKind, message: impl Into<String>) -> Self {
        CoordinationError {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> CoordErrorKind {
        self.kind
    }

    /// True when the caller's view of epochs, leadership or topic placement is outdated and must
    /// be refreshed before retrying.
    pub fn requires_metadata_refresh(&self) -> bool {
        matches!(
            self.kind,
            CoordErrorKind::StaleEpoch
                | CoordErrorKind::StaleLeaderEpoch
                | CoordErrorKind::LeaderEpochMismatch
                | CoordErrorKind::LeaderSessionMismatch
                | CoordErrorKind::TopicNotFound
        )
    }

    /// True when the peer's log doesn't line up with the caller's, so it has to catch up (or be
    /// checked) before replication can continue.
    pub fn requires_catchup(&self) -> bool {
        matches!(self.kind, CoordErrorKind::CommitLogMismatch)
    }
}

/// RpcCallError is the failure half of every coordination call: either the call never completed
/// (`Transport`), or the peer answered with an explicit rejection (`Rejected`). Never both.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RpcCallError {
    #[error("{0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Rejected(#[from] CoordinationError),
}

impl RpcCallError {
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcCallError::Transport(_))
    }

    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            RpcCallError::Transport(e) => Some(e),
            RpcCallError::Rejected(_) => None,
        }
    }

    pub fn coordination_error(&self) -> Option<&CoordinationError> {
        match self {
            RpcCallError::Transport(_) => None,
            RpcCallError::Rejected(e) => Some(e),
        }
    }

    pub fn requires_metadata_refresh(&self) -> bool {
        self.coordination_error()
            .map(CoordinationError::requires_metadata_refresh)
            .unwrap_or(false)
    }
}

pub type RpcResult<T> = Result<T, RpcCallError>;

impl fmt::Display for CoordErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
