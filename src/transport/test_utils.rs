use crate::transport::{ConnectionError, Connector, PeerEndpoint, RpcConnection, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// FakeOutcome is the scripted result of the next call made against a `FakePeer`.
pub(crate) enum FakeOutcome {
    /// Reply with this encoded message. Empty means the response type's default.
    Reply(Vec<u8>),
    Shutdown,
    Status(tonic::Code),
    /// Never reply within any sane timeout.
    Hang,
}

impl FakeOutcome {
    pub(crate) fn reply<M: prost::Message>(message: M) -> Self {
        let mut bytes = Vec::with_capacity(message.encoded_len());
        message.encode(&mut bytes).expect("Vec has room");
        FakeOutcome::Reply(bytes)
    }
}

/// FakePeer stands in for a remote node. Connections and calls are served from scripted outcomes
/// and recorded for later assertions.
#[derive(Clone)]
pub(crate) struct FakePeer {
    state: Arc<Mutex<FakePeerState>>,
}

#[derive(Default)]
struct FakePeerState {
    num_connects: usize,
    connect_failures: VecDeque<TransportError>,
    call_outcomes: VecDeque<FakeOutcome>,
    // (method, connection id)
    calls: Vec<(&'static str, usize)>,
}

impl FakePeer {
    pub(crate) fn new() -> Self {
        FakePeer {
            state: Arc::new(Mutex::new(FakePeerState::default())),
        }
    }

    pub(crate) fn connector(&self) -> FakeConnector {
        FakeConnector { peer: self.clone() }
    }

    pub(crate) fn fail_next_connect(&self, error: TransportError) {
        self.lock().connect_failures.push_back(error);
    }

    pub(crate) fn push_outcome(&self, outcome: FakeOutcome) {
        self.lock().call_outcomes.push_back(outcome);
    }

    pub(crate) fn num_connects(&self) -> usize {
        self.lock().num_connects
    }

    pub(crate) fn calls(&self) -> Vec<(&'static str, usize)> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakePeerState> {
        self.state.lock().expect("FakePeer mutex guard poison")
    }
}

pub(crate) struct FakeConnector {
    peer: FakePeer,
}

#[async_trait::async_trait]
impl Connector for FakeConnector {
    type Connection = FakeConnection;

    async fn connect(&self, _: &PeerEndpoint) -> Result<FakeConnection, TransportError> {
        let mut state = self.peer.lock();
        let id = state.num_connects;
        state.num_connects += 1;

        match state.connect_failures.pop_front() {
            Some(e) => Err(e),
            None => Ok(FakeConnection {
                peer: self.peer.clone(),
                id,
            }),
        }
    }
}

#[derive(Clone)]
pub(crate) struct FakeConnection {
    peer: FakePeer,
    // Which dial produced this connection. 0 is the initial connect.
    id: usize,
}

impl FakeConnection {
    pub(crate) fn id(&self) -> usize {
        self.id
    }
}

#[async_trait::async_trait]
impl RpcConnection for FakeConnection {
    async fn call<Req, Rsp>(&self, method: &'static str, _: Req) -> Result<Rsp, ConnectionError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Rsp: prost::Message + Default + Send + Sync + 'static,
    {
        let outcome = {
            let mut state = self.peer.lock();
            state.calls.push((method, self.id));
            state.call_outcomes.pop_front()
        };

        match outcome {
            None => Ok(Rsp::default()),
            Some(FakeOutcome::Reply(bytes)) => Rsp::decode(bytes.as_slice()).map_err(|e| ConnectionError::Status {
                code: tonic::Code::Internal,
                message: e.to_string(),
            }),
            Some(FakeOutcome::Shutdown) => Err(ConnectionError::Shutdown {
                reason: "fake shutdown".into(),
            }),
            Some(FakeOutcome::Status(code)) => Err(ConnectionError::Status {
                code,
                message: "fake status".into(),
            }),
            Some(FakeOutcome::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Rsp::default())
            }
        }
    }
}
