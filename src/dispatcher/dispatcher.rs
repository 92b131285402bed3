use crate::transport::{ConnectionError, Connector, RpcConnection, TransportClient, TransportError};

/// CallDispatcher executes one remote call at a time per invocation, with a uniform policy:
///
/// * Connection shut down underneath us: reconnect and re-issue the call, at most
///   `max_reconnects_per_call` times. A failed reconnect ends the call with that error.
/// * Anything else (timeout, remote status): returned as-is. Never retried here; the caller owns
///   retry and backoff.
pub struct CallDispatcher<C: Connector> {
    logger: slog::Logger,
    transport: TransportClient<C>,
    max_reconnects_per_call: u32,
}

impl<C: Connector> CallDispatcher<C> {
    pub fn new(logger: slog::Logger, transport: TransportClient<C>, max_reconnects_per_call: u32) -> Self {
        CallDispatcher {
            logger,
            transport,
            max_reconnects_per_call,
        }
    }

    pub fn transport(&self) -> &TransportClient<C> {
        &self.transport
    }

    pub async fn invoke<Req, Rsp>(&self, method: &'static str, request: Req) -> Result<Rsp, TransportError>
    where
        Req: prost::Message + Clone + Send + Sync + 'static,
        Rsp: prost::Message + Default + Send + Sync + 'static,
    {
        let logger = self.logger.new(slog::o!("Method" => method));
        let addr = self.transport.endpoint().addr();
        let timeout = self.transport.endpoint().timeout();
        let mut reconnects_left = self.max_reconnects_per_call;

        loop {
            let live = self.transport.current().await;

            slog::debug!(logger, "ClientWire - {:?}", request);
            let reply = tokio::time::timeout(timeout, live.connection.call(method, request.clone())).await;
            slog::debug!(logger, "ClientWire - {:?}", reply);

            match reply {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(ConnectionError::Shutdown { reason })) => {
                    if reconnects_left == 0 {
                        slog::warn!(logger, "Connection shut down ({}), no reconnects left for this call", reason);
                        return Err(TransportError::ConnectionShutdown { addr: addr.to_string() });
                    }
                    reconnects_left -= 1;

                    slog::info!(logger, "Connection shut down ({}). Reconnecting.", reason);
                    self.transport.reconnect_if_current(live.generation).await?;
                }
                Ok(Err(ConnectionError::Status { code, message })) => {
                    slog::info!(logger, "rpc call error: {:?} {}", code, message);
                    return Err(TransportError::Call {
                        addr: addr.to_string(),
                        method,
                        reason: format!("{:?}: {}", code, message),
                    });
                }
                Err(_timeout) => {
                    slog::info!(logger, "rpc call timed out after {:?}", timeout);
                    return Err(TransportError::Timeout {
                        addr: addr.to_string(),
                        after: timeout,
                    });
                }
            }
        }
    }
}
