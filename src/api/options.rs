use std::convert::TryFrom;

/// Upper bound on reconnects a single call may trigger. Anything larger can starve a caller when a
/// peer keeps accepting connections and then dropping them.
const MAX_RECONNECTS_PER_CALL_LIMIT: u32 = 10;

#[derive(Clone, Default)]
pub struct RpcClientOptions {
    /// How many times one call may reconnect and re-issue after finding its connection shut down.
    /// Defaults to 1.
    pub max_reconnects_per_call: Option<u32>,
}

pub(super) struct RpcClientOptionsValidated {
    pub max_reconnects_per_call: u32,
}

impl RpcClientOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.max_reconnects_per_call > MAX_RECONNECTS_PER_CALL_LIMIT {
            return Err("Max reconnects per call must be at most 10");
        }

        Ok(())
    }
}

impl TryFrom<RpcClientOptions> for RpcClientOptionsValidated {
    type Error = &'static str;

    fn try_from(options: RpcClientOptions) -> Result<Self, Self::Error> {
        let values = RpcClientOptionsValidated {
            max_reconnects_per_call: options.max_reconnects_per_call.unwrap_or(1),
        };

        values.validate()?;
        Ok(values)
    }
}
