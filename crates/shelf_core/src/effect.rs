use std::time::Duration;

use crate::{LookupParameters, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Begin delivering `Msg::Tick` for this request every `interval`.
    StartTicker {
        request_id: RequestId,
        interval: Duration,
    },
    /// Send the one network call for this request.
    Lookup {
        request_id: RequestId,
        params: LookupParameters,
    },
    /// Cancel the ticker for this request. No tick may follow.
    StopTicker { request_id: RequestId },
}
