use thiserror::Error;

use crate::RequestId;

/// Rejections produced by the coordinator. None of these are fatal; they are
/// recorded as data and the request state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("a lookup is already in flight")]
    Busy,
    #[error("response for request {request_id} arrived after it stopped being current")]
    StaleResponse { request_id: RequestId },
    #[error("the lookup session has been closed")]
    Closed,
    #[error("status message sequence must not be empty")]
    EmptySequence,
}
