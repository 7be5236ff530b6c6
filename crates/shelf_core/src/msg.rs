use crate::{LookupParameters, NetworkError, RequestId, ResultSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed submit with these parameters.
    Submit(LookupParameters),
    /// Announcer timer fired.
    Tick { request_id: RequestId },
    /// Collaborator answered (or failed) for a request.
    LookupDone {
        request_id: RequestId,
        outcome: Result<ResultSet, NetworkError>,
    },
    /// Owning UI is closing.
    TearDown,
}
