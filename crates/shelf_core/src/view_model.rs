use crate::{ResultView, StatusMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    /// Current announcer line; `None` unless a lookup is in flight.
    pub status: Option<StatusMessage>,
    pub results: ResultView,
    pub submit_enabled: bool,
    /// Why the last submit was refused, if it was.
    pub rejection: Option<String>,
}
