use std::time::Duration;

use shelf_logging::{set_current_request, shelf_debug, shelf_info, shelf_warn};

use crate::{
    AppViewModel, Effect, LookupError, LookupParameters, NetworkError, Phase, ProgressAnnouncer,
    RequestId, ResultSet, DEFAULT_TICK_INTERVAL,
};

/// Where the single lookup currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight {
        request_id: RequestId,
        params: LookupParameters,
    },
    Settled {
        request_id: RequestId,
        outcome: Result<ResultSet, NetworkError>,
    },
}

impl RequestState {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            RequestState::Idle => None,
            RequestState::InFlight { request_id, .. } | RequestState::Settled { request_id, .. } => {
                Some(*request_id)
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight { .. })
    }
}

/// Whether the owning UI is still around to receive updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Mounted,
    Closed,
}

/// Owns the one outstanding lookup and the announcer that covers for it.
///
/// Nothing here performs IO. Every transition returns the [`Effect`]s the
/// platform must carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCoordinator {
    state: RequestState,
    announcer: ProgressAnnouncer,
    tick_interval: Duration,
    next_request_id: RequestId,
    lifecycle: Lifecycle,
    last_rejection: Option<LookupError>,
    dirty: bool,
}

impl Default for RequestCoordinator {
    fn default() -> Self {
        Self::new(ProgressAnnouncer::default(), DEFAULT_TICK_INTERVAL)
    }
}

impl RequestCoordinator {
    pub fn new(announcer: ProgressAnnouncer, tick_interval: Duration) -> Self {
        Self {
            state: RequestState::Idle,
            announcer,
            tick_interval,
            next_request_id: 1,
            lifecycle: Lifecycle::Mounted,
            last_rejection: None,
            dirty: false,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn announcer(&self) -> &ProgressAnnouncer {
        &self.announcer
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn last_rejection(&self) -> Option<&LookupError> {
        self.last_rejection.as_ref()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Moves to `InFlight`, starts the announcer and asks for exactly one
    /// lookup. A second submit while in flight is refused with `Busy` and
    /// leaves the announcer where it was.
    pub fn submit(&mut self, params: LookupParameters) -> Result<Vec<Effect>, LookupError> {
        if self.lifecycle == Lifecycle::Closed {
            return Err(LookupError::Closed);
        }
        if self.state.is_in_flight() {
            return Err(LookupError::Busy);
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        set_current_request(request_id);
        shelf_info!(
            "Submitting lookup {} shelf={} biblio={} branch={}",
            request_id,
            params.shelf_name,
            params.library_system_id,
            params.branch_id
        );

        self.state = RequestState::InFlight {
            request_id,
            params: params.clone(),
        };
        self.announcer.start();
        self.last_rejection = None;
        self.dirty = true;

        Ok(vec![
            Effect::StartTicker {
                request_id,
                interval: self.tick_interval,
            },
            Effect::Lookup { request_id, params },
        ])
    }

    /// Timer callback. Ticks for anything other than the current in-flight
    /// request are dropped; they can still be queued after a stop.
    pub fn tick(&mut self, request_id: RequestId) -> bool {
        if !self.is_current_in_flight(request_id) {
            shelf_debug!("Ignoring tick for request {}", request_id);
            return false;
        }
        let changed = self.announcer.tick();
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Stores the collaborator's answer and stops the announcer in the same
    /// step, so no tick can land between the two.
    pub fn settle(
        &mut self,
        request_id: RequestId,
        outcome: Result<ResultSet, NetworkError>,
    ) -> Result<Vec<Effect>, LookupError> {
        if !self.is_current_in_flight(request_id) {
            return Err(LookupError::StaleResponse { request_id });
        }

        match &outcome {
            Ok(books) => shelf_info!("Lookup {} settled with {} books", request_id, books.len()),
            Err(err) => shelf_warn!("Lookup {} failed: {}", request_id, err),
        }

        self.state = RequestState::Settled {
            request_id,
            outcome,
        };
        self.announcer.stop();
        self.dirty = true;
        Ok(vec![Effect::StopTicker { request_id }])
    }

    /// The owning UI is going away. Stops the timer if one runs; any response
    /// arriving afterwards is stale.
    pub fn tear_down(&mut self) -> Vec<Effect> {
        if self.lifecycle == Lifecycle::Closed {
            return Vec::new();
        }
        self.lifecycle = Lifecycle::Closed;
        let in_flight = match &self.state {
            RequestState::InFlight { request_id, .. } => Some(*request_id),
            _ => None,
        };
        self.announcer.stop();
        match in_flight {
            Some(request_id) => {
                shelf_info!("Tearing down with lookup {} still in flight", request_id);
                vec![Effect::StopTicker { request_id }]
            }
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> AppViewModel {
        let phase = match self.state {
            RequestState::Idle => Phase::Idle,
            RequestState::InFlight { .. } => Phase::InFlight,
            RequestState::Settled { .. } => Phase::Settled,
        };
        AppViewModel {
            phase,
            status: self.announcer.current().cloned(),
            results: crate::render(&self.state),
            submit_enabled: phase != Phase::InFlight && self.lifecycle == Lifecycle::Mounted,
            rejection: self.last_rejection.as_ref().map(ToString::to_string),
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn record_rejection(&mut self, error: LookupError) {
        match error {
            LookupError::StaleResponse { request_id } => {
                shelf_debug!("Discarding stale response for request {}", request_id);
            }
            other => {
                shelf_warn!("Submit rejected: {}", other);
                self.last_rejection = Some(other);
                self.dirty = true;
            }
        }
    }

    fn is_current_in_flight(&self, request_id: RequestId) -> bool {
        self.lifecycle == Lifecycle::Mounted
            && matches!(
                self.state,
                RequestState::InFlight { request_id: current, .. } if current == request_id
            )
    }
}
