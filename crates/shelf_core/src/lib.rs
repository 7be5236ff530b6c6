//! Shelf core: pure request lifecycle state machine and view-model helpers.
mod announcer;
mod catalog;
mod coordinator;
mod effect;
mod error;
mod model;
mod msg;
mod presenter;
mod update;
mod view_model;

pub use announcer::{
    ProgressAnnouncer, StatusMessage, StatusMessageSequence, DEFAULT_TICK_INTERVAL,
};
pub use catalog::{resolve_branch, resolve_system, Branch, LibrarySystem, LIBRARY_SYSTEMS};
pub use coordinator::{Lifecycle, RequestCoordinator, RequestState};
pub use effect::Effect;
pub use error::LookupError;
pub use model::{BookRecord, LookupParameters, NetworkError, RequestId, ResultSet};
pub use msg::Msg;
pub use presenter::{render, BookEntry, ResultView, EMPTY_NOTICE};
pub use update::update;
pub use view_model::{AppViewModel, Phase};
