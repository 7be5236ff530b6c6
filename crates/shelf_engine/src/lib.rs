//! Shelf engine: collaborator IO, tick scheduling and effect execution.
mod client;
mod engine;
mod export;
mod persist;
mod ticker;
mod types;
mod wire;

pub use client::{Collaborator, CollaboratorSettings, ReqwestCollaborator};
pub use engine::{EngineEvents, EngineHandle};
pub use export::{export_csv, ExportError, ExportRow, ExportSummary};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use ticker::{ChannelEventSink, EventSink, Scheduler, TokioTicker};
pub use types::{EngineEvent, FailureKind, LookupFailure, RequestId};
pub use wire::{CatalogBook, LookupRequest, LookupResponse};
