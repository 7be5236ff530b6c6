use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use shelf_logging::{set_current_request, shelf_debug, shelf_error, shelf_info};
use tokio_util::sync::CancellationToken;

use crate::ticker::{ChannelEventSink, EventSink, Scheduler, TokioTicker};
use crate::{Collaborator, EngineEvent, LookupRequest, RequestId};

enum EngineCommand {
    Lookup {
        request_id: RequestId,
        request: LookupRequest,
    },
    StartTicker {
        request_id: RequestId,
        interval: Duration,
    },
    StopTicker {
        request_id: RequestId,
    },
    Shutdown,
}

/// Command side of the engine thread. Cheap to clone.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Event side of the engine thread.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts the engine thread with its own tokio runtime.
    pub fn spawn(collaborator: Arc<dyn Collaborator>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    shelf_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            run(&runtime, collaborator, cmd_rx, event_tx);
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn lookup(&self, request_id: RequestId, request: LookupRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Lookup {
            request_id,
            request,
        });
    }

    pub fn start_ticker(&self, request_id: RequestId, interval: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartTicker {
            request_id,
            interval,
        });
    }

    pub fn stop_ticker(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::StopTicker { request_id });
    }

    /// Stops every timer and silences responses that have not arrived yet.
    /// The network calls themselves are left to finish or die with the runtime.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

impl EngineEvents {
    /// Blocks for the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run(
    runtime: &tokio::runtime::Runtime,
    collaborator: Arc<dyn Collaborator>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let root = CancellationToken::new();
    let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
    let ticker = TokioTicker::with_root(runtime.handle().clone(), sink.clone(), root.clone());

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Lookup {
                request_id,
                request,
            } => {
                let collaborator = collaborator.clone();
                let sink = sink.clone();
                let token = root.child_token();
                runtime.spawn(async move {
                    set_current_request(request_id);
                    let result = collaborator.lookup(&request).await;
                    // The task may have moved to another worker thread.
                    set_current_request(request_id);
                    if token.is_cancelled() {
                        shelf_debug!("Dropping response for request {} after shutdown", request_id);
                        return;
                    }
                    if let Ok(books) = &result {
                        shelf_debug!("Backend returned {} books", books.len());
                    }
                    sink.emit(EngineEvent::LookupCompleted { request_id, result });
                });
            }
            EngineCommand::StartTicker {
                request_id,
                interval,
            } => ticker.start(request_id, interval),
            EngineCommand::StopTicker { request_id } => ticker.stop(request_id),
            EngineCommand::Shutdown => {
                shelf_info!("Engine shutting down");
                root.cancel();
                ticker.stop_all();
                break;
            }
        }
    }
}
