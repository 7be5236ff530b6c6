//! Periodic tick delivery for the status announcer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use shelf_logging::{set_current_request, shelf_debug};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, RequestId};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Something that can start and stop a per-request tick stream.
pub trait Scheduler: Send + Sync {
    fn start(&self, request_id: RequestId, interval: Duration);
    fn stop(&self, request_id: RequestId);
    fn stop_all(&self);
}

type ActiveTimers = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs one tokio interval task per request.
///
/// The active map is locked both while emitting and while stopping, so once
/// `stop` returns the task can no longer emit for that request.
pub struct TokioTicker {
    runtime: tokio::runtime::Handle,
    sink: Arc<dyn EventSink>,
    root: CancellationToken,
    active: ActiveTimers,
}

impl TokioTicker {
    pub fn new(runtime: tokio::runtime::Handle, sink: Arc<dyn EventSink>) -> Self {
        Self::with_root(runtime, sink, CancellationToken::new())
    }

    /// Ties every timer to `root`; cancelling it silences all of them.
    pub fn with_root(
        runtime: tokio::runtime::Handle,
        sink: Arc<dyn EventSink>,
        root: CancellationToken,
    ) -> Self {
        Self {
            runtime,
            sink,
            root,
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn active_count(&self) -> usize {
        lock(&self.active).len()
    }
}

impl Scheduler for TokioTicker {
    fn start(&self, request_id: RequestId, period: Duration) {
        // tokio intervals panic on a zero period.
        let period = period.max(Duration::from_millis(1));
        let token = self.root.child_token();
        {
            let mut active = lock(&self.active);
            // Only one request is ever in flight; anything older is dead.
            for (_, previous) in active.drain() {
                previous.cancel();
            }
            active.insert(request_id, token.clone());
        }
        shelf_debug!("Ticker started for request {} every {:?}", request_id, period);

        let sink = self.sink.clone();
        let active = self.active.clone();
        self.runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let _guard = lock(&active);
                        if token.is_cancelled() {
                            break;
                        }
                        set_current_request(request_id);
                        sink.emit(EngineEvent::Tick { request_id });
                    }
                }
            }
        });
    }

    fn stop(&self, request_id: RequestId) {
        if let Some(token) = lock(&self.active).remove(&request_id) {
            token.cancel();
            shelf_debug!("Ticker stopped for request {}", request_id);
        }
    }

    fn stop_all(&self) {
        let mut active = lock(&self.active);
        for (_, token) in active.drain() {
            token.cancel();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
