use std::sync::{mpsc, Arc};
use std::thread;

use shelf_core::{BookRecord, Effect, LookupParameters, Msg, NetworkError};
use shelf_engine::{CatalogBook, Collaborator, EngineEvent, EngineEvents, EngineHandle, LookupRequest};
use shelf_logging::{shelf_info, shelf_warn};

/// Carries out core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(collaborator: Arc<dyn Collaborator>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (engine, events) = EngineHandle::spawn(collaborator);
        spawn_event_loop(events, msg_tx);
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartTicker {
                    request_id,
                    interval,
                } => self.engine.start_ticker(request_id, interval),
                Effect::Lookup { request_id, params } => {
                    shelf_info!(
                        "Lookup request_id={} user_len={} shelf={}",
                        request_id,
                        params.external_user_id.len(),
                        params.shelf_name
                    );
                    self.engine.lookup(request_id, to_request(&params));
                }
                Effect::StopTicker { request_id } => self.engine.stop_ticker(request_id),
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(to_msg(event)).is_err() {
                break;
            }
        }
    });
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Tick { request_id } => Msg::Tick { request_id },
        EngineEvent::LookupCompleted { request_id, result } => Msg::LookupDone {
            request_id,
            outcome: match result {
                Ok(books) => Ok(books.into_iter().map(to_record).collect()),
                Err(failure) => {
                    shelf_warn!("Lookup {} failed: {}", request_id, failure);
                    Err(NetworkError::new(failure.to_string()))
                }
            },
        },
    }
}

fn to_request(params: &LookupParameters) -> LookupRequest {
    LookupRequest {
        user_id: params.external_user_id.clone(),
        shelf: params.shelf_name.clone(),
        biblio: params.library_system_id.clone(),
        branch: params.branch_id.clone(),
    }
}

fn to_record(book: CatalogBook) -> BookRecord {
    BookRecord {
        title: book.title,
        author: book.author,
        description: book.description,
        cover_image_url: book.cover_image,
        record_link: book.full_record_link,
        catalog_call_number: book.call_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shelf_engine::{FailureKind, LookupFailure};

    #[test]
    fn params_map_to_backend_names() {
        let params = LookupParameters::new("1", "to-read", "sfpl", "MAIN");
        assert_eq!(
            to_request(&params),
            LookupRequest {
                user_id: "1".into(),
                shelf: "to-read".into(),
                biblio: "sfpl".into(),
                branch: "MAIN".into(),
            }
        );
    }

    #[test]
    fn completed_books_become_records() {
        let book = CatalogBook {
            title: "Dune".into(),
            author: "Herbert".into(),
            description: "d".into(),
            cover_image: "u1".into(),
            full_record_link: "l1".into(),
            call_number: "C1".into(),
        };
        let msg = to_msg(EngineEvent::LookupCompleted {
            request_id: 2,
            result: Ok(vec![book]),
        });
        assert_eq!(
            msg,
            Msg::LookupDone {
                request_id: 2,
                outcome: Ok(vec![BookRecord {
                    title: "Dune".into(),
                    author: "Herbert".into(),
                    description: "d".into(),
                    cover_image_url: "u1".into(),
                    record_link: "l1".into(),
                    catalog_call_number: "C1".into(),
                }]),
            }
        );
    }

    #[test]
    fn failures_become_displayable_errors() {
        let msg = to_msg(EngineEvent::LookupCompleted {
            request_id: 3,
            result: Err(LookupFailure {
                kind: FailureKind::HttpStatus(400),
                message: "No user id supplied!".into(),
            }),
        });
        assert_eq!(
            msg,
            Msg::LookupDone {
                request_id: 3,
                outcome: Err(NetworkError::new("http status 400: No user id supplied!")),
            }
        );
    }
}
