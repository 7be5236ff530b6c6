//! Maps request state to what the results area should show.

use crate::{BookRecord, RequestState};

pub const EMPTY_NOTICE: &str = "None of the books on that shelf are available at this branch.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultView {
    /// Nothing requested yet, or still waiting.
    #[default]
    Nothing,
    /// Lookup succeeded with zero books.
    Empty,
    /// Lookup failed; the message is meant for the user.
    Failed { message: String },
    Books(Vec<BookEntry>),
}

/// One row of the result list, keyed by call number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub key: String,
    pub record: BookRecord,
}

pub fn render(state: &RequestState) -> ResultView {
    match state {
        RequestState::Idle | RequestState::InFlight { .. } => ResultView::Nothing,
        RequestState::Settled {
            outcome: Err(err), ..
        } => ResultView::Failed {
            message: err.message.clone(),
        },
        RequestState::Settled {
            outcome: Ok(books), ..
        } if books.is_empty() => ResultView::Empty,
        RequestState::Settled {
            outcome: Ok(books), ..
        } => ResultView::Books(
            books
                .iter()
                .map(|record| BookEntry {
                    key: record.catalog_call_number.clone(),
                    record: record.clone(),
                })
                .collect(),
        ),
    }
}
