use std::fmt;

use shelf_core::{AppViewModel, BookEntry, ResultView, StatusMessage, EMPTY_NOTICE};

/// One line of terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Status(String),
    Notice(String),
    Error(String),
    Book { key: String, text: String },
}

impl Line {
    /// Status chatter goes to stderr so stdout stays a clean list of books.
    pub fn is_progress(&self) -> bool {
        matches!(self, Line::Status(_) | Line::Notice(_) | Line::Error(_))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Status(text) => write!(f, "... {text}"),
            Line::Notice(text) => write!(f, "{text}"),
            Line::Error(text) => write!(f, "Error: {text}"),
            Line::Book { key, text } => write!(f, "{key:<20} {text}"),
        }
    }
}

/// Remembers what is already on screen so only changes are printed.
#[derive(Debug, Default)]
pub struct Screen {
    last_status: Option<StatusMessage>,
    last_rejection: Option<String>,
    results_shown: bool,
}

impl Screen {
    pub fn render(&mut self, view: &AppViewModel) -> Vec<Line> {
        let mut lines = Vec::new();

        if view.status != self.last_status {
            if let Some(status) = &view.status {
                lines.push(Line::Status(status.to_string()));
            }
            self.last_status = view.status.clone();
        }

        if view.rejection != self.last_rejection {
            if let Some(reason) = &view.rejection {
                lines.push(Line::Notice(format!("Not submitted: {reason}")));
            }
            self.last_rejection = view.rejection.clone();
        }

        match &view.results {
            ResultView::Nothing => self.results_shown = false,
            _ if self.results_shown => {}
            results => {
                lines.extend(result_lines(results));
                self.results_shown = true;
            }
        }

        lines
    }
}

fn result_lines(results: &ResultView) -> Vec<Line> {
    match results {
        ResultView::Nothing => Vec::new(),
        ResultView::Empty => vec![Line::Notice(EMPTY_NOTICE.to_string())],
        ResultView::Failed { message } => vec![Line::Error(message.clone())],
        ResultView::Books(entries) => {
            let mut lines = vec![Line::Notice(format!("{} books available:", entries.len()))];
            lines.extend(entries.iter().map(book_line));
            lines
        }
    }
}

fn book_line(entry: &BookEntry) -> Line {
    let record = &entry.record;
    let text = if record.author.is_empty() {
        record.title.clone()
    } else {
        format!("{} by {}", record.title, record.author)
    };
    Line::Book {
        key: entry.key.clone(),
        text,
    }
}
