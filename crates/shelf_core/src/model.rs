use thiserror::Error;

pub type RequestId = u64;

/// What the user asked for. Fields are forwarded verbatim, empty strings included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupParameters {
    pub external_user_id: String,
    pub shelf_name: String,
    pub library_system_id: String,
    pub branch_id: String,
}

impl LookupParameters {
    pub fn new(
        external_user_id: impl Into<String>,
        shelf_name: impl Into<String>,
        library_system_id: impl Into<String>,
        branch_id: impl Into<String>,
    ) -> Self {
        Self {
            external_user_id: external_user_id.into(),
            shelf_name: shelf_name.into(),
            library_system_id: library_system_id.into(),
            branch_id: branch_id.into(),
        }
    }
}

/// One catalog hit, passed through from the collaborator untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image_url: String,
    pub record_link: String,
    pub catalog_call_number: String,
}

/// Books in collaborator order. Empty is a valid answer.
pub type ResultSet = Vec<BookRecord>;

/// A failed lookup, carrying a message fit for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
