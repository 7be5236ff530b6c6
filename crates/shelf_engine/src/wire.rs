//! JSON shapes exchanged with the lookup backend.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub shelf: String,
    pub biblio: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupResponse {
    pub books: Vec<CatalogBook>,
}

/// A book as the backend sends it. Missing or null fields become empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogBook {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cover_image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_record_link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub call_number: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
