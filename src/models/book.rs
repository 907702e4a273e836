use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry. (title, author) doubles as a natural lookup key for
/// find-or-create, without a uniqueness guarantee at the store level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Assigned by the store on save
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(title: String, author: String, genre: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title,
            author,
            genre,
            isbn: None,
            publisher: None,
            description: None,
            cover_image_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
