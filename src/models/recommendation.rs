use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Book recommendation produced as a byproduct of an AI analysis merge.
/// Append-only: never created by a direct user action, never cascade-deleted
/// with its source review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Assigned by the store on save
    pub id: Option<i64>,
    pub source_book_id: i64,
    pub review_id: Option<i64>,
    pub title: String,
    pub author: String,
    pub reason: String,
    /// Whatever range the analysis service returns; not normalized here.
    pub similarity_score: f64,
    pub created_at: DateTime<Utc>,
}
