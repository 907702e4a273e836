use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reader account. Owned by the account subsystem; the review core only
/// reads it (nickname denormalization, existence checks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
