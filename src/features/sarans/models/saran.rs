use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A resident suggestion. Append-only: never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Saran {
    pub id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields written when a saran is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaranPayload {
    pub author_name: String,
    pub content: String,
}
