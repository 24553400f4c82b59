use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub counsellor_id: i64,
    pub session_date: DateTime<Utc>,
    /// Minutes.
    pub duration: i64,
    pub status: SessionStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub counsellor_id: i64,
    pub session_date: DateTime<Utc>,
    pub duration: i64,
    pub notes: String,
}
