use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::Session;
use crate::modules::counsellor::model::Counsellor;

/// The only accepted booking timestamp shape: `2025-03-01T10:30:00Z`.
pub const SESSION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Deserialize, Validate)]
pub struct BookSessionRequest {
    pub counsellor_id: i64,
    pub session_date: String,
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes"))]
    pub duration: i64,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Notes are too long"))]
    pub notes: String,
}

pub fn parse_session_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, SESSION_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: Session,
    pub counsellor: Counsellor,
}
