use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VerificationKind {
    Photo,
    Age,
}

impl VerificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Age => "age",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("Unknown verification status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VerificationRequest {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: VerificationKind,
    pub status: VerificationStatus,
    pub image_path: String,
    /// Set only on rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A request joined with the submitting user's name and email.
#[derive(Debug, Clone, FromRow)]
pub struct VerificationWithUser {
    #[sqlx(flatten)]
    pub request: VerificationRequest,
    pub user_name: String,
    pub user_email: String,
}
