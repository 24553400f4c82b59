use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{VerificationRequest, VerificationWithUser};

#[derive(Debug, Deserialize)]
pub struct VerificationListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerificationUserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct VerificationListItem {
    #[serde(flatten)]
    pub request: VerificationRequest,
    pub user: VerificationUserSummary,
}

impl From<VerificationWithUser> for VerificationListItem {
    fn from(row: VerificationWithUser) -> Self {
        Self {
            user: VerificationUserSummary {
                id: row.request.user_id,
                name: row.user_name,
                email: row.user_email,
            },
            request: row.request,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectVerificationRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct VerificationDecisionResponse {
    pub message: &'static str,
    pub verification: VerificationRequest,
}
