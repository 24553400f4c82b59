use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::user::schema::UserResponse;
use crate::modules::verification::model::VerificationStatus;

// =============================================================================
// REGISTER
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserResponse,
}

// =============================================================================
// VERIFICATION UPLOADS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct VerificationSubmittedResponse {
    pub message: &'static str,
    pub status: VerificationStatus,
    pub request_id: i64,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
