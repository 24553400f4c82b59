use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{ProfileChanges, User};

// =============================================================================
// PROFILE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub photo_verified: bool,
    pub age_verified: bool,
    pub location: Option<String>,
    pub profile_photo_url: Option<String>,
    pub verification_photo_url: Option<String>,
    pub age_verification_photo_url: Option<String>,
    pub consultation_preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_verified: user.is_verified,
            photo_verified: user.photo_verified,
            age_verified: user.age_verified,
            location: user.location,
            profile_photo_url: user.profile_photo_url,
            verification_photo_url: user.verification_photo_url,
            age_verification_photo_url: user.age_verification_photo_url,
            consultation_preferences: user.consultation_preferences.0,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Only these keys may be patched; anything else is rejected.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 200, message = "Location is too long"))]
    pub location: Option<String>,
    pub consultation_preferences: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            name: self.name.map(|n| n.trim().to_string()),
            location: self.location.map(|l| l.trim().to_string()),
            consultation_preferences: self.consultation_preferences.map(normalize_preferences),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

// =============================================================================
// LOCATION & PREFERENCES
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct LocationRequest {
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PreferencesRequest {
    pub preferences: Vec<String>,
}

/// Trims entries and drops blanks, keeping the caller's order.
pub fn normalize_preferences(preferences: Vec<String>) -> Vec<String> {
    preferences
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// =============================================================================
// PHOTO UPLOAD
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PhotoUploadResponse {
    pub upload_url: String,
    pub image_url: String,
}
