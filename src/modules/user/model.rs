use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub photo_verified: bool,
    pub age_verified: bool,
    pub location: Option<String>,
    pub profile_photo_url: Option<String>,
    pub verification_photo_url: Option<String>,
    pub age_verification_photo_url: Option<String>,
    pub consultation_preferences: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Allow-listed profile fields; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub location: Option<String>,
    pub consultation_preferences: Option<Vec<String>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none() && self.consultation_preferences.is_none()
    }
}
