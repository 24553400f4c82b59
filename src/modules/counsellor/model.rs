use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Counsellor {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub experience: String,
    pub qualification: String,
    pub price: String,
    pub rating: f64,
    pub total_ratings: i64,
    pub image_url: String,
    pub specialties: Json<Vec<String>>,
    /// New sessions can only be booked while this is set.
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCounsellor {
    pub name: String,
    pub role: String,
    pub experience: String,
    pub qualification: String,
    pub price: String,
    pub rating: f64,
    pub total_ratings: i64,
    pub image_url: String,
    pub specialties: Vec<String>,
    pub available: bool,
}
