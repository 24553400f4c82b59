use serde::Deserialize;
use validator::Validate;

use super::model::NewCounsellor;

pub const RECOMMENDATION_LIMIT: i64 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct CounsellorsQuery {
    /// Comma-separated specialty tags; every tag must match.
    pub specialties: Option<String>,
}

impl CounsellorsQuery {
    pub fn specialty_list(&self) -> Vec<String> {
        self.specialties
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCounsellorRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Role is required"))]
    pub role: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Total ratings cannot be negative"))]
    pub total_ratings: i64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl From<CreateCounsellorRequest> for NewCounsellor {
    fn from(req: CreateCounsellorRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            role: req.role.trim().to_string(),
            experience: req.experience,
            qualification: req.qualification,
            price: req.price,
            rating: req.rating,
            total_ratings: req.total_ratings,
            image_url: req.image_url,
            specialties: req
                .specialties
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            available: req.available,
        }
    }
}
