use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: i64,           // expiration time
    pub iat: i64,           // issued at
    pub jti: String,        // unique token id
}

pub struct JwtService {
    secret: String,
    token_duration: Duration,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        Self::with_token_duration(secret, Duration::hours(24))
    }

    pub fn with_token_duration(secret: String, token_duration: Duration) -> Self {
        Self {
            secret,
            token_duration,
        }
    }

    pub fn create_token(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + self.token_duration;

        let claims = Claims {
            user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Checks signature and `exp`; returns the embedded claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }

    pub fn token_duration_secs(&self) -> i64 {
        self.token_duration.num_seconds()
    }
}
