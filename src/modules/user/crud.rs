use chrono::Utc;
use sqlx::types::Json;

use super::model::{NewUser, ProfileChanges, User};
use crate::config::DbPool;

pub struct UserCrud {
    pool: DbPool,
}

impl UserCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &NewUser) -> Result<User, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    /// Applies the allow-listed fields; returns the refreshed row, or `None`
    /// when the user does not exist.
    pub async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE(?, name),
                location = COALESCE(?, location),
                consultation_preferences = COALESCE(?, consultation_preferences),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.name.as_deref())
        .bind(changes.location.as_deref())
        .bind(changes.consultation_preferences.as_ref().map(Json))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    pub async fn update_location(&self, id: i64, location: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET location = ?, updated_at = ? WHERE id = ?")
            .bind(location)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn update_preferences(
        &self,
        id: i64,
        preferences: &[String],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET consultation_preferences = ?, updated_at = ? WHERE id = ?",
        )
        .bind(Json(preferences))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_profile_photo(&self, id: i64, path: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET profile_photo_url = ?, updated_at = ? WHERE id = ?")
            .bind(path)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
