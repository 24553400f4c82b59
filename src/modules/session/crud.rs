use chrono::Utc;

use super::model::{NewSession, Session, SessionStatus};
use crate::config::DbPool;

pub struct SessionCrud {
    pool: DbPool,
}

impl SessionCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, session: &NewSession) -> Result<Session, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO sessions (user_id, counsellor_id, session_date, duration, status, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.user_id)
        .bind(session.counsellor_id)
        .bind(session.session_date)
        .bind(session.duration)
        .bind(SessionStatus::Pending)
        .bind(&session.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_for_user(result.last_insert_rowid(), session.user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Newest `session_date` first.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE user_id = ? ORDER BY session_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_for_user(&self, id: i64, user_id: i64) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Overwrites the status whatever it was. `false` when the session does
    /// not exist or belongs to someone else.
    pub async fn cancel_for_user(&self, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET status = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(SessionStatus::Cancelled)
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
