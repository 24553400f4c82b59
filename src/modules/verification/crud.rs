use chrono::Utc;

use super::model::{VerificationKind, VerificationRequest, VerificationStatus, VerificationWithUser};
use crate::config::DbPool;
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("User not found")]
    UserNotFound,

    #[error("Verification request not found")]
    RequestNotFound,

    #[error("Verification request has already been resolved")]
    AlreadyResolved,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::UserNotFound => ApiError::NotFound("User"),
            VerificationError::RequestNotFound => ApiError::NotFound("Verification request"),
            VerificationError::AlreadyResolved => {
                ApiError::conflict("Verification request has already been resolved")
            }
            VerificationError::Database(e) => ApiError::Database(e),
        }
    }
}

pub struct VerificationCrud {
    pool: DbPool,
}

impl VerificationCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Records the uploaded document path on the user and opens a pending
    /// request, both in one transaction.
    pub async fn submit(
        &self,
        user_id: i64,
        kind: VerificationKind,
        image_path: &str,
    ) -> Result<VerificationRequest, VerificationError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let user_update = match kind {
            VerificationKind::Photo => {
                "UPDATE users SET verification_photo_url = ?, updated_at = ? WHERE id = ?"
            }
            VerificationKind::Age => {
                "UPDATE users SET age_verification_photo_url = ?, updated_at = ? WHERE id = ?"
            }
        };

        let updated = sqlx::query(user_update)
            .bind(image_path)
            .bind(now)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(VerificationError::UserNotFound);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO verification_requests (user_id, kind, status, image_path, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(VerificationStatus::Pending)
        .bind(image_path)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let request = sqlx::query_as::<_, VerificationRequest>(
            "SELECT * FROM verification_requests WHERE id = ?",
        )
        .bind(inserted.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<VerificationRequest>, sqlx::Error> {
        sqlx::query_as::<_, VerificationRequest>("SELECT * FROM verification_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Newest first, optionally narrowed to one status.
    pub async fn list(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<VerificationWithUser>, sqlx::Error> {
        sqlx::query_as::<_, VerificationWithUser>(
            r#"
            SELECT v.*, u.name AS user_name, u.email AS user_email
            FROM verification_requests v
            JOIN users u ON u.id = v.user_id
            WHERE (? IS NULL OR v.status = ?)
            ORDER BY v.created_at DESC, v.id DESC
            "#,
        )
        .bind(status)
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    /// Distinguishes "no such request" from "already resolved" after a
    /// conditional update matched nothing.
    async fn unresolvable(&self, id: i64) -> VerificationError {
        match self.find_by_id(id).await {
            Ok(Some(_)) => VerificationError::AlreadyResolved,
            Ok(None) => VerificationError::RequestNotFound,
            Err(e) => e.into(),
        }
    }

    /// pending -> approved, and raises the matching flag on the user.
    /// `is_verified` follows once both photo and age are verified.
    pub async fn approve(&self, id: i64) -> Result<VerificationRequest, VerificationError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // First statement writes: the write lock is taken up front, and a
        // concurrent approval waits here and then matches nothing.
        let resolved = sqlx::query(
            "UPDATE verification_requests SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(VerificationStatus::Approved)
        .bind(now)
        .bind(id)
        .bind(VerificationStatus::Pending)
        .execute(&mut *tx)
        .await?;

        if resolved.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(self.unresolvable(id).await);
        }

        let request = sqlx::query_as::<_, VerificationRequest>(
            "SELECT * FROM verification_requests WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        // Right-hand sides see the pre-update row.
        let flag_update = match request.kind {
            VerificationKind::Photo => {
                "UPDATE users SET photo_verified = 1, is_verified = age_verified, updated_at = ? WHERE id = ?"
            }
            VerificationKind::Age => {
                "UPDATE users SET age_verified = 1, is_verified = photo_verified, updated_at = ? WHERE id = ?"
            }
        };

        sqlx::query(flag_update)
            .bind(now)
            .bind(request.user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(request)
    }

    /// pending -> rejected with `reason`. User flags are left alone.
    pub async fn reject(
        &self,
        id: i64,
        reason: &str,
    ) -> Result<VerificationRequest, VerificationError> {
        let resolved = sqlx::query(
            r#"
            UPDATE verification_requests
            SET status = ?, reason = ?, updated_at = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(VerificationStatus::Rejected)
        .bind(reason)
        .bind(Utc::now())
        .bind(id)
        .bind(VerificationStatus::Pending)
        .execute(&self.pool)
        .await?;

        if resolved.rows_affected() == 0 {
            return Err(self.unresolvable(id).await);
        }

        self.find_by_id(id)
            .await?
            .ok_or(VerificationError::RequestNotFound)
    }
}
