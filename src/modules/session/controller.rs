use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::crud::SessionCrud;
use super::model::{NewSession, Session};
use super::schema::{parse_session_date, BookSessionRequest, SessionResponse};
use crate::error::{ApiError, ApiResult};
use crate::extract::{IdPath, ValidatedJson};
use crate::modules::counsellor::crud::CounsellorCrud;
use crate::services::auth_guard::AuthUser;
use crate::AppState;

/// Attaches each session's counsellor, fetched in one query.
async fn with_counsellors(state: &AppState, sessions: Vec<Session>) -> ApiResult<Vec<SessionResponse>> {
    let mut ids: Vec<i64> = sessions.iter().map(|s| s.counsellor_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let counsellors = CounsellorCrud::new(state.db.clone()).find_by_ids(&ids).await?;

    sessions
        .into_iter()
        .map(|session| {
            let counsellor = counsellors
                .get(&session.counsellor_id)
                .cloned()
                .ok_or_else(|| {
                    ApiError::Internal(format!(
                        "Session {} references missing counsellor {}",
                        session.id, session.counsellor_id
                    ))
                })?;
            Ok(SessionResponse { session, counsellor })
        })
        .collect()
}

async fn with_counsellor(state: &AppState, session: Session) -> ApiResult<SessionResponse> {
    let counsellor = CounsellorCrud::new(state.db.clone())
        .find_by_id(session.counsellor_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(format!(
                "Session {} references missing counsellor {}",
                session.id, session.counsellor_id
            ))
        })?;

    Ok(SessionResponse { session, counsellor })
}

// =============================================================================
// POST /sessions/book
// =============================================================================

pub async fn book_session(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<BookSessionRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let session_date = parse_session_date(&req.session_date).ok_or_else(|| {
        ApiError::validation("Invalid session date format, expected YYYY-MM-DDTHH:MM:SSZ")
    })?;

    let counsellor = CounsellorCrud::new(state.db.clone())
        .find_by_id(req.counsellor_id)
        .await?
        .ok_or(ApiError::NotFound("Counsellor"))?;

    if !counsellor.available {
        return Err(ApiError::validation("Counsellor is not available"));
    }

    let session = SessionCrud::new(state.db.clone())
        .create(&NewSession {
            user_id: user.id,
            counsellor_id: counsellor.id,
            session_date,
            duration: req.duration,
            notes: req.notes.trim().to_string(),
        })
        .await?;

    state.metrics.sessions_booked_total.inc();
    tracing::info!(
        user_id = user.id,
        session_id = session.id,
        counsellor_id = counsellor.id,
        "Session booked"
    );

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse { session, counsellor }),
    ))
}

// =============================================================================
// GET /sessions
// =============================================================================

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<SessionResponse>>> {
    let sessions = SessionCrud::new(state.db.clone())
        .list_for_user(user.id)
        .await?;

    Ok(Json(with_counsellors(&state, sessions).await?))
}

// =============================================================================
// GET /sessions/{id}
// =============================================================================

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<SessionResponse>> {
    let session = SessionCrud::new(state.db.clone())
        .find_for_user(id, user.id)
        .await?
        .ok_or(ApiError::NotFound("Session"))?;

    Ok(Json(with_counsellor(&state, session).await?))
}

// =============================================================================
// PUT /sessions/{id}/cancel
// =============================================================================

pub async fn cancel_session(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<SessionResponse>> {
    let crud = SessionCrud::new(state.db.clone());

    if !crud.cancel_for_user(id, user.id).await? {
        return Err(ApiError::NotFound("Session"));
    }

    state.metrics.sessions_cancelled_total.inc();
    tracing::info!(user_id = user.id, session_id = id, "Session cancelled");

    let session = crud
        .find_for_user(id, user.id)
        .await?
        .ok_or(ApiError::NotFound("Session"))?;

    Ok(Json(with_counsellor(&state, session).await?))
}
