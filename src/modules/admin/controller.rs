use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::extract::{IdPath, ValidatedJson, ValidatedQuery};
use crate::modules::counsellor::{
    crud::CounsellorCrud, model::Counsellor, schema::CreateCounsellorRequest,
};
use crate::modules::verification::{
    crud::VerificationCrud,
    model::VerificationStatus,
    schema::{
        RejectVerificationRequest, VerificationDecisionResponse, VerificationListItem,
        VerificationListQuery,
    },
};
use crate::AppState;

// =============================================================================
// POST /admin/counsellors
// =============================================================================

pub async fn create_counsellor(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateCounsellorRequest>,
) -> ApiResult<(StatusCode, Json<Counsellor>)> {
    if req.name.trim().is_empty() || req.role.trim().is_empty() {
        return Err(ApiError::validation("Name and role are required"));
    }

    let counsellor = CounsellorCrud::new(state.db.clone())
        .create(&req.into())
        .await?;

    tracing::info!(counsellor_id = counsellor.id, "Counsellor created");

    Ok((StatusCode::CREATED, Json(counsellor)))
}

// =============================================================================
// GET /admin/verifications
// =============================================================================

pub async fn list_verifications(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<VerificationListQuery>,
) -> ApiResult<Json<Vec<VerificationListItem>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<VerificationStatus>)
        .transpose()
        .map_err(ApiError::Validation)?;

    let rows = VerificationCrud::new(state.db.clone()).list(status).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// =============================================================================
// POST /admin/verifications/{id}/approve
// =============================================================================

pub async fn approve_verification(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> ApiResult<Json<VerificationDecisionResponse>> {
    let request = VerificationCrud::new(state.db.clone()).approve(id).await?;

    state
        .metrics
        .record_verification_decision(request.kind.as_str(), request.status.as_str());
    tracing::info!(
        request_id = id,
        user_id = request.user_id,
        kind = request.kind.as_str(),
        "Verification approved"
    );

    Ok(Json(VerificationDecisionResponse {
        message: "Verification approved successfully",
        verification: request,
    }))
}

// =============================================================================
// POST /admin/verifications/{id}/reject
// =============================================================================

pub async fn reject_verification(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<RejectVerificationRequest>,
) -> ApiResult<Json<VerificationDecisionResponse>> {
    let reason = req.reason.trim();
    if reason.is_empty() {
        return Err(ApiError::validation("Rejection reason required"));
    }

    let request = VerificationCrud::new(state.db.clone())
        .reject(id, reason)
        .await?;

    state
        .metrics
        .record_verification_decision(request.kind.as_str(), request.status.as_str());
    tracing::info!(
        request_id = id,
        user_id = request.user_id,
        kind = request.kind.as_str(),
        "Verification rejected"
    );

    Ok(Json(VerificationDecisionResponse {
        message: "Verification rejected successfully",
        verification: request,
    }))
}
