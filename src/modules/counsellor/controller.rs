use axum::{
    extract::State,
    Json,
};
use std::sync::Arc;

use super::crud::CounsellorCrud;
use super::model::Counsellor;
use super::schema::{CounsellorsQuery, RECOMMENDATION_LIMIT};
use crate::error::{ApiError, ApiResult};
use crate::extract::{IdPath, ValidatedQuery};
use crate::modules::user::crud::UserCrud;
use crate::services::auth_guard::AuthUser;
use crate::AppState;

// =============================================================================
// GET /counsellors
// =============================================================================

pub async fn list_counsellors(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<CounsellorsQuery>,
) -> ApiResult<Json<Vec<Counsellor>>> {
    let crud = CounsellorCrud::new(state.db.clone());
    let counsellors = crud.list_available(&query.specialty_list()).await?;

    Ok(Json(counsellors))
}

// =============================================================================
// GET /counsellors/{id}
// =============================================================================

pub async fn get_counsellor(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Counsellor>> {
    let crud = CounsellorCrud::new(state.db.clone());

    crud.find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Counsellor"))
}

// =============================================================================
// GET /counsellors/recommended
// =============================================================================

pub async fn recommended_counsellors(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Counsellor>>> {
    let profile = UserCrud::new(state.db.clone())
        .find_by_id(user.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let crud = CounsellorCrud::new(state.db.clone());
    let counsellors = crud
        .recommended(&profile.consultation_preferences.0, RECOMMENDATION_LIMIT)
        .await?;

    Ok(Json(counsellors))
}
