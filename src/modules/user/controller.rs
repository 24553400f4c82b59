use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::extract::{take_file_field, ValidatedJson};
use crate::modules::user::{
    crud::UserCrud,
    schema::{
        normalize_preferences, LocationRequest, MessageResponse, PhotoUploadResponse,
        PreferencesRequest, ProfileUpdatedResponse, UpdateProfileRequest, UserResponse,
    },
};
use crate::services::auth_guard::AuthUser;
use crate::services::storage::UploadPurpose;
use crate::AppState;

// =============================================================================
// GET /users/profile
// =============================================================================

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let crud = UserCrud::new(state.db.clone());

    let profile = crud
        .find_by_id(user.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(profile.into()))
}

// =============================================================================
// PUT /users/profile
// =============================================================================

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileUpdatedResponse>> {
    let changes = req.into_changes();

    if changes.is_empty() {
        return Err(ApiError::validation("No updatable fields provided"));
    }
    if changes.name.as_deref() == Some("") {
        return Err(ApiError::validation("Name must not be blank"));
    }
    if changes.location.as_deref() == Some("") {
        return Err(ApiError::validation("Location must not be blank"));
    }

    let crud = UserCrud::new(state.db.clone());
    let updated = crud
        .update_profile(user.id, &changes)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully",
        user: updated.into(),
    }))
}

// =============================================================================
// POST /users/location
// =============================================================================

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<LocationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let location = req.location.trim();
    if location.is_empty() {
        return Err(ApiError::validation("Location is required"));
    }

    let crud = UserCrud::new(state.db.clone());
    if !crud.update_location(user.id, location).await? {
        return Err(ApiError::NotFound("User"));
    }

    Ok(Json(MessageResponse {
        message: "Location updated successfully",
    }))
}

// =============================================================================
// POST /users/preferences
// =============================================================================

pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<PreferencesRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let preferences = normalize_preferences(req.preferences);

    let crud = UserCrud::new(state.db.clone());
    if !crud.update_preferences(user.id, &preferences).await? {
        return Err(ApiError::NotFound("User"));
    }

    tracing::info!(user_id = user.id, count = preferences.len(), "Consultation preferences updated");

    Ok(Json(MessageResponse {
        message: "Consultation preferences updated successfully",
    }))
}

// =============================================================================
// POST /users/upload-photo
// =============================================================================

pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<PhotoUploadResponse>> {
    let upload = take_file_field(multipart, "photo", "Photo upload required").await?;

    let crud = UserCrud::new(state.db.clone());
    if crud.find_by_id(user.id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }

    let stored = state
        .uploads
        .save(UploadPurpose::ProfilePhoto, user.id, &upload.file_name, &upload.bytes)
        .await?;

    match crud.set_profile_photo(user.id, &stored.path).await {
        Ok(true) => {}
        Ok(false) => {
            state.uploads.discard(&stored).await;
            return Err(ApiError::NotFound("User"));
        }
        Err(e) => {
            state.uploads.discard(&stored).await;
            return Err(e.into());
        }
    }

    Ok(Json(PhotoUploadResponse {
        image_url: format!("/uploads/{}/{}", UploadPurpose::ProfilePhoto.directory(), stored.file_name),
        upload_url: stored.path,
    }))
}
