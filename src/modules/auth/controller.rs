use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::extract::{take_file_field, ValidatedJson};
use crate::modules::auth::schema::{
    normalize_email, AuthResponse, LoginRequest, RegisterRequest, VerificationSubmittedResponse,
};
use crate::modules::user::{
    crud::UserCrud,
    model::{NewUser, User},
};
use crate::modules::verification::{
    crud::VerificationCrud,
    model::{VerificationKind, VerificationStatus},
};
use crate::services::auth_guard::AuthUser;
use crate::services::hashing;
use crate::services::storage::UploadPurpose;
use crate::AppState;

fn issue_token(state: &AppState, user: User) -> ApiResult<AuthResponse> {
    let token = state
        .jwt_service
        .create_token(user.id)
        .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))?;

    Ok(AuthResponse {
        token,
        token_type: "Bearer",
        expires_in: state.jwt_service.token_duration_secs(),
        user: user.into(),
    })
}

// =============================================================================
// POST /auth/register
// =============================================================================

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    let email = normalize_email(&req.email);

    let crud = UserCrud::new(state.db.clone());

    if crud.email_exists(&email).await? {
        return Err(ApiError::conflict("User already exists"));
    }

    let password_hash = hashing::hash_password(&req.password)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    let new_user = NewUser {
        name: name.to_string(),
        email,
        password_hash,
    };

    let user = match crud.create(&new_user).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration for the same email.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::conflict("User already exists"));
        }
        Err(e) => return Err(e.into()),
    };

    state.metrics.users_registered_total.inc();
    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

// =============================================================================
// POST /auth/login
// =============================================================================

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let crud = UserCrud::new(state.db.clone());

    // Unknown email and wrong password must be indistinguishable.
    let user = crud
        .find_by_email(&normalize_email(&req.email))
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let is_valid = hashing::verify_password(&req.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Stored password hash unreadable: {}", e)))?;

    if !is_valid {
        tracing::warn!(user_id = user.id, "Login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(Json(issue_token(&state, user)?))
}

// =============================================================================
// POST /auth/verify-photo, POST /auth/verify-age
// =============================================================================

pub async fn verify_photo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<VerificationSubmittedResponse>> {
    let upload = take_file_field(multipart, "photo", "Photo upload required").await?;

    submit_verification(&state, user, VerificationKind::Photo, &upload.file_name, &upload.bytes)
        .await
        .map(|request_id| {
            Json(VerificationSubmittedResponse {
                message: "Photo uploaded successfully for verification",
                status: VerificationStatus::Pending,
                request_id,
            })
        })
}

pub async fn verify_age(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<VerificationSubmittedResponse>> {
    let upload = take_file_field(multipart, "id_document", "ID document upload required").await?;

    submit_verification(&state, user, VerificationKind::Age, &upload.file_name, &upload.bytes)
        .await
        .map(|request_id| {
            Json(VerificationSubmittedResponse {
                message: "ID document uploaded successfully for age verification",
                status: VerificationStatus::Pending,
                request_id,
            })
        })
}

async fn submit_verification(
    state: &AppState,
    user: AuthUser,
    kind: VerificationKind,
    file_name: &str,
    bytes: &[u8],
) -> ApiResult<i64> {
    let purpose = match kind {
        VerificationKind::Photo => UploadPurpose::VerificationPhoto,
        VerificationKind::Age => UploadPurpose::AgeDocument,
    };

    let stored = state.uploads.save(purpose, user.id, file_name, bytes).await?;

    let request = match VerificationCrud::new(state.db.clone())
        .submit(user.id, kind, &stored.path)
        .await
    {
        Ok(request) => request,
        Err(e) => {
            state.uploads.discard(&stored).await;
            return Err(e.into());
        }
    };

    state.metrics.record_verification_upload(kind.as_str());
    tracing::info!(
        user_id = user.id,
        request_id = request.id,
        kind = kind.as_str(),
        "Verification request submitted"
    );

    Ok(request.id)
}
