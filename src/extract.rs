//! Request extractors that answer rejections with the crate's JSON error shape.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{ApiError, ApiResult};

fn body_error(status: StatusCode, text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::validation(text)
    }
}

/// JSON body that has been deserialized and passed its `validator` rules.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| body_error(rejection.status(), rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        Ok(Self(value))
    }
}

/// Query string deserialized into `T`; malformed input is a 400 like any
/// other validation failure.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// Numeric `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::validation("Invalid id"))?;

        Ok(Self(id))
    }
}

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Pull the single file field named `field` out of a multipart body.
/// Other fields are skipped.
pub async fn take_file_field(
    multipart: Result<Multipart, MultipartRejection>,
    field: &str,
    missing_message: &'static str,
) -> ApiResult<UploadedFile> {
    let mut multipart = multipart.map_err(|_| ApiError::validation(missing_message))?;

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?
    {
        if part.name() != Some(field) {
            continue;
        }

        let file_name = part.file_name().unwrap_or("upload").to_string();
        let bytes = part
            .bytes()
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;

        return Ok(UploadedFile {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::validation(missing_message))
}
