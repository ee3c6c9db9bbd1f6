use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::{StatusCode, request::Parts};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// JSON body that is deserialized and then checked with `validator`.
/// Both failures become a 400 in the usual error envelope; a body over the
/// size limit keeps its 413.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::Status(StatusCode::PAYLOAD_TOO_LARGE),
                _ => AppError::BadRequest(e.body_text()),
            })?;

        data.validate()
            .map_err(|e| AppError::BadRequest(e.to_string().replace('\n', "; ")))?;

        Ok(ValidatedJson(data))
    }
}

pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Uuid::parse_str(&id)
            .map(UuidPath)
            .map_err(|_| AppError::BadRequest(format!("invalid id: {id}")))
    }
}
