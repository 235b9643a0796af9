//! Request extractors that reject bad input before a handler runs.

use axum::{
  extract::{FromRequest, FromRequestParts, Json, Path, Request},
  http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::AppError;

/// JSON body that has been deserialized and passed its `Validate` rules.
///
/// Malformed JSON keeps axum's own status (400/415/422); rule violations are 422.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
  S: Send + Sync,
  T: DeserializeOwned + Validate + Send,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|rejection| AppError::new(rejection.status(), rejection.body_text()))?;

    value
      .validate()
      .map_err(|e| AppError::unprocessable_entity(format!("Validation failed: {}", e)))?;

    Ok(Self(value))
  }
}

/// `{id}` path segment parsed as a positive user id.
pub struct UserId(pub i32);

impl<S> FromRequestParts<S> for UserId
where
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
      .await
      .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    parse_user_id(&raw).map(Self)
  }
}

pub fn parse_user_id(raw: &str) -> Result<i32, AppError> {
  match raw.parse::<i32>() {
    Ok(id) if id > 0 => Ok(id),
    _ => Err(AppError::bad_request(format!(
      "Invalid user id {:?}: expected a positive integer",
      raw
    ))),
  }
}
