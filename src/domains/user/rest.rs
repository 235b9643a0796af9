use axum::{extract::State, response::Json as JsonResponse, routing::get, Router};

use super::model::{MessageResponse, UserLookup, UserPayload, UserSummary};
use crate::{
  extractors::{UserId, ValidatedJson},
  state::{AppState, SharedAppState},
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/users", get(list_users_handler).post(create_user_handler))
    .route(
      "/users/{id}",
      get(get_user_handler).put(update_user_handler).delete(delete_user_handler),
    )
}

pub async fn create_user_handler(
  State(state): State<SharedAppState>,
  ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  state.create_user(payload).await.map(JsonResponse).map_err(Into::into)
}

pub async fn list_users_handler(State(state): State<SharedAppState>) -> Result<JsonResponse<Vec<UserSummary>>, AppError> {
  state.list_users().await.map(JsonResponse).map_err(Into::into)
}

pub async fn get_user_handler(
  State(state): State<SharedAppState>,
  UserId(id): UserId,
) -> Result<JsonResponse<UserLookup>, AppError> {
  state.get_user(id).await.map(JsonResponse).map_err(Into::into)
}

pub async fn update_user_handler(
  State(state): State<SharedAppState>,
  UserId(id): UserId,
  ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  state.update_user(id, payload).await.map(JsonResponse).map_err(Into::into)
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  UserId(id): UserId,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  state.delete_user(id).await.map(JsonResponse).map_err(Into::into)
}
