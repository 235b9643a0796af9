use async_trait::async_trait;
use std::error::Error;

use super::{
  model::{MessageResponse, UserLookup, UserPayload, UserSummary},
  repository::UserRepository,
};

#[derive(Debug)]
pub enum UserServiceError {
  /// Any storage failure. Carries the driver's message as-is.
  InternalServerError(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl From<sqlx::Error> for UserServiceError {
  fn from(err: sqlx::Error) -> Self {
    tracing::error!("Database error: {:?}", err);
    UserServiceError::InternalServerError(err.to_string())
  }
}

#[async_trait]
pub trait UserService: Send + Sync {
  async fn create_user(&self, req: UserPayload) -> Result<MessageResponse, UserServiceError>;
  async fn list_users(&self) -> Result<Vec<UserSummary>, UserServiceError>;
  async fn get_user(&self, id: i32) -> Result<UserLookup, UserServiceError>;
  async fn update_user(&self, id: i32, req: UserPayload) -> Result<MessageResponse, UserServiceError>;
  async fn delete_user(&self, id: i32) -> Result<MessageResponse, UserServiceError>;
}

pub struct UserServiceImpl<U> {
  user_repository: U,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U) -> Self {
    Self { user_repository }
  }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn create_user(&self, req: UserPayload) -> Result<MessageResponse, UserServiceError> {
    let user_id = self
      .user_repository
      .create(&req.name, &req.email, &req.password)
      .await?;

    tracing::info!("Created user {}", user_id);
    Ok(MessageResponse::new(format!("User {} created!", req.name)))
  }

  async fn list_users(&self) -> Result<Vec<UserSummary>, UserServiceError> {
    Ok(self.user_repository.find_all().await?)
  }

  async fn get_user(&self, id: i32) -> Result<UserLookup, UserServiceError> {
    let lookup = match self.user_repository.find_by_id(id).await? {
      Some(user) => UserLookup::Found(user),
      None => UserLookup::Missing(MessageResponse::no_user_found(id)),
    };

    Ok(lookup)
  }

  async fn update_user(&self, id: i32, req: UserPayload) -> Result<MessageResponse, UserServiceError> {
    let rows = self
      .user_repository
      .update(id, &req.name, &req.email, &req.password)
      .await?;

    tracing::info!("Updated user {} ({} rows)", id, rows);
    Ok(MessageResponse::new(format!("{} user updated.", rows)))
  }

  async fn delete_user(&self, id: i32) -> Result<MessageResponse, UserServiceError> {
    let rows = self.user_repository.delete(id).await?;

    if rows == 0 {
      return Ok(MessageResponse::no_user_found(id));
    }

    tracing::info!("Deleted user {}", id);
    Ok(MessageResponse::new(format!("user #{} deleted", id)))
  }
}
