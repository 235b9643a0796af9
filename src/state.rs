use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::user::{
  model::{MessageResponse, UserLookup, UserPayload, UserSummary},
  repository::SqlxUserRepository,
  service::{UserService, UserServiceError, UserServiceImpl},
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn create_user(
    &self,
    req: UserPayload,
  ) -> impl std::future::Future<Output = Result<MessageResponse, UserServiceError>> + Send;
  fn list_users(&self) -> impl std::future::Future<Output = Result<Vec<UserSummary>, UserServiceError>> + Send;
  fn get_user(&self, id: i32) -> impl std::future::Future<Output = Result<UserLookup, UserServiceError>> + Send;
  fn update_user(
    &self,
    id: i32,
    req: UserPayload,
  ) -> impl std::future::Future<Output = Result<MessageResponse, UserServiceError>> + Send;
  fn delete_user(&self, id: i32) -> impl std::future::Future<Output = Result<MessageResponse, UserServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<dyn UserService>,
}

impl SharedAppState {
  pub fn new(pool: PgPool) -> Self {
    let user_repository = SqlxUserRepository::new(pool);
    Self::with_service(Arc::new(UserServiceImpl::new(user_repository)))
  }

  pub fn with_service(user_service: Arc<dyn UserService>) -> Self {
    Self { user_service }
  }
}

impl AppState for SharedAppState {
  async fn create_user(&self, req: UserPayload) -> Result<MessageResponse, UserServiceError> {
    self.user_service.create_user(req).await
  }

  async fn list_users(&self) -> Result<Vec<UserSummary>, UserServiceError> {
    self.user_service.list_users().await
  }

  async fn get_user(&self, id: i32) -> Result<UserLookup, UserServiceError> {
    self.user_service.get_user(id).await
  }

  async fn update_user(&self, id: i32, req: UserPayload) -> Result<MessageResponse, UserServiceError> {
    self.user_service.update_user(id, req).await
  }

  async fn delete_user(&self, id: i32) -> Result<MessageResponse, UserServiceError> {
    self.user_service.delete_user(id).await
  }
}
