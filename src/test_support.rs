use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
  body::{Body, Bytes},
  http::{Method, Request, StatusCode},
  Router,
};
use serde::Serialize;
use tower::ServiceExt;

use crate::{
  app::create_app,
  config::CorsConfig,
  domains::user::{
    model::UserSummary,
    repository::UserRepository,
    service::UserServiceImpl,
  },
  state::SharedAppState,
};

mockall::mock! {
  pub UserRepository {}

  #[async_trait]
  impl UserRepository for UserRepository {
    async fn create(&self, name: &str, email: &str, password: &str) -> Result<i32, sqlx::Error>;
    async fn find_all(&self) -> Result<Vec<UserSummary>, sqlx::Error>;
    async fn find_by_id(&self, id: i32) -> Result<Option<UserSummary>, sqlx::Error>;
    async fn update(&self, id: i32, name: &str, email: &str, password: &str) -> Result<u64, sqlx::Error>;
    async fn delete(&self, id: i32) -> Result<u64, sqlx::Error>;
  }
}

#[derive(Debug, Clone)]
struct StoredUser {
  id: i32,
  name: String,
  email: String,
  password: String,
}

#[derive(Debug, Default)]
struct Table {
  next_id: i32,
  rows: Vec<StoredUser>,
}

/// Stand-in for the `users` table, including its unique index on `email`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
  table: Mutex<Table>,
}

impl InMemoryUserRepository {
  pub fn password_of(&self, id: i32) -> Option<String> {
    let table = self.table.lock().expect("users table lock");
    table.rows.iter().find(|row| row.id == id).map(|row| row.password.clone())
  }
}

fn unique_violation() -> sqlx::Error {
  sqlx::Error::Protocol("duplicate key value violates unique constraint \"users_email_key\"".to_string())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<i32, sqlx::Error> {
    let mut table = self.table.lock().expect("users table lock");
    if table.rows.iter().any(|row| row.email == email) {
      return Err(unique_violation());
    }

    table.next_id += 1;
    let id = table.next_id;
    table.rows.push(StoredUser {
      id,
      name: name.to_string(),
      email: email.to_string(),
      password: password.to_string(),
    });
    Ok(id)
  }

  async fn find_all(&self) -> Result<Vec<UserSummary>, sqlx::Error> {
    let table = self.table.lock().expect("users table lock");
    Ok(
      table
        .rows
        .iter()
        .map(|row| UserSummary {
          id: row.id,
          name: row.name.clone(),
          email: row.email.clone(),
        })
        .collect(),
    )
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<UserSummary>, sqlx::Error> {
    Ok(self.find_all().await?.into_iter().find(|user| user.id == id))
  }

  async fn update(&self, id: i32, name: &str, email: &str, password: &str) -> Result<u64, sqlx::Error> {
    let mut table = self.table.lock().expect("users table lock");
    if table.rows.iter().any(|row| row.id != id && row.email == email) {
      return Err(unique_violation());
    }

    match table.rows.iter_mut().find(|row| row.id == id) {
      Some(row) => {
        row.name = name.to_string();
        row.email = email.to_string();
        row.password = password.to_string();
        Ok(1)
      }
      None => Ok(0),
    }
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let mut table = self.table.lock().expect("users table lock");
    let before = table.rows.len();
    table.rows.retain(|row| row.id != id);
    Ok((before - table.rows.len()) as u64)
  }
}

#[async_trait]
impl<R> UserRepository for Arc<R>
where
  R: UserRepository + ?Sized,
{
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<i32, sqlx::Error> {
    (**self).create(name, email, password).await
  }

  async fn find_all(&self) -> Result<Vec<UserSummary>, sqlx::Error> {
    (**self).find_all().await
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<UserSummary>, sqlx::Error> {
    (**self).find_by_id(id).await
  }

  async fn update(&self, id: i32, name: &str, email: &str, password: &str) -> Result<u64, sqlx::Error> {
    (**self).update(id, name, email, password).await
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    (**self).delete(id).await
  }
}

pub fn app_with_repository<R>(repository: R) -> Router
where
  R: UserRepository + 'static,
{
  let state = SharedAppState::with_service(Arc::new(UserServiceImpl::new(repository)));
  create_app(state, &CorsConfig::default())
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

async fn send_json<T: Serialize>(app: Router, method: Method, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request");

  send(app, request).await
}

async fn send_empty(app: Router, method: Method, uri: &str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method(method)
    .uri(uri)
    .body(Body::empty())
    .expect("build request");

  send(app, request).await
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send_json(app, Method::POST, uri, body).await
}

pub async fn put_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send_json(app, Method::PUT, uri, body).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send_empty(app, Method::GET, uri).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send_empty(app, Method::DELETE, uri).await
}
