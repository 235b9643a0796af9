use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use super::model::UserSummary;

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<i32, sqlx::Error>;
  async fn find_all(&self) -> Result<Vec<UserSummary>, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<UserSummary>, sqlx::Error>;
  async fn update(&self, id: i32, name: &str, email: &str, password: &str) -> Result<u64, sqlx::Error>;
  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error>;
}

/// Postgres-backed repository.
///
/// Each method checks one connection out of the pool, runs exactly one
/// statement on it and returns it to the pool when `conn` goes out of scope,
/// whichever way the statement ends.
pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(&self, name: &str, email: &str, password: &str) -> Result<i32, sqlx::Error> {
    let mut conn = self.pool.acquire().await?;
    create_with_executor(&mut *conn, name, email, password).await
  }

  async fn find_all(&self) -> Result<Vec<UserSummary>, sqlx::Error> {
    let mut conn = self.pool.acquire().await?;
    find_all_with_executor(&mut *conn).await
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<UserSummary>, sqlx::Error> {
    let mut conn = self.pool.acquire().await?;
    find_by_id_with_executor(&mut *conn, id).await
  }

  async fn update(&self, id: i32, name: &str, email: &str, password: &str) -> Result<u64, sqlx::Error> {
    let mut conn = self.pool.acquire().await?;
    update_with_executor(&mut *conn, id, name, email, password).await
  }

  async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
    let mut conn = self.pool.acquire().await?;
    delete_with_executor(&mut *conn, id).await
  }
}

async fn create_with_executor<'e, E>(executor: E, name: &str, email: &str, password: &str) -> Result<i32, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_scalar::<_, i32>(
    r#"
      INSERT INTO users (name, email, password)
      VALUES ($1, $2, $3)
      RETURNING id
    "#,
  )
  .bind(name)
  .bind(email)
  .bind(password)
  .fetch_one(executor)
  .await
}

// No ORDER BY: callers must not rely on row order.
async fn find_all_with_executor<'e, E>(executor: E) -> Result<Vec<UserSummary>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, UserSummary>("SELECT id, name, email FROM users")
    .fetch_all(executor)
    .await
}

async fn find_by_id_with_executor<'e, E>(executor: E, id: i32) -> Result<Option<UserSummary>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query_as::<_, UserSummary>("SELECT id, name, email FROM users WHERE id = $1")
    .bind(id)
    .fetch_optional(executor)
    .await
}

async fn update_with_executor<'e, E>(
  executor: E,
  id: i32,
  name: &str,
  email: &str,
  password: &str,
) -> Result<u64, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let result = sqlx::query("UPDATE users SET name = $1, email = $2, password = $3 WHERE id = $4")
    .bind(name)
    .bind(email)
    .bind(password)
    .bind(id)
    .execute(executor)
    .await?;

  Ok(result.rows_affected())
}

async fn delete_with_executor<'e, E>(executor: E, id: i32) -> Result<u64, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let result = sqlx::query("DELETE FROM users WHERE id = $1")
    .bind(id)
    .execute(executor)
    .await?;

  Ok(result.rows_affected())
}
