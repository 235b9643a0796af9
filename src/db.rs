use sqlx::{
  migrate::{MigrateError, Migrator},
  PgPool,
};

pub mod pool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates the `users` table if it does not exist yet. Safe to call on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), MigrateError> {
  MIGRATOR.run(pool).await
}
