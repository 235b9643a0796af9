use sqlx::{
  postgres::{PgConnectOptions, PgPoolOptions},
  PgPool,
};

use crate::config::DatabaseConfig;

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
  PgConnectOptions::new()
    .host(&config.host)
    .port(config.port)
    .username(&config.user)
    .password(&config.password)
    .database(&config.database)
}

/// Opens the connection pool and checks that the database is reachable.
///
/// Every repository call checks a connection out of this pool for a single
/// statement and hands it back when the guard drops, on success and on error.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
  PgPoolOptions::new()
    .max_connections(config.max_connections)
    .acquire_timeout(config.acquire_timeout)
    .connect_with(connect_options(config))
    .await
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  fn config() -> DatabaseConfig {
    DatabaseConfig {
      host: "db.internal".to_string(),
      user: "api".to_string(),
      password: "s3cret".to_string(),
      database: "users".to_string(),
      port: 6543,
      max_connections: 3,
      acquire_timeout: Duration::from_secs(1),
    }
  }

  #[test]
  fn connect_options_use_every_configured_field() {
    let options = connect_options(&config());

    assert_eq!(options.get_host(), "db.internal");
    assert_eq!(options.get_port(), 6543);
    assert_eq!(options.get_username(), "api");
    assert_eq!(options.get_database(), Some("users"));
  }
}
