use anyhow::Context;
use tokio::signal;

use dotenvy::dotenv;

use users_api::app::create_app;
use users_api::config::AppConfig;
use users_api::db::{ensure_schema, pool::create_pool};
use users_api::state::SharedAppState;
use users_api::utils::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  init_tracing();

  let config = AppConfig::from_env()?;
  tracing::info!(database = ?config.database, "Configuration loaded");

  let pool = create_pool(&config.database)
    .await
    .context("Failed to create database pool")?;

  ensure_schema(&pool).await.context("Failed to create users table")?;

  tracing::info!("Users table is ready");

  let app_state = SharedAppState::new(pool);
  let app = create_app(app_state, &config.cors);

  let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
    .await
    .with_context(|| format!("Failed to bind {}:{}", config.server.host, config.server.port))?;

  tracing::info!("Server running on http://{}", listener.local_addr()?);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
