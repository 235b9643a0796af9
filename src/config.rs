use std::{env, fmt, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;

const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_APP_HOST: &str = "0.0.0.0";
const DEFAULT_APP_PORT: u16 = 8000;

#[derive(Clone)]
pub struct DatabaseConfig {
  pub host: String,
  pub user: String,
  pub password: String,
  pub database: String,
  pub port: u16,
  pub max_connections: u32,
  pub acquire_timeout: Duration,
}

// Keeps the password out of startup logs.
impl fmt::Debug for DatabaseConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DatabaseConfig")
      .field("host", &self.host)
      .field("user", &self.user)
      .field("password", &"***")
      .field("database", &self.database)
      .field("port", &self.port)
      .field("max_connections", &self.max_connections)
      .field("acquire_timeout", &self.acquire_timeout)
      .finish()
  }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
  /// Reflect whatever origin the caller sends.
  Any,
  List(Vec<HeaderValue>),
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
  pub allowed_origins: AllowedOrigins,
  pub allow_credentials: bool,
}

impl Default for CorsConfig {
  fn default() -> Self {
    Self {
      allowed_origins: AllowedOrigins::Any,
      allow_credentials: true,
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database: DatabaseConfig,
  pub server: ServerConfig,
  pub cors: CorsConfig,
}

impl AppConfig {
  /// Reads the configuration from the process environment.
  ///
  /// `.env` loading is left to the caller so tests stay hermetic.
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let database = DatabaseConfig {
      host: required(&lookup, "DB_HOST")?,
      user: required(&lookup, "DB_USER")?,
      password: required(&lookup, "DB_PASSWORD")?,
      database: required(&lookup, "DB_NAME")?,
      port: parse_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
      max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
      acquire_timeout: Duration::from_secs(parse_or(
        &lookup,
        "DB_ACQUIRE_TIMEOUT_SECS",
        DEFAULT_ACQUIRE_TIMEOUT_SECS,
      )?),
    };

    if database.max_connections == 0 {
      return Err(anyhow!("DB_MAX_CONNECTIONS must be greater than zero."));
    }

    let server = ServerConfig {
      host: optional(&lookup, "APP_HOST").unwrap_or_else(|| DEFAULT_APP_HOST.to_string()),
      port: parse_or(&lookup, "APP_PORT", DEFAULT_APP_PORT)?,
    };

    let cors = CorsConfig {
      allowed_origins: match optional(&lookup, "CORS_ALLOWED_ORIGINS") {
        Some(raw) => parse_origins(&raw)?,
        None => AllowedOrigins::Any,
      },
      allow_credentials: match optional(&lookup, "CORS_ALLOW_CREDENTIALS") {
        Some(raw) => parse_bool("CORS_ALLOW_CREDENTIALS", &raw)?,
        None => true,
      },
    };

    Ok(Self { database, server, cors })
  }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
  F: Fn(&str) -> Option<String>,
{
  lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
  F: Fn(&str) -> Option<String>,
{
  optional(lookup, key).ok_or_else(|| anyhow!("{} environment variable must be set.", key))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match optional(lookup, key) {
    Some(raw) => raw
      .parse()
      .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
    None => Ok(default),
  }
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
  match raw.to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" => Ok(true),
    "false" | "0" | "no" => Ok(false),
    _ => Err(anyhow!("{} must be a boolean, got {:?}", key, raw)),
  }
}

fn parse_origins(raw: &str) -> anyhow::Result<AllowedOrigins> {
  let entries: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();

  if entries.is_empty() || entries.contains(&"*") {
    return Ok(AllowedOrigins::Any);
  }

  let origins = entries
    .into_iter()
    .map(|origin| {
      HeaderValue::from_str(origin).with_context(|| format!("CORS_ALLOWED_ORIGINS contains an invalid origin: {:?}", origin))
    })
    .collect::<anyhow::Result<Vec<_>>>()?;

  Ok(AllowedOrigins::List(origins))
}
