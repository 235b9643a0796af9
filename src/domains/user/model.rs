use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Read projection of a stored user. The password column is never selected.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Deserialize, Serialize)]
pub struct UserSummary {
  pub id: i32,
  pub name: String,
  pub email: String,
}

/// Body accepted by create and update. Update replaces all three fields.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UserPayload {
  #[validate(length(min = 1, message = "name must not be empty"))]
  pub name: String,
  #[validate(length(min = 1, message = "email must not be empty"))]
  pub email: String,
  #[validate(length(min = 1, message = "password must not be empty"))]
  pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
  pub message: String,
}

impl MessageResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }

  pub fn no_user_found(id: i32) -> Self {
    Self::new(format!("No user found with id {}.", id))
  }
}

/// Get-by-id answers 200 either way; a missing row becomes a message body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UserLookup {
  Found(UserSummary),
  Missing(MessageResponse),
}
