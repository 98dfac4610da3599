use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::Stored;

/// Shown when a failed mutation carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Rejection from the data backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
pub struct MutationError {
    pub message: Option<String>,
}

impl MutationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }

    /// The message to show the user.
    pub fn user_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
    }
}

impl From<reqwest::Error> for MutationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MutationError::new("The server took too long to respond")
        } else if e.is_connect() {
            MutationError::new("Could not reach the server")
        } else {
            tracing::warn!("backend request failed: {e}");
            MutationError::without_message()
        }
    }
}

/// Data access for one backend table.
#[async_trait]
pub trait Collection<T>: Send + Sync
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn list(&self) -> Result<Vec<Stored<T>>, MutationError>;

    async fn create(&self, payload: &T) -> Result<Stored<T>, MutationError>;

    async fn update(&self, id: Uuid, payload: &T) -> Result<Stored<T>, MutationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_falls_back() {
        assert_eq!(MutationError::without_message().user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(MutationError::new("  ").user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(MutationError::new("Court name taken").user_message(), "Court name taken");
        assert_eq!(MutationError::without_message().to_string(), FALLBACK_ERROR_MESSAGE);
    }
}
