use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::collection::{Collection, MutationError};
use crate::{config::Config, models::Stored, validation::FormSchema};

/// Table exposed by the backend's REST gateway (`/rest/v1/{table}`).
pub struct RestCollection<T> {
    client: Client,
    base_url: String,
    table: String,
    anon_key: String,
    bearer: String,
    _rows: PhantomData<fn() -> T>,
}

impl<T> RestCollection<T> {
    pub fn new(config: &Config, table: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
            table: table.to_string(),
            anon_key: config.backend_anon_key.clone(),
            bearer: config.bearer_token().to_string(),
            _rows: PhantomData,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer))
            .header("Accept", "application/json")
    }
}

impl<T: FormSchema> RestCollection<T> {
    pub fn for_schema(config: &Config) -> anyhow::Result<Self> {
        Self::new(config, T::TABLE)
    }
}

#[async_trait]
impl<T> Collection<T> for RestCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn list(&self) -> Result<Vec<Stored<T>>, MutationError> {
        let response = self
            .authorize(self.client.get(self.endpoint()))
            .query(&[("select", "*")])
            .send()
            .await?;
        let rows = ensure_success(response).await?.json().await?;
        Ok(rows)
    }

    async fn create(&self, payload: &T) -> Result<Stored<T>, MutationError> {
        tracing::debug!(table = %self.table, "POST row");
        let response = self
            .authorize(self.client.post(self.endpoint()))
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        single_row(ensure_success(response).await?).await
    }

    async fn update(&self, id: Uuid, payload: &T) -> Result<Stored<T>, MutationError> {
        tracing::debug!(table = %self.table, %id, "PATCH row");
        let response = self
            .authorize(self.client.patch(self.endpoint()))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        single_row(ensure_success(response).await?).await
    }
}

async fn ensure_success(response: Response) -> Result<Response, MutationError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    tracing::warn!("backend error {}: {}", status, text);
    Err(error_from_body(&text))
}

async fn single_row<T: DeserializeOwned>(response: Response) -> Result<Stored<T>, MutationError> {
    let rows: Vec<Stored<T>> = response.json().await?;
    rows.into_iter()
        .next()
        .ok_or_else(|| MutationError::new("The server did not return the saved record"))
}

/// Pulls a human-readable message out of an error body. Bodies without one
/// yield an error that falls back to the generic message.
pub fn error_from_body(body: &str) -> MutationError {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "error_description", "msg", "error"]
            .iter()
            .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
    });
    match message {
        Some(m) if !m.trim().is_empty() => MutationError::new(m),
        _ => MutationError::without_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::court::Court;

    fn config() -> Config {
        Config {
            backend_url: "https://db.example.test".into(),
            backend_anon_key: "anon".into(),
            backend_access_token: Some("jwt".into()),
            request_timeout_seconds: 5,
        }
    }

    #[test]
    fn test_endpoint_uses_schema_table() {
        let courts = RestCollection::<Court>::for_schema(&config()).unwrap();
        assert_eq!(courts.endpoint(), "https://db.example.test/rest/v1/courts");
        assert_eq!(courts.bearer, "jwt");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_from_body(r#"{"code":"23505","message":"duplicate key value"}"#).message.as_deref(),
            Some("duplicate key value")
        );
        assert_eq!(
            error_from_body(r#"{"error":"invalid_grant","error_description":"Token expired"}"#)
                .message
                .as_deref(),
            Some("Token expired")
        );
        assert_eq!(error_from_body("<html>502</html>").message, None);
        assert_eq!(error_from_body(r#"{"message":""}"#).message, None);
    }
}
