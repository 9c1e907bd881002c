//! GraphQL query execution.

use anyhow::{Context, Result};
use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, instrument, trace, warn};

use crate::client::GitHubClient;
use crate::consts::{ACCEPT, USER_AGENT};
use crate::models::GraphQlResponse;

impl GitHubClient {
  /// Run a GraphQL query and decode its `data` as `T`.
  ///
  /// `owner` and `name` are always bound to the client's repository;
  /// `variables` may add more bindings or override those two.
  ///
  /// # Errors
  ///
  /// Returns an error if the request cannot be sent, authentication fails,
  /// the API answers with a non-success status or GraphQL errors, or the
  /// response does not match `T`.
  #[instrument(skip(self, document), level = "debug")]
  pub async fn query<T: DeserializeOwned>(&self, document: &str, variables: Value) -> Result<T> {
    let body = json!({
      "query": document,
      "variables": self.bind_variables(variables),
    });

    trace!("GraphQL API URL: {}", self.api_url);

    let mut request = self
      .client
      .post(&self.api_url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT)
      .json(&body);
    if let Some(token) = &self.auth.token {
      request = request.bearer_auth(token);
    }

    let response = request
      .send()
      .await
      .context(format!("POST {} failed", self.api_url))?;

    let status = response.status();
    debug!("GitHub API response status: {}", status);

    match status {
      s if s.is_success() => {}
      reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
        warn!("Authentication failed when accessing GitHub API");
        return Err(anyhow::anyhow!(
          "Authentication failed. Please check the GitHub token."
        ));
      }
      _ => {
        let error_text = response.text().await.unwrap_or_default();
        warn!("Unexpected GitHub API error: HTTP {} - {}", status, error_text);
        return Err(anyhow::anyhow!("Unexpected error: HTTP {status} - {error_text}"));
      }
    }

    let payload = response
      .json::<GraphQlResponse<Value>>()
      .await
      .context("Failed to decode GraphQL response")?;

    if !payload.errors.is_empty() {
      for error in &payload.errors {
        debug!(
          "GraphQL error ({}): {}",
          error.kind.as_deref().unwrap_or("UNKNOWN"),
          error.message
        );
      }
      let messages = payload
        .errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
      warn!("GraphQL query returned {} error(s)", payload.errors.len());
      return Err(anyhow::anyhow!("GraphQL error: {messages}"));
    }

    let data = payload
      .data
      .ok_or_else(|| anyhow::anyhow!("GraphQL response contained no data"))?;
    serde_json::from_value(data).context("Failed to decode GraphQL response")
  }

  fn bind_variables(&self, variables: Value) -> Map<String, Value> {
    let mut bound = Map::new();
    bound.insert("owner".to_string(), Value::String(self.repo.owner.clone()));
    bound.insert("name".to_string(), Value::String(self.repo.name.clone()));
    if let Value::Object(extra) = variables {
      bound.extend(extra);
    }
    bound
  }
}
