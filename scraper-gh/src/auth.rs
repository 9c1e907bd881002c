//! Authentication helpers for the GitHub client.
//!
//! The scraper authenticates with a single pre-provisioned token. These helpers
//! pick it up from the environment when it is not given explicitly and build a
//! ready-to-use client and runtime.

use std::env;

use anyhow::{Context, Result};
use scraper_core::{ENV_GITHUB_TOKEN, RepoCoordinates};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::{GitHubClient, create_github_client};

/// Read the GitHub token from the environment.
///
/// An empty value is treated as unset.
pub fn token_from_env() -> Option<String> {
  env::var(ENV_GITHUB_TOKEN).ok().filter(|token| !token.trim().is_empty())
}

/// Resolve the token to use: an explicit one wins over the environment.
pub fn resolve_github_token(explicit: Option<String>) -> Option<String> {
  match explicit.filter(|token| !token.trim().is_empty()) {
    Some(token) => {
      debug!("Using GitHub token from the command line");
      Some(token)
    }
    None => token_from_env(),
  }
}

/// Creates a GitHub client, resolving the token as [`resolve_github_token`]
/// does.
///
/// A missing token is only warned about: the API rejects the first request.
pub fn create_github_client_with_token(explicit: Option<String>, repo: RepoCoordinates) -> GitHubClient {
  let token = resolve_github_token(explicit);
  if token.is_none() {
    warn!(
      "No GitHub token provided. Set {} or pass --token; the API will likely reject the request.",
      ENV_GITHUB_TOKEN
    );
  }
  create_github_client(token.as_deref(), repo)
}

/// Creates a tokio runtime and a GitHub client.
pub fn create_github_runtime_and_client(
  explicit: Option<String>,
  repo: RepoCoordinates,
) -> Result<(Runtime, GitHubClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let client = create_github_client_with_token(explicit, repo);
  Ok((rt, client))
}
