//! # GitHub GraphQL Client
//!
//! HTTP client for GitHub's GraphQL API. A client is bound to one repository;
//! its coordinates are sent as variables with every query.

use reqwest::Client;
use scraper_core::RepoCoordinates;

use crate::consts::GRAPHQL_API_URL;
use crate::models::GitHubAuth;

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) api_url: String,
  pub(crate) auth: GitHubAuth,
  pub(crate) repo: RepoCoordinates,
}

impl GitHubClient {
  /// Create a new GitHub client for `repo` against the public API
  pub fn new(auth: GitHubAuth, repo: RepoCoordinates) -> Self {
    let client = Client::new();
    Self {
      client,
      api_url: GRAPHQL_API_URL.to_string(),
      auth,
      repo,
    }
  }

  /// Point the client at a different GraphQL endpoint, such as a GitHub
  /// Enterprise server
  pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
    self.api_url = api_url.into();
    self
  }

  /// The repository this client queries
  pub fn repo(&self) -> &RepoCoordinates {
    &self.repo
  }

  /// The GraphQL endpoint this client posts to
  pub fn api_url(&self) -> &str {
    &self.api_url
  }

  /// Whether a token will be sent with requests
  pub fn has_token(&self) -> bool {
    self.auth.token.is_some()
  }
}

/// Create a GitHub client from an optional token
pub fn create_github_client(token: Option<&str>, repo: RepoCoordinates) -> GitHubClient {
  let auth = GitHubAuth {
    token: token.map(str::to_string),
  };

  GitHubClient::new(auth, repo)
}
