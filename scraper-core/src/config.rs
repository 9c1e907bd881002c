//! # Repository Configuration
//!
//! Identifies the repository whose issues are scanned and the environment
//! variable that carries the API token.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

/// Repository owner used when none is given on the command line.
pub const DEFAULT_OWNER: &str = "GoogleChrome";

/// Repository name used when none is given on the command line.
pub const DEFAULT_REPO: &str = "lighthouse";

/// Environment variable holding the GitHub token.
pub const ENV_GITHUB_TOKEN: &str = "GH_TOKEN_ISSUE_SCRAPER";

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
  pub owner: String,
  pub name: String,
}

impl RepoCoordinates {
  pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      name: name.into(),
    }
  }
}

impl Default for RepoCoordinates {
  fn default() -> Self {
    Self::new(DEFAULT_OWNER, DEFAULT_REPO)
  }
}

impl fmt::Display for RepoCoordinates {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

impl FromStr for RepoCoordinates {
  type Err = anyhow::Error;

  /// Parse `OWNER/NAME`.
  fn from_str(s: &str) -> Result<Self> {
    let trimmed = s.trim();
    match trimmed.split_once('/') {
      Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
        Ok(Self::new(owner, name))
      }
      _ => Err(anyhow::anyhow!(
        "Invalid repository '{s}'. Expected the form OWNER/NAME."
      )),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_coordinates() {
    let repo = RepoCoordinates::default();
    assert_eq!(repo.owner, "GoogleChrome");
    assert_eq!(repo.name, "lighthouse");
    assert_eq!(repo.to_string(), "GoogleChrome/lighthouse");
  }

  #[test]
  fn test_parse_coordinates() {
    let repo: RepoCoordinates = "rust-lang/rust".parse().unwrap();
    assert_eq!(repo, RepoCoordinates::new("rust-lang", "rust"));

    let repo: RepoCoordinates = "  owner/name ".parse().unwrap();
    assert_eq!(repo, RepoCoordinates::new("owner", "name"));
  }

  #[test]
  fn test_parse_coordinates_invalid() {
    for input in ["", "owner", "owner/", "/name", "a/b/c"] {
      let result = input.parse::<RepoCoordinates>();
      assert!(result.is_err(), "expected '{input}' to be rejected");
      assert!(result.unwrap_err().to_string().contains("OWNER/NAME"));
    }
  }
}
