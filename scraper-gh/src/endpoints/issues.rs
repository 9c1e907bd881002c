//! GitHub issue queries: timeline and comments.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, info, instrument, trace};

use crate::client::GitHubClient;
use crate::consts::{COMMENTS_PAGE_SIZE, TIMELINE_PAGE_SIZE};
use crate::models::{IssueComments, IssueTimeline, RepositoryData};

const TIMELINE_QUERY: &str = r#"
query($owner: String!, $name: String!, $number: Int!, $first: Int!) {
  repository(owner: $owner, name: $name) {
    issue(number: $number) {
      title
      timelineItems(first: $first) {
        nodes {
          ... on CrossReferencedEvent {
            source {
              ... on Issue {
                number
                title
              }
            }
          }
        }
      }
    }
  }
}
"#;

const COMMENTS_QUERY: &str = r#"
query($owner: String!, $name: String!, $number: Int!, $first: Int!) {
  repository(owner: $owner, name: $name) {
    issue(number: $number) {
      body
      comments(first: $first) {
        nodes {
          body
        }
      }
    }
  }
}
"#;

impl GitHubClient {
  /// Get the title and the first timeline items of an issue.
  ///
  /// # Errors
  ///
  /// Returns an error if the issue is not found or the query fails.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_issue_timeline(&self, issue_number: u64) -> Result<IssueTimeline> {
    info!("Fetching timeline of issue #{} in {}", issue_number, self.repo);

    let data: RepositoryData<IssueTimeline> = self
      .query(
        TIMELINE_QUERY,
        json!({ "number": issue_number, "first": TIMELINE_PAGE_SIZE }),
      )
      .await
      .with_context(|| format!("Failed to fetch timeline of issue #{issue_number}"))?;

    let timeline = self.require_issue(data, issue_number)?;
    debug!(
      "Issue #{} has {} timeline items",
      issue_number,
      timeline.timeline_items.nodes.len()
    );
    trace!("Timeline: {:?}", timeline);
    Ok(timeline)
  }

  /// Get the body of an issue followed by the bodies of its first comments,
  /// in creation order.
  ///
  /// # Errors
  ///
  /// Returns an error if the issue is not found or the query fails.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_issue_comments(&self, issue_number: u64) -> Result<Vec<String>> {
    info!("Fetching comments of issue #{} in {}", issue_number, self.repo);

    let data: RepositoryData<IssueComments> = self
      .query(
        COMMENTS_QUERY,
        json!({ "number": issue_number, "first": COMMENTS_PAGE_SIZE }),
      )
      .await
      .with_context(|| format!("Failed to fetch comments of issue #{issue_number}"))?;

    let bodies = self.require_issue(data, issue_number)?.into_bodies();
    debug!("Issue #{} has {} bodies", issue_number, bodies.len());
    Ok(bodies)
  }

  fn require_issue<T>(&self, data: RepositoryData<T>, issue_number: u64) -> Result<T> {
    data
      .repository
      .and_then(|repository| repository.issue)
      .ok_or_else(|| anyhow::anyhow!("Issue #{} not found in {}", issue_number, self.repo))
  }
}
