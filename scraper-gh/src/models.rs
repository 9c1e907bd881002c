use serde::Deserialize;

/// Represents GitHub authentication credentials
#[derive(Clone, Default)]
pub struct GitHubAuth {
  pub token: Option<String>,
}

impl std::fmt::Debug for GitHubAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GitHubAuth")
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

/// Envelope of every GraphQL response
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
  pub data: Option<T>,
  #[serde(default)]
  pub errors: Vec<GraphQlError>,
}

/// A single error reported by the GraphQL API
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
  pub message: String,
  #[serde(rename = "type")]
  pub kind: Option<String>,
}

/// `data` of a query rooted at `repository(owner:, name:)`
#[derive(Debug, Deserialize)]
pub struct RepositoryData<T> {
  pub repository: Option<IssueData<T>>,
}

/// `repository.issue(number:)`
#[derive(Debug, Deserialize)]
pub struct IssueData<T> {
  pub issue: Option<T>,
}

/// A GraphQL connection; only `nodes` is requested
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
  #[serde(default = "Vec::new")]
  pub nodes: Vec<Option<T>>,
}

impl<T> Connection<T> {
  /// Iterate the non-null nodes
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.nodes.iter().flatten()
  }
}

/// Title and timeline of an issue
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTimeline {
  pub title: String,
  pub timeline_items: Connection<TimelineItem>,
}

impl IssueTimeline {
  /// Issues that cross-reference this one, in timeline order.
  ///
  /// Only cross-reference events whose source is an issue with a number are
  /// kept. An issue that references this one several times appears once per
  /// event.
  pub fn referencing_issues(&self) -> Vec<IssueRef> {
    self
      .timeline_items
      .iter()
      .filter_map(|item| item.source.as_ref())
      .filter_map(|source| match source.number {
        Some(number) if number > 0 => Some(IssueRef {
          number,
          title: source.title.clone(),
        }),
        _ => None,
      })
      .collect()
  }
}

/// A timeline node. Anything other than a `CrossReferencedEvent` arrives as an
/// empty object and has no source.
#[derive(Debug, Deserialize)]
pub struct TimelineItem {
  pub source: Option<ReferenceSource>,
}

/// Source of a cross-reference. Fields are absent when the source is a pull
/// request rather than an issue.
#[derive(Debug, Deserialize)]
pub struct ReferenceSource {
  pub number: Option<u64>,
  pub title: Option<String>,
}

/// Body and comments of an issue
#[derive(Debug, Deserialize)]
pub struct IssueComments {
  pub body: Option<String>,
  pub comments: Connection<CommentNode>,
}

impl IssueComments {
  /// The issue body followed by each comment body, in API order.
  pub fn into_bodies(self) -> Vec<String> {
    std::iter::once(self.body.unwrap_or_default())
      .chain(
        self
          .comments
          .nodes
          .into_iter()
          .flatten()
          .map(|comment| comment.body.unwrap_or_default()),
      )
      .collect()
  }
}

/// A single issue comment
#[derive(Debug, Deserialize)]
pub struct CommentNode {
  pub body: Option<String>,
}

/// An issue number, with a title when one is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
  pub number: u64,
  pub title: Option<String>,
}

impl IssueRef {
  pub fn new(number: u64) -> Self {
    Self { number, title: None }
  }
}
