//! GraphQL fixtures for tests
//!
//! Builders for the two response shapes the scraper consumes, plus helpers
//! that mount them on a [`MockServer`] keyed by issue number.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A timeline response for an issue titled `title`, cross-referenced by the
/// given `(number, title)` issues in order.
///
/// Non-reference events and a pull-request reference are interleaved, since
/// the real API returns those as empty objects.
pub fn timeline_response(title: &str, references: &[(u64, &str)]) -> Value {
  let mut nodes = vec![json!({})];
  for (number, source_title) in references {
    nodes.push(json!({ "source": { "number": number, "title": source_title } }));
    nodes.push(json!({ "source": {} }));
  }

  json!({
    "data": {
      "repository": {
        "issue": {
          "title": title,
          "timelineItems": { "nodes": nodes }
        }
      }
    }
  })
}

/// A body-plus-comments response.
pub fn comments_response(body: &str, comments: &[&str]) -> Value {
  let nodes: Vec<Value> = comments.iter().map(|comment| json!({ "body": comment })).collect();

  json!({
    "data": {
      "repository": {
        "issue": {
          "body": body,
          "comments": { "nodes": nodes }
        }
      }
    }
  })
}

/// The response GitHub gives for an issue number that does not exist.
pub fn not_found_response(number: u64) -> Value {
  json!({
    "data": { "repository": { "issue": null } },
    "errors": [
      {
        "type": "NOT_FOUND",
        "path": ["repository", "issue"],
        "message": format!("Could not resolve to an Issue with the number of {number}.")
      }
    ]
  })
}

/// A response carrying a single GraphQL error and no data.
pub fn graphql_error_response(message: &str) -> Value {
  json!({
    "data": null,
    "errors": [ { "message": message } ]
  })
}

/// Answer timeline queries for issue `number` with `response`.
pub async fn mount_timeline(server: &MockServer, number: u64, response: Value) {
  Mock::given(method("POST"))
    .and(body_string_contains("timelineItems"))
    .and(body_partial_json(json!({ "variables": { "number": number } })))
    .respond_with(ResponseTemplate::new(200).set_body_json(response))
    .mount(server)
    .await;
}

/// Answer comment queries for issue `number` with `response`.
pub async fn mount_comments(server: &MockServer, number: u64, response: Value) {
  Mock::given(method("POST"))
    .and(body_string_contains("comments(first"))
    .and(body_partial_json(json!({ "variables": { "number": number } })))
    .respond_with(ResponseTemplate::new(200).set_body_json(response))
    .mount(server)
    .await;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_timeline_response_shape() {
    let response = timeline_response("Root", &[(3, "Three")]);
    let nodes = &response["data"]["repository"]["issue"]["timelineItems"]["nodes"];

    assert_eq!(response["data"]["repository"]["issue"]["title"], "Root");
    assert_eq!(nodes.as_array().map(Vec::len), Some(3));
    assert_eq!(nodes[1]["source"]["number"], 3);
  }

  #[test]
  fn test_comments_response_shape() {
    let response = comments_response("body", &["one", "two"]);
    let issue = &response["data"]["repository"]["issue"];

    assert_eq!(issue["body"], "body");
    assert_eq!(issue["comments"]["nodes"][1]["body"], "two");
  }
}
